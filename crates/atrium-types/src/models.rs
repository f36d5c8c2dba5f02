use serde::{Deserialize, Serialize};

/// The only role the admin panel knows about. Stored lowercase in the
/// users table and carried verbatim inside token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon_class: String,
    pub category: Option<String>,
    pub category_url: Option<String>,
    pub theme: Option<String>,
    pub is_featured: bool,
    pub display_order: Option<i64>,
    pub live_url: Option<String>,
    pub badge_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub id: i64,
    pub quote: String,
    pub client_name: String,
    pub client_title: Option<String>,
    pub image_url: Option<String>,
    pub display_order: Option<i64>,
}

/// User as exposed over the API. The password hash never leaves the
/// database layer.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub created_at: String,
}
