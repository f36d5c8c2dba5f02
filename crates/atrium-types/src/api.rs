use serde::{Deserialize, Serialize};

use crate::models::Role;

// -- Token claims --

/// Signed bearer-token claims. Canonical definition lives here so the
/// REST middleware, the handlers, and the server binary all agree on one
/// shape. `exp` is issuance time plus eight hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    pub user: Claims,
}

// -- Create requests --

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewPartner {
    pub name: String,
    pub logo_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub icon_class: String,
    pub category: Option<String>,
    pub category_url: Option<String>,
    pub theme: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewTestimonial {
    pub quote: String,
    pub client_name: String,
    pub client_title: Option<String>,
    pub image_url: Option<String>,
    pub display_order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Option<Role>,
}

/// User update is not patch-shaped: username is always required, and a
/// password, when present, is re-hashed rather than stored verbatim.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserUpdate {
    pub username: String,
    pub password: Option<String>,
}

// -- Partial updates --
//
// Each patch struct is the allow-list for its entity: a request body can
// only ever set the columns named here, in this order. Anything else in
// the body is dropped during deserialization, so `id` and internal
// columns are unreachable by construction.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PartnerPatch {
    pub name: Option<String>,
    pub logo_url: Option<String>,
}

impl PartnerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.logo_url.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_class: Option<String>,
    pub category: Option<String>,
    pub category_url: Option<String>,
    pub theme: Option<String>,
    pub display_order: Option<i64>,
    pub is_featured: Option<bool>,
    pub live_url: Option<String>,
    pub badge_text: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.icon_class.is_none()
            && self.category.is_none()
            && self.category_url.is_none()
            && self.theme.is_none()
            && self.display_order.is_none()
            && self.is_featured.is_none()
            && self.live_url.is_none()
            && self.badge_text.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TestimonialPatch {
    pub quote: Option<String>,
    pub client_name: Option<String>,
    pub client_title: Option<String>,
    pub image_url: Option<String>,
    pub display_order: Option<i64>,
}

impl TestimonialPatch {
    pub fn is_empty(&self) -> bool {
        self.quote.is_none()
            && self.client_name.is_none()
            && self.client_title.is_none()
            && self.image_url.is_none()
            && self.display_order.is_none()
    }
}
