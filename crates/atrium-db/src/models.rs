/// Database row types for the users table. Partners, products and
/// testimonials map straight onto their atrium-types API models; users do
/// not, because the stored password hash must never reach the API layer
/// unfiltered.
#[derive(Debug)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}
