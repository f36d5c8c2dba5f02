//! Command-line helper to seed an admin user.
//!
//! Usage: create-admin <username> <password>

use std::path::PathBuf;

use anyhow::{Result, bail};

use atrium_api::auth::hash_password;
use atrium_db::Database;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        bail!("usage: create-admin <username> <password>");
    };

    let db_path = std::env::var("ATRIUM_DB_PATH").unwrap_or_else(|_| "atrium.db".into());
    let db = Database::open(&PathBuf::from(&db_path))?;

    let password_hash = hash_password(&password)?;
    match db.create_user(&username, &password_hash, "admin") {
        Ok(user) => {
            println!("Created admin user \"{}\" (id {})", user.username, user.id);
            Ok(())
        }
        Err(e) if atrium_db::is_unique_violation(&e) => {
            bail!("a user with the username \"{}\" already exists", username)
        }
        Err(e) => Err(e),
    }
}
