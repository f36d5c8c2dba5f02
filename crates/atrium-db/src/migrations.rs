use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            username        TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            role            TEXT NOT NULL DEFAULT 'admin',
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS partners (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            logo_url    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS products (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            description     TEXT,
            icon_class      TEXT NOT NULL,
            category        TEXT,
            category_url    TEXT,
            theme           TEXT,
            is_featured     INTEGER NOT NULL DEFAULT 0,
            display_order   INTEGER,
            live_url        TEXT,
            badge_text      TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_products_order
            ON products(display_order);

        CREATE TABLE IF NOT EXISTS testimonials (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            quote           TEXT NOT NULL,
            client_name     TEXT NOT NULL,
            client_title    TEXT,
            image_url       TEXT,
            display_order   INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_testimonials_order
            ON testimonials(display_order);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
