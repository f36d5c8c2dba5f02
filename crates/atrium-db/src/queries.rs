use crate::Database;
use crate::models::UserRow;
use anyhow::{Result, anyhow, bail};
use atrium_types::api::{NewProduct, NewTestimonial, PartnerPatch, ProductPatch, TestimonialPatch};
use atrium_types::models::{Partner, Product, Testimonial};
use rusqlite::{Connection, OptionalExtension, params, types::ToSql};

impl Database {
    // -- Users --

    pub fn create_user(&self, username: &str, password_hash: &str, role: &str) -> Result<UserRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)",
                params![username, password_hash, role],
            )?;
            let id = conn.last_insert_rowid();
            query_user_by_id(conn, id)?.ok_or_else(|| anyhow!("user {} vanished after insert", id))
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password_hash, role, created_at FROM users WHERE username = ?1",
            )?;
            let row = stmt.query_row([username], user_from_row).optional()?;
            Ok(row)
        })
    }

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password_hash, role, created_at FROM users ORDER BY id ASC",
            )?;
            let rows = stmt
                .query_map([], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Username always changes; the password hash only when a new one is
    /// supplied. Returns false when no row matched the id.
    pub fn update_user(&self, id: i64, username: &str, password_hash: Option<&str>) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = match password_hash {
                Some(hash) => conn.execute(
                    "UPDATE users SET username = ?1, password_hash = ?2 WHERE id = ?3",
                    params![username, hash, id],
                )?,
                None => conn.execute(
                    "UPDATE users SET username = ?1 WHERE id = ?2",
                    params![username, id],
                )?,
            };
            Ok(affected > 0)
        })
    }

    pub fn delete_user(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }

    // -- Partners --

    pub fn list_partners(&self) -> Result<Vec<Partner>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, logo_url FROM partners ORDER BY id ASC")?;
            let rows = stmt
                .query_map([], partner_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_partner(&self, name: &str, logo_url: &str) -> Result<Partner> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO partners (name, logo_url) VALUES (?1, ?2)",
                params![name, logo_url],
            )?;
            let id = conn.last_insert_rowid();
            query_partner(conn, id)?.ok_or_else(|| anyhow!("partner {} vanished after insert", id))
        })
    }

    pub fn update_partner(&self, id: i64, patch: &PartnerPatch) -> Result<Option<Partner>> {
        let (sets, mut values) = partner_set_clauses(patch);
        if sets.is_empty() {
            bail!("no fields to update for partner {}", id);
        }
        values.push(&id);

        self.with_conn(|conn| {
            let sql = format!("UPDATE partners SET {} WHERE id = ?", sets.join(", "));
            let affected = conn.execute(&sql, values.as_slice())?;
            if affected == 0 {
                return Ok(None);
            }
            query_partner(conn, id)
        })
    }

    pub fn delete_partner(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM partners WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }

    // -- Products --

    pub fn list_products(&self) -> Result<Vec<Product>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, description, icon_class, category, category_url, theme,
                        is_featured, display_order, live_url, badge_text
                 FROM products
                 ORDER BY display_order ASC NULLS LAST",
            )?;
            let rows = stmt
                .query_map([], product_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_product(&self, new: &NewProduct) -> Result<Product> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO products (name, description, icon_class, category, category_url,
                                       theme, is_featured, display_order)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    new.name,
                    new.description,
                    new.icon_class,
                    new.category,
                    new.category_url,
                    new.theme,
                    new.is_featured.unwrap_or(false),
                    new.display_order,
                ],
            )?;
            let id = conn.last_insert_rowid();
            query_product(conn, id)?.ok_or_else(|| anyhow!("product {} vanished after insert", id))
        })
    }

    pub fn update_product(&self, id: i64, patch: &ProductPatch) -> Result<Option<Product>> {
        let (sets, mut values) = product_set_clauses(patch);
        if sets.is_empty() {
            bail!("no fields to update for product {}", id);
        }
        values.push(&id);

        self.with_conn(|conn| {
            let sql = format!("UPDATE products SET {} WHERE id = ?", sets.join(", "));
            let affected = conn.execute(&sql, values.as_slice())?;
            if affected == 0 {
                return Ok(None);
            }
            query_product(conn, id)
        })
    }

    pub fn delete_product(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM products WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }

    // -- Testimonials --

    pub fn list_testimonials(&self) -> Result<Vec<Testimonial>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, quote, client_name, client_title, image_url, display_order
                 FROM testimonials
                 ORDER BY display_order ASC NULLS LAST",
            )?;
            let rows = stmt
                .query_map([], testimonial_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_testimonial(&self, new: &NewTestimonial) -> Result<Testimonial> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO testimonials (quote, client_name, client_title, image_url, display_order)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new.quote,
                    new.client_name,
                    new.client_title,
                    new.image_url,
                    new.display_order,
                ],
            )?;
            let id = conn.last_insert_rowid();
            query_testimonial(conn, id)?
                .ok_or_else(|| anyhow!("testimonial {} vanished after insert", id))
        })
    }

    pub fn update_testimonial(
        &self,
        id: i64,
        patch: &TestimonialPatch,
    ) -> Result<Option<Testimonial>> {
        let (sets, mut values) = testimonial_set_clauses(patch);
        if sets.is_empty() {
            bail!("no fields to update for testimonial {}", id);
        }
        values.push(&id);

        self.with_conn(|conn| {
            let sql = format!("UPDATE testimonials SET {} WHERE id = ?", sets.join(", "));
            let affected = conn.execute(&sql, values.as_slice())?;
            if affected == 0 {
                return Ok(None);
            }
            query_testimonial(conn, id)
        })
    }

    pub fn delete_testimonial(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM testimonials WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }
}

// Set-clause builders walk the patch in allow-list order, so the generated
// SQL is deterministic and only ever names columns the patch type declares.

fn partner_set_clauses(patch: &PartnerPatch) -> (Vec<&'static str>, Vec<&dyn ToSql>) {
    let mut sets: Vec<&'static str> = Vec::new();
    let mut values: Vec<&dyn ToSql> = Vec::new();
    if let Some(name) = &patch.name {
        sets.push("name = ?");
        values.push(name);
    }
    if let Some(logo_url) = &patch.logo_url {
        sets.push("logo_url = ?");
        values.push(logo_url);
    }
    (sets, values)
}

fn product_set_clauses(patch: &ProductPatch) -> (Vec<&'static str>, Vec<&dyn ToSql>) {
    let mut sets: Vec<&'static str> = Vec::new();
    let mut values: Vec<&dyn ToSql> = Vec::new();
    if let Some(name) = &patch.name {
        sets.push("name = ?");
        values.push(name);
    }
    if let Some(description) = &patch.description {
        sets.push("description = ?");
        values.push(description);
    }
    if let Some(icon_class) = &patch.icon_class {
        sets.push("icon_class = ?");
        values.push(icon_class);
    }
    if let Some(category) = &patch.category {
        sets.push("category = ?");
        values.push(category);
    }
    if let Some(category_url) = &patch.category_url {
        sets.push("category_url = ?");
        values.push(category_url);
    }
    if let Some(theme) = &patch.theme {
        sets.push("theme = ?");
        values.push(theme);
    }
    if let Some(display_order) = &patch.display_order {
        sets.push("display_order = ?");
        values.push(display_order);
    }
    if let Some(is_featured) = &patch.is_featured {
        sets.push("is_featured = ?");
        values.push(is_featured);
    }
    if let Some(live_url) = &patch.live_url {
        sets.push("live_url = ?");
        values.push(live_url);
    }
    if let Some(badge_text) = &patch.badge_text {
        sets.push("badge_text = ?");
        values.push(badge_text);
    }
    (sets, values)
}

fn testimonial_set_clauses(patch: &TestimonialPatch) -> (Vec<&'static str>, Vec<&dyn ToSql>) {
    let mut sets: Vec<&'static str> = Vec::new();
    let mut values: Vec<&dyn ToSql> = Vec::new();
    if let Some(quote) = &patch.quote {
        sets.push("quote = ?");
        values.push(quote);
    }
    if let Some(client_name) = &patch.client_name {
        sets.push("client_name = ?");
        values.push(client_name);
    }
    if let Some(client_title) = &patch.client_title {
        sets.push("client_title = ?");
        values.push(client_title);
    }
    if let Some(image_url) = &patch.image_url {
        sets.push("image_url = ?");
        values.push(image_url);
    }
    if let Some(display_order) = &patch.display_order {
        sets.push("display_order = ?");
        values.push(display_order);
    }
    (sets, values)
}

// -- Row mappers --

fn user_from_row(row: &rusqlite::Row) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        role: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn partner_from_row(row: &rusqlite::Row) -> rusqlite::Result<Partner> {
    Ok(Partner {
        id: row.get(0)?,
        name: row.get(1)?,
        logo_url: row.get(2)?,
    })
}

fn product_from_row(row: &rusqlite::Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        icon_class: row.get(3)?,
        category: row.get(4)?,
        category_url: row.get(5)?,
        theme: row.get(6)?,
        is_featured: row.get(7)?,
        display_order: row.get(8)?,
        live_url: row.get(9)?,
        badge_text: row.get(10)?,
    })
}

fn testimonial_from_row(row: &rusqlite::Row) -> rusqlite::Result<Testimonial> {
    Ok(Testimonial {
        id: row.get(0)?,
        quote: row.get(1)?,
        client_name: row.get(2)?,
        client_title: row.get(3)?,
        image_url: row.get(4)?,
        display_order: row.get(5)?,
    })
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let row = conn
        .query_row(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE id = ?1",
            [id],
            user_from_row,
        )
        .optional()?;
    Ok(row)
}

fn query_partner(conn: &Connection, id: i64) -> Result<Option<Partner>> {
    let row = conn
        .query_row(
            "SELECT id, name, logo_url FROM partners WHERE id = ?1",
            [id],
            partner_from_row,
        )
        .optional()?;
    Ok(row)
}

fn query_product(conn: &Connection, id: i64) -> Result<Option<Product>> {
    let row = conn
        .query_row(
            "SELECT id, name, description, icon_class, category, category_url, theme,
                    is_featured, display_order, live_url, badge_text
             FROM products WHERE id = ?1",
            [id],
            product_from_row,
        )
        .optional()?;
    Ok(row)
}

fn query_testimonial(conn: &Connection, id: i64) -> Result<Option<Testimonial>> {
    let row = conn
        .query_row(
            "SELECT id, quote, client_name, client_title, image_url, display_order
             FROM testimonials WHERE id = ?1",
            [id],
            testimonial_from_row,
        )
        .optional()?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn sample_product(db: &Database) -> Product {
        db.create_product(&NewProduct {
            name: "Atlas CRM".into(),
            description: Some("Customer pipeline tracking".into()),
            icon_class: "fa-chart-line".into(),
            category: Some("SaaS".into()),
            theme: Some("dark".into()),
            display_order: Some(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn partial_update_leaves_absent_columns_untouched() {
        let db = test_db();
        let product = sample_product(&db);

        let patch = ProductPatch {
            name: Some("Atlas CRM 2".into()),
            ..Default::default()
        };
        let updated = db.update_product(product.id, &patch).unwrap().unwrap();

        assert_eq!(updated.name, "Atlas CRM 2");
        assert_eq!(updated.description.as_deref(), Some("Customer pipeline tracking"));
        assert_eq!(updated.theme.as_deref(), Some("dark"));
        assert_eq!(updated.display_order, Some(5));
        assert!(!updated.is_featured);
    }

    #[test]
    fn update_applies_multiple_fields_in_one_statement() {
        let db = test_db();
        let product = sample_product(&db);

        let patch = ProductPatch {
            display_order: Some(3),
            is_featured: Some(true),
            badge_text: Some("New".into()),
            ..Default::default()
        };
        let updated = db.update_product(product.id, &patch).unwrap().unwrap();

        assert_eq!(updated.display_order, Some(3));
        assert!(updated.is_featured);
        assert_eq!(updated.badge_text.as_deref(), Some("New"));
        assert_eq!(updated.name, "Atlas CRM");
    }

    #[test]
    fn empty_patch_is_an_error_and_store_is_unchanged() {
        let db = test_db();
        let product = sample_product(&db);

        assert!(db.update_product(product.id, &ProductPatch::default()).is_err());

        let listed = db.list_products().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Atlas CRM");
    }

    #[test]
    fn update_of_missing_id_returns_none() {
        let db = test_db();
        let patch = ProductPatch {
            name: Some("ghost".into()),
            ..Default::default()
        };
        assert!(db.update_product(9999, &patch).unwrap().is_none());
    }

    #[test]
    fn products_are_listed_by_display_order_with_unordered_last() {
        let db = test_db();
        for (name, order) in [("second", Some(2)), ("unordered", None), ("first", Some(1))] {
            db.create_product(&NewProduct {
                name: name.into(),
                icon_class: "fa-cube".into(),
                display_order: order,
                ..Default::default()
            })
            .unwrap();
        }

        let names: Vec<String> = db
            .list_products()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["first", "second", "unordered"]);
    }

    #[test]
    fn delete_reports_whether_a_row_was_removed() {
        let db = test_db();
        let partner = db.create_partner("Northwind", "https://cdn.example/nw.svg").unwrap();

        assert!(db.delete_partner(partner.id).unwrap());
        assert!(!db.delete_partner(partner.id).unwrap());
    }

    #[test]
    fn duplicate_username_surfaces_as_unique_violation() {
        let db = test_db();
        db.create_user("admin", "hash-a", "admin").unwrap();

        let err = db.create_user("admin", "hash-b", "admin").unwrap_err();
        assert!(crate::is_unique_violation(&err));
    }

    #[test]
    fn user_update_without_password_keeps_the_stored_hash() {
        let db = test_db();
        let user = db.create_user("admin", "original-hash", "admin").unwrap();

        assert!(db.update_user(user.id, "root", None).unwrap());

        let renamed = db.get_user_by_username("root").unwrap().unwrap();
        assert_eq!(renamed.password_hash, "original-hash");
        assert!(db.get_user_by_username("admin").unwrap().is_none());
    }

    #[test]
    fn user_update_of_missing_id_reports_no_rows() {
        let db = test_db();
        assert!(!db.update_user(42, "nobody", None).unwrap());
    }
}
