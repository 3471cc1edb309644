use crate::store::like_pattern;
use mms_common::model::supplier::{NewSupplier, Supplier};
use rusqlite::{params, Connection, Row};

fn map_row(row: &Row<'_>) -> rusqlite::Result<Supplier> {
    Ok(Supplier {
        id: row.get(0)?,
        spare_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
    })
}

/// Suppliers linked to one spare, optionally filtered by name, email or id.
pub fn list_for_spare(
    conn: &Connection,
    spare_id: i64,
    search: Option<&str>,
) -> rusqlite::Result<Vec<Supplier>> {
    match search {
        Some(term) => {
            let mut stmt = conn.prepare(
                "SELECT id, spare_id, name, email FROM suppliers \
                 WHERE spare_id = ?1 AND (name LIKE ?2 OR email LIKE ?2 OR CAST(id AS TEXT) LIKE ?2) \
                 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![spare_id, like_pattern(term)], map_row)?;
            rows.collect()
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, spare_id, name, email FROM suppliers WHERE spare_id = ?1 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![spare_id], map_row)?;
            rows.collect()
        }
    }
}

/// Contact addresses of every supplier of `spare_id`, in supplier id order.
pub fn emails_for_spare(conn: &Connection, spare_id: i64) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT email FROM suppliers WHERE spare_id = ?1 ORDER BY id")?;
    let rows = stmt.query_map(params![spare_id], |row| row.get(0))?;
    rows.collect()
}

pub fn insert(conn: &Connection, supplier: &NewSupplier) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO suppliers (spare_id, name, email) VALUES (?1, ?2, ?3)",
        params![supplier.spare_id, supplier.name, supplier.email],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Renames a supplier or changes its address. The spare link is left as is.
pub fn update(conn: &Connection, id: i64, name: &str, email: &str) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE suppliers SET name = ?1, email = ?2 WHERE id = ?3",
        params![name, email, id],
    )?;
    Ok(changed > 0)
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM suppliers WHERE id = ?1", params![id])? > 0)
}
