use crate::store::like_pattern;
use mms_common::model::spare::{NewSpare, Spare};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const COLUMNS: &str = "id, name, stock, location, machine_id";

pub(crate) fn map_row(row: &Row<'_>) -> rusqlite::Result<Spare> {
    Ok(Spare {
        id: row.get(0)?,
        name: row.get(1)?,
        stock: row.get(2)?,
        location: row.get(3)?,
        machine_id: row.get(4)?,
    })
}

pub fn list(conn: &Connection, search: Option<&str>) -> rusqlite::Result<Vec<Spare>> {
    match search {
        Some(term) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM spares \
                 WHERE name LIKE ?1 OR CAST(id AS TEXT) LIKE ?1 OR location LIKE ?1 \
                 ORDER BY id"
            ))?;
            let rows = stmt.query_map(params![like_pattern(term)], map_row)?;
            rows.collect()
        }
        None => {
            let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM spares ORDER BY id"))?;
            let rows = stmt.query_map([], map_row)?;
            rows.collect()
        }
    }
}

pub fn get(conn: &Connection, id: i64) -> rusqlite::Result<Option<Spare>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM spares WHERE id = ?1"),
        params![id],
        map_row,
    )
    .optional()
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM spares", [], |row| row.get(0))
}

pub fn count_below(conn: &Connection, threshold: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM spares WHERE stock < ?1",
        params![threshold],
        |row| row.get(0),
    )
}

pub fn insert(conn: &Connection, spare: &NewSpare) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO spares (name, stock, location, machine_id) VALUES (?1, ?2, ?3, ?4)",
        params![spare.name, spare.stock, spare.location, spare.machine_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, spare: &NewSpare) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE spares SET name = ?1, stock = ?2, location = ?3, machine_id = ?4 WHERE id = ?5",
        params![spare.name, spare.stock, spare.location, spare.machine_id, id],
    )?;
    Ok(changed > 0)
}

/// Deletes the spare only. Linked suppliers are kept.
pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM spares WHERE id = ?1", params![id])? > 0)
}
