//! # Inventory Store
//!
//! SQLite persistence for machines, maintenance logs, spares and suppliers.
//!
//! Every request opens its own connection through `with_connection`, runs its
//! statements on the blocking thread pool and drops the connection before the
//! handler returns. Nothing is pooled or shared between requests.
//!
//! Foreign keys are declared but not enforced: deleting a spare leaves its
//! suppliers in place, still pointing at the old id.

pub mod logs;
pub mod machines;
pub mod spares;
pub mod suppliers;

use crate::error::AppError;
use rusqlite::Connection;
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS machines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    location TEXT,
    last_maintenance TEXT
);
CREATE TABLE IF NOT EXISTS maintenance_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    machine_id INTEGER NOT NULL,
    description TEXT NOT NULL,
    date TEXT NOT NULL,
    FOREIGN KEY(machine_id) REFERENCES machines(id)
);
CREATE TABLE IF NOT EXISTS spares (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    stock INTEGER NOT NULL DEFAULT 0,
    location TEXT NOT NULL DEFAULT '',
    machine_id INTEGER,
    FOREIGN KEY(machine_id) REFERENCES machines(id)
);
CREATE TABLE IF NOT EXISTS suppliers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    spare_id INTEGER,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    FOREIGN KEY(spare_id) REFERENCES spares(id)
);
";

pub fn open(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    relax_foreign_keys(&conn)?;
    Ok(conn)
}

/// The bundled SQLite enforces foreign keys by default; this store keeps
/// orphaned rows instead.
fn relax_foreign_keys(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", false)
}

/// Creates missing tables. Safe to run on every start.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}

/// Runs `f` against a fresh connection on the blocking pool.
pub async fn with_connection<T, F>(database_path: &Path, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, AppError> + Send + 'static,
{
    let path = database_path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let conn = open(&path)?;
        f(&conn)
    })
    .await?
}

/// `%term%` for `LIKE` searches.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}

#[cfg(test)]
pub(crate) fn memory() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory sqlite");
    relax_foreign_keys(&conn).expect("pragma");
    init_schema(&conn).expect("schema");
    conn
}
