use mms_common::model::maintenance_log::{NewMaintenanceLog, RecentLog};
use rusqlite::{params, Connection};

pub fn insert(conn: &Connection, log: &NewMaintenanceLog) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO maintenance_logs (machine_id, description, date) VALUES (?1, ?2, ?3)",
        params![log.machine_id, log.description, log.date],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Newest entries first. Logs whose machine no longer exists are skipped.
pub fn recent(conn: &Connection, limit: usize) -> rusqlite::Result<Vec<RecentLog>> {
    let mut stmt = conn.prepare(
        "SELECT maintenance_logs.id, machines.name, maintenance_logs.description, maintenance_logs.date \
         FROM maintenance_logs \
         JOIN machines ON maintenance_logs.machine_id = machines.id \
         ORDER BY maintenance_logs.date DESC, maintenance_logs.id DESC \
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |row| {
        Ok(RecentLog {
            id: row.get(0)?,
            machine_name: row.get(1)?,
            description: row.get(2)?,
            date: row.get(3)?,
        })
    })?;
    rows.collect()
}
