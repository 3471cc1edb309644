use crate::store::spares;
use log::debug;
use mms_common::model::spare::Spare;
use rusqlite::{params, Connection};

/// Every spare with `stock < threshold`, in id order.
///
/// An empty result means there is nothing to purchase; it is never an error.
pub fn select_low_stock(conn: &Connection, threshold: i64) -> rusqlite::Result<Vec<Spare>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM spares WHERE stock < ?1 ORDER BY id",
        spares::COLUMNS
    ))?;
    let rows = stmt.query_map(params![threshold], spares::map_row)?;
    let selected = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    debug!("{} spare(s) below threshold {}", selected.len(), threshold);
    Ok(selected)
}
