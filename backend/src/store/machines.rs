use crate::store::like_pattern;
use mms_common::model::machine::{Machine, NewMachine};
use rusqlite::{params, Connection, Row};

fn map_row(row: &Row<'_>) -> rusqlite::Result<Machine> {
    Ok(Machine {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        last_maintenance: row.get(3)?,
    })
}

/// All machines in id order, optionally filtered by name, id or location.
pub fn list(conn: &Connection, search: Option<&str>) -> rusqlite::Result<Vec<Machine>> {
    match search {
        Some(term) => {
            let mut stmt = conn.prepare(
                "SELECT id, name, location, last_maintenance FROM machines \
                 WHERE name LIKE ?1 OR CAST(id AS TEXT) LIKE ?1 OR location LIKE ?1 \
                 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![like_pattern(term)], map_row)?;
            rows.collect()
        }
        None => {
            let mut stmt = conn
                .prepare("SELECT id, name, location, last_maintenance FROM machines ORDER BY id")?;
            let rows = stmt.query_map([], map_row)?;
            rows.collect()
        }
    }
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM machines", [], |row| row.get(0))
}

pub fn insert(conn: &Connection, machine: &NewMachine) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO machines (name, location, last_maintenance) VALUES (?1, ?2, ?3)",
        params![machine.name, machine.location, machine.last_maintenance],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns `false` when no machine has this id.
pub fn update(conn: &Connection, id: i64, machine: &NewMachine) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE machines SET name = ?1, location = ?2, last_maintenance = ?3 WHERE id = ?4",
        params![machine.name, machine.location, machine.last_maintenance, id],
    )?;
    Ok(changed > 0)
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM machines WHERE id = ?1", params![id])? > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory;

    fn press() -> NewMachine {
        NewMachine {
            name: "Hydraulic press".into(),
            location: Some("Hall B".into()),
            last_maintenance: Some("2024-03-01".into()),
        }
    }

    #[test]
    fn insert_update_delete() {
        let conn = memory();
        let id = insert(&conn, &press()).unwrap();
        assert_eq!(count(&conn).unwrap(), 1);

        let mut edited = press();
        edited.location = None;
        assert!(update(&conn, id, &edited).unwrap());
        assert!(!update(&conn, id + 1, &edited).unwrap());
        assert_eq!(list(&conn, None).unwrap()[0].location, None);

        assert!(delete(&conn, id).unwrap());
        assert!(list(&conn, None).unwrap().is_empty());
    }

    #[test]
    fn search_matches_name_and_location() {
        let conn = memory();
        insert(&conn, &press()).unwrap();
        insert(
            &conn,
            &NewMachine {
                name: "Lathe".into(),
                location: Some("Hall A".into()),
                last_maintenance: None,
            },
        )
        .unwrap();

        assert_eq!(list(&conn, Some("press")).unwrap().len(), 1);
        assert_eq!(list(&conn, Some("Hall")).unwrap().len(), 2);
        assert_eq!(list(&conn, Some("2")).unwrap()[0].name, "Lathe");
    }
}
