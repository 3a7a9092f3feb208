//! Location-map persistence.

use chrono::Utc;
use conform_common::{Error, Result};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::models::StoredLocation;
use crate::queries::parse_timestamp;

/// Persist one location row.
pub fn insert_location(
    conn: &Connection,
    relative_path: &str,
    full_path: &str,
    work_order: Option<&str>,
) -> Result<StoredLocation> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    conn.execute(
        "INSERT INTO locations (id, relative_path, full_path, work_order, date_added)
         VALUES (?, ?, ?, ?, ?)",
        params![id, relative_path, full_path, work_order, now.to_rfc3339()],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(StoredLocation {
        id,
        relative_path: relative_path.to_string(),
        full_path: full_path.to_string(),
        work_order: work_order.map(str::to_string),
        date_added: now,
    })
}

/// List every persisted location, oldest first.
pub fn list_locations(conn: &Connection) -> Result<Vec<StoredLocation>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, relative_path, full_path, work_order, date_added
             FROM locations ORDER BY date_added, relative_path",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(StoredLocation {
                id: row.get(0)?,
                relative_path: row.get(1)?,
                full_path: row.get(2)?,
                work_order: row.get(3)?,
                date_added: parse_timestamp(&row.get::<_, String>(4)?),
            })
        })
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{get_conn, init_memory_pool};

    #[test]
    fn insert_and_list_round_trip() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        insert_location(&conn, "reel1/partA", "/san1/reel1/partA", Some("WO-1")).unwrap();
        insert_location(&conn, "reel1/partB", "/san1/reel1/partB", None).unwrap();

        let rows = list_locations(&conn).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].relative_path, "reel1/partA");
        assert_eq!(rows[0].work_order.as_deref(), Some("WO-1"));
        assert!(rows[1].work_order.is_none());
    }
}
