//! Resolved grading-record persistence.
//!
//! Frame lists are stored as JSON text; the reconciliation pipeline only
//! needs them back as a whole, never queried per-frame.

use chrono::Utc;
use conform_common::{Error, Result};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::models::GradingRecord;
use crate::queries::parse_timestamp;

/// Persist one resolved record.
pub fn insert_record(
    conn: &Connection,
    original_path: &str,
    mapped_path: &str,
    matched_location: Option<&str>,
    frames: &[i64],
) -> Result<GradingRecord> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let frames_json = serde_json::to_string(frames)
        .map_err(|e| Error::database(format!("failed to encode frames: {e}")))?;

    conn.execute(
        "INSERT INTO grading_records
             (id, original_path, mapped_path, matched_location, frames, date_added)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            id,
            original_path,
            mapped_path,
            matched_location,
            frames_json,
            now.to_rfc3339(),
        ],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(GradingRecord {
        id,
        original_path: original_path.to_string(),
        mapped_path: mapped_path.to_string(),
        matched_location: matched_location.map(str::to_string),
        frames: frames.to_vec(),
        date_added: now,
    })
}

/// List every persisted record, oldest first.
pub fn list_records(conn: &Connection) -> Result<Vec<GradingRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, original_path, mapped_path, matched_location, frames, date_added
             FROM grading_records ORDER BY date_added, mapped_path",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let frames_json: String = row.get(4)?;
            Ok(GradingRecord {
                id: row.get(0)?,
                original_path: row.get(1)?,
                mapped_path: row.get(2)?,
                matched_location: row.get(3)?,
                frames: serde_json::from_str(&frames_json).unwrap_or_default(),
                date_added: parse_timestamp(&row.get::<_, String>(5)?),
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
    fn frames_round_trip_through_json() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        insert_record(
            &conn,
            "/images1/dogman/reel1/partA",
            "/hpsans13/production/dogman/reel1/partA",
            Some("reel1/partA"),
            &[32, 33, 34, 67],
        )
        .unwrap();

        let rows = list_records(&conn).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].frames, vec![32, 33, 34, 67]);
        assert_eq!(rows[0].matched_location.as_deref(), Some("reel1/partA"));
    }

    #[test]
    fn unresolved_record_persists_without_location() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        insert_record(&conn, "/odd/path", "/odd/path", None, &[1]).unwrap();

        let rows = list_records(&conn).unwrap();
        assert!(rows[0].matched_location.is_none());
        assert_eq!(rows[0].original_path, rows[0].mapped_path);
    }
}
