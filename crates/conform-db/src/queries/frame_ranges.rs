//! Compressed frame-range persistence.

use chrono::Utc;
use conform_common::{Error, Result};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::models::StoredRange;
use crate::queries::parse_timestamp;

/// Persist one compressed range.
pub fn insert_range(
    conn: &Connection,
    path: &str,
    start_frame: i64,
    end_frame: i64,
) -> Result<StoredRange> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    conn.execute(
        "INSERT INTO frame_ranges (id, path, start_frame, end_frame, date_added)
         VALUES (?, ?, ?, ?, ?)",
        params![id, path, start_frame, end_frame, now.to_rfc3339()],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(StoredRange {
        id,
        path: path.to_string(),
        start_frame,
        end_frame,
        date_added: now,
    })
}

/// List every persisted range in ledger order: start frame ascending,
/// path breaking ties.
pub fn list_ranges(conn: &Connection) -> Result<Vec<StoredRange>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, path, start_frame, end_frame, date_added
             FROM frame_ranges ORDER BY start_frame, path",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(StoredRange {
                id: row.get(0)?,
                path: row.get(1)?,
                start_frame: row.get(2)?,
                end_frame: row.get(3)?,
                date_added: parse_timestamp(&row.get::<_, String>(4)?),
            })
        })
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows)
}
