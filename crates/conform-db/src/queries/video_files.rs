//! Classified video-file persistence.

use chrono::Utc;
use conform_common::{Error, Result};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::models::VideoFile;
use crate::queries::parse_timestamp;

/// Persist one probed video file.
pub fn insert_video_file(
    conn: &Connection,
    filename: &str,
    path: &str,
    duration_seconds: f64,
    fps: f64,
    total_frames: i64,
) -> Result<VideoFile> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    conn.execute(
        "INSERT INTO video_files
             (id, filename, path, duration_seconds, fps, total_frames, processed_date)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            id,
            filename,
            path,
            duration_seconds,
            fps,
            total_frames,
            now.to_rfc3339(),
        ],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(VideoFile {
        id,
        filename: filename.to_string(),
        path: path.to_string(),
        duration_seconds,
        fps,
        total_frames,
        processed_date: now,
    })
}

/// List every processed video, oldest first.
pub fn list_video_files(conn: &Connection) -> Result<Vec<VideoFile>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, filename, path, duration_seconds, fps, total_frames, processed_date
             FROM video_files ORDER BY processed_date",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(VideoFile {
                id: row.get(0)?,
                filename: row.get(1)?,
                path: row.get(2)?,
                duration_seconds: row.get(3)?,
                fps: row.get(4)?,
                total_frames: row.get(5)?,
                processed_date: parse_timestamp(&row.get::<_, String>(6)?),
            })
        })
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows)
}
