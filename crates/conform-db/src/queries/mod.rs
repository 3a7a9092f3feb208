//! Insert and list operations, one module per table.

pub mod frame_ranges;
pub mod grading_records;
pub mod locations;
pub mod video_files;

use chrono::{DateTime, Utc};

/// Parse a stored RFC 3339 timestamp, defaulting to now on corruption.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
