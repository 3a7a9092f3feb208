//! Rust rows matching the database schema.

use chrono::{DateTime, Utc};

/// A persisted location-map row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLocation {
    /// Row id (UUID v4).
    pub id: String,
    /// Project-relative key.
    pub relative_path: String,
    /// Facility-absolute path.
    pub full_path: String,
    /// Work-order identifier, when the facility supplied one.
    pub work_order: Option<String>,
    /// Insertion timestamp.
    pub date_added: DateTime<Utc>,
}

/// A persisted, resolved grading-export record.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingRecord {
    /// Row id (UUID v4).
    pub id: String,
    /// Path as exported by the grading tool.
    pub original_path: String,
    /// Resolved facility path.
    pub mapped_path: String,
    /// Location key that matched, if any.
    pub matched_location: Option<String>,
    /// Frame numbers, export order.
    pub frames: Vec<i64>,
    /// Insertion timestamp.
    pub date_added: DateTime<Utc>,
}

/// A persisted compressed frame range.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRange {
    /// Row id (UUID v4).
    pub id: String,
    /// Resolved facility path.
    pub path: String,
    /// First frame, inclusive.
    pub start_frame: i64,
    /// Last frame, inclusive.
    pub end_frame: i64,
    /// Insertion timestamp.
    pub date_added: DateTime<Utc>,
}

/// A persisted record of a classified video file.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFile {
    /// Row id (UUID v4).
    pub id: String,
    /// File name without directories.
    pub filename: String,
    /// Full path at processing time.
    pub path: String,
    /// Probed duration.
    pub duration_seconds: f64,
    /// Frame rate used for classification.
    pub fps: f64,
    /// Derived total frame count.
    pub total_frames: i64,
    /// Processing timestamp.
    pub processed_date: DateTime<Utc>,
}
