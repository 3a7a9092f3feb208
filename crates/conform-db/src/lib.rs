//! # conform-db
//!
//! SQLite persistence for conform runs, using rusqlite with r2d2
//! connection pooling.
//!
//! - `pool`: pool initialization (file-backed or in-memory) and
//!   migrations-on-init
//! - `migrations`: embedded, forward-only schema migrations
//! - `models`: Rust rows matching the schema
//! - `queries`: insert/list operations per table
//!
//! A run persists four kinds of data: the location map it used, the
//! resolved grading records, the compressed frame ranges, and the video
//! files it classified against. Ranges survive across runs so a later
//! video-only run can classify them without re-parsing the export.
//!
//! ```no_run
//! use conform_db::pool::{get_conn, init_pool};
//! use conform_db::queries::frame_ranges;
//!
//! let pool = init_pool("./conform.db").unwrap();
//! let conn = get_conn(&pool).unwrap();
//! let stored = frame_ranges::insert_range(&conn, "/hpsans13/production/dogman/reel1", 10, 20).unwrap();
//! println!("persisted range {}", stored.id);
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
