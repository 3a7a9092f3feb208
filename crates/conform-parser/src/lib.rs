//! # conform-parser
//!
//! Readers for the two text inputs of a conform run, plus the path
//! resolver that ties them together:
//!
//! - **Grading export** (`export`): whitespace-separated lines from the
//!   color-grading tool; a storage path followed by frame numbers.
//! - **Location map** (`locations`): comma-separated `relative, canonical`
//!   pairs from the facility management system, ordered. A built-in
//!   default map is available when no file is supplied.
//! - **Resolution** (`resolve`): maps each record's raw path to its
//!   canonical facility path via ordered substring matching.
//!
//! ## Quick Start
//!
//! ```
//! use conform_parser::{parse_export, resolve_records, LocationMap};
//!
//! let map = LocationMap::builtin();
//! let records = parse_export("/images1/dogman/reel1/partA/1920x1080 1 2 3".as_bytes()).unwrap();
//! let resolved = resolve_records(&map, records);
//!
//! assert_eq!(
//!     resolved[0].mapped_path,
//!     "/hpsans13/production/dogman/reel1/partA/1920x1080"
//! );
//! ```

pub mod export;
pub mod locations;
pub mod resolve;

pub use export::{parse_export, FrameRecord};
pub use locations::{LocationEntry, LocationMap};
pub use resolve::{resolve_records, ResolvedPath, ResolvedRecord};
