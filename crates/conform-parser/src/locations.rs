//! Facility location map.
//!
//! An ordered table translating project-relative path keys to
//! facility-absolute storage paths. Order is load-bearing: resolution is
//! first-match-wins, never best-match (see [`crate::resolve`]).

use std::io::BufRead;

use conform_common::Result;

/// Project-root anchor used by the built-in map.
pub const DEFAULT_ANCHOR: &str = "dogman";

/// One row of the location map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry {
    /// Project-relative key, matched as a substring against export paths.
    pub relative_key: String,
    /// Facility-absolute path this key maps to.
    pub canonical_path: String,
    /// Work-order identifier, when the facility system supplies one.
    pub work_order: Option<String>,
}

/// Ordered, immutable location-mapping table.
///
/// `anchor` is the project-root directory name used to derive the matching
/// key from a raw export path; entries are consulted strictly in load
/// order.
#[derive(Debug, Clone)]
pub struct LocationMap {
    anchor: String,
    entries: Vec<LocationEntry>,
}

impl LocationMap {
    /// Build a map from already-parsed entries.
    pub fn new(anchor: impl Into<String>, entries: Vec<LocationEntry>) -> Self {
        Self {
            anchor: anchor.into(),
            entries,
        }
    }

    /// Read a comma-separated location file: `relative, canonical[, work_order, ...]`.
    ///
    /// Lines with fewer than two fields are skipped with a warning; fields
    /// past the third are collaborator metadata and ignored.
    pub fn from_reader<R: BufRead>(anchor: &str, reader: R) -> Result<Self> {
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 2 {
                tracing::warn!(line, "skipping location row with fewer than two fields");
                continue;
            }

            entries.push(LocationEntry {
                relative_key: fields[0].trim().to_string(),
                canonical_path: fields[1].trim().to_string(),
                work_order: fields.get(2).map(|f| f.trim().to_string()),
            });
        }
        Ok(Self::new(anchor, entries))
    }

    /// The fixed default table used when no location file is supplied.
    pub fn builtin() -> Self {
        const DEFAULTS: [(&str, &str); 8] = [
            (
                "reel1/partA/1920x1080",
                "/hpsans13/production/dogman/reel1/partA/1920x1080",
            ),
            (
                "reel1/VFX/Hydraulx",
                "/hpsans12/production/dogman/reel1/VFX/Hydraulx",
            ),
            (
                "reel1/VFX/Framestore",
                "/hpsans13/production/dogman/reel1/VFX/Framestore",
            ),
            (
                "reel1/VFX/AnimalLogic",
                "/hpsans14/production/dogman/reel1/VFX/AnimalLogic",
            ),
            (
                "reel1/partB/1920x1080",
                "/hpsans13/production/dogman/reel1/partB/1920x1080",
            ),
            (
                "pickups/shot_1ab/1920x1080",
                "/hpsans15/production/dogman/pickups/shot_1ab/1920x1080",
            ),
            (
                "pickups/shot_2b/1920x1080",
                "/hpsans11/production/dogman/pickups/shot_2b/1920x1080",
            ),
            (
                "reel1/partC/1920x1080",
                "/hpsans17/production/dogman/reel1/partC/1920x1080",
            ),
        ];

        let entries = DEFAULTS
            .iter()
            .map(|(key, path)| LocationEntry {
                relative_key: key.to_string(),
                canonical_path: path.to_string(),
                work_order: None,
            })
            .collect();

        Self::new(DEFAULT_ANCHOR, entries)
    }

    /// The project-root anchor segment.
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Entries in load order.
    pub fn entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_map_has_eight_entries() {
        let map = LocationMap::builtin();
        assert_eq!(map.len(), 8);
        assert_eq!(map.anchor(), "dogman");
        assert_eq!(map.entries()[0].relative_key, "reel1/partA/1920x1080");
    }

    #[test]
    fn parses_rows_and_preserves_order() {
        let input = "reel1/partA,/san1/show/reel1/partA,WO-1234\n\
                     reel1,/san2/show/reel1\n";
        let map = LocationMap::from_reader("show", input.as_bytes()).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.entries()[0].relative_key, "reel1/partA");
        assert_eq!(map.entries()[0].work_order.as_deref(), Some("WO-1234"));
        assert_eq!(map.entries()[1].relative_key, "reel1");
        assert!(map.entries()[1].work_order.is_none());
    }

    #[test]
    fn short_rows_and_blanks_skipped() {
        let input = "\njustonefield\nreel1/partA,/san1/reel1/partA\n   \n";
        let map = LocationMap::from_reader("show", input.as_bytes()).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn extra_trailing_fields_ignored() {
        let input = "reel1,/san1/reel1,WO-9,operator,2025-03-02\n";
        let map = LocationMap::from_reader("show", input.as_bytes()).unwrap();
        assert_eq!(map.entries()[0].work_order.as_deref(), Some("WO-9"));
        assert_eq!(map.entries()[0].canonical_path, "/san1/reel1");
    }

    #[test]
    fn fields_are_trimmed() {
        let input = " reel1/partA , /san1/reel1/partA , WO-1 \n";
        let map = LocationMap::from_reader("show", input.as_bytes()).unwrap();
        assert_eq!(map.entries()[0].relative_key, "reel1/partA");
        assert_eq!(map.entries()[0].canonical_path, "/san1/reel1/partA");
    }
}
