//! Raw-path resolution against the location map.
//!
//! The matching key for a raw path is everything from the anchor segment
//! onward, with a leading slash. Each map key is then tested as a
//! *substring* of that key, in load order, and the first hit wins. This is
//! deliberately not exact-segment or longest-match: when one key is a
//! substring of another, whichever the facility listed first takes the
//! frames. Tests pin this policy.

use crate::export::FrameRecord;
use crate::locations::LocationMap;

/// Outcome of resolving one raw path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Canonical facility path, or the raw path unchanged when nothing
    /// matched.
    pub path: String,
    /// The map key that matched, when one did.
    pub matched_key: Option<String>,
}

/// A grading-export record after one resolver pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    /// Path as the grading tool wrote it.
    pub original_path: String,
    /// Canonical facility path (or the original, when unresolved).
    pub mapped_path: String,
    /// The location-map key that matched, if any.
    pub matched_location: Option<String>,
    /// Valid frame numbers from the record.
    pub frames: Vec<i64>,
}

impl LocationMap {
    /// Derive the normalized matching key for a raw path.
    ///
    /// Returns `None` when the anchor segment does not appear; no mapping
    /// is attempted in that case.
    fn match_key(&self, raw_path: &str) -> Option<String> {
        let components: Vec<&str> = raw_path.split('/').collect();
        let anchor_idx = components.iter().position(|c| *c == self.anchor())?;
        Some(format!("/{}", components[anchor_idx..].join("/")))
    }

    /// Resolve one raw path. Unresolved paths fall back to the input
    /// unchanged; that is an expected outcome, not an error.
    pub fn resolve(&self, raw_path: &str) -> ResolvedPath {
        if let Some(key) = self.match_key(raw_path) {
            for entry in self.entries() {
                if key.contains(entry.relative_key.as_str()) {
                    return ResolvedPath {
                        path: entry.canonical_path.clone(),
                        matched_key: Some(entry.relative_key.clone()),
                    };
                }
            }
            tracing::debug!(raw_path, key = %key, "no location entry matched");
        }

        ResolvedPath {
            path: raw_path.to_string(),
            matched_key: None,
        }
    }
}

/// Resolve every record once, carrying its frames through.
pub fn resolve_records(map: &LocationMap, records: Vec<FrameRecord>) -> Vec<ResolvedRecord> {
    records
        .into_iter()
        .map(|record| {
            let resolved = map.resolve(&record.raw_path);
            ResolvedRecord {
                original_path: record.raw_path,
                mapped_path: resolved.path,
                matched_location: resolved.matched_key,
                frames: record.frames,
            }
        })
        .collect()
}
