//! The frame ledger: every (frame, resolved path) pair from the export,
//! sorted ready for compression.

use conform_parser::ResolvedRecord;

/// One frame attributed to one resolved storage path.
///
/// Ordering is (frame, path): frame number is the primary key; the path
/// only breaks ties so that duplicate frame numbers on different paths
/// group deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LedgerEntry {
    /// Frame number.
    pub frame: i64,
    /// Resolved storage path.
    pub path: String,
}

impl LedgerEntry {
    /// Build an entry.
    pub fn new(frame: i64, path: impl Into<String>) -> Self {
        Self {
            frame,
            path: path.into(),
        }
    }
}

/// The sorted collection of all ledger entries for one run.
#[derive(Debug, Clone, Default)]
pub struct FrameLedger {
    entries: Vec<LedgerEntry>,
}

impl FrameLedger {
    /// Build a ledger from resolved records: one entry per (record, frame)
    /// pair. Records with no valid frames contribute nothing.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ResolvedRecord>,
    {
        let entries = records
            .into_iter()
            .flat_map(|record| {
                record
                    .frames
                    .iter()
                    .map(|&frame| LedgerEntry::new(frame, record.mapped_path.clone()))
            })
            .collect();
        Self::from_entries(entries)
    }

    /// Build a ledger from loose entries, sorting them into (frame, path)
    /// order.
    pub fn from_entries(mut entries: Vec<LedgerEntry>) -> Self {
        entries.sort();
        Self { entries }
    }

    /// Entries in (frame, path) order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, frames: &[i64]) -> ResolvedRecord {
        ResolvedRecord {
            original_path: format!("/raw{path}"),
            mapped_path: path.to_string(),
            matched_location: None,
            frames: frames.to_vec(),
        }
    }

    #[test]
    fn one_entry_per_frame() {
        let records = [record("/san/a", &[5, 6]), record("/san/b", &[1])];
        let ledger = FrameLedger::from_records(&records);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn sorted_by_frame_then_path() {
        let records = [record("/san/b", &[2, 1]), record("/san/a", &[2])];
        let ledger = FrameLedger::from_records(&records);
        let got: Vec<(i64, &str)> = ledger
            .entries()
            .iter()
            .map(|e| (e.frame, e.path.as_str()))
            .collect();
        assert_eq!(got, vec![(1, "/san/b"), (2, "/san/a"), (2, "/san/b")]);
    }

    #[test]
    fn duplicate_frames_on_different_paths_both_kept() {
        let records = [record("/san/a", &[7]), record("/san/b", &[7])];
        let ledger = FrameLedger::from_records(&records);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn empty_records_contribute_nothing() {
        let records = [record("/san/a", &[]), record("/san/b", &[3])];
        let ledger = FrameLedger::from_records(&records);
        assert_eq!(ledger.len(), 1);
    }
}
