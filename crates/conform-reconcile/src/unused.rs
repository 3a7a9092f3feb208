//! Reconciliation of ledger frames against matched-range coverage.

use std::collections::HashSet;

use crate::classify::MatchedRange;
use crate::ledger::{FrameLedger, LedgerEntry};

/// Ledger entries not covered by any matching range.
///
/// Coverage is the union of `[start, end] x {path}` over the matching
/// ranges only. Degenerate and out-of-bounds ranges contribute nothing,
/// so their frames stay eligible to appear here. Output keeps the
/// ledger's ascending (frame, path) order.
pub fn unused_frames(ledger: &FrameLedger, matching: &[MatchedRange]) -> Vec<LedgerEntry> {
    let mut covered: HashSet<(i64, &str)> = HashSet::new();
    for matched in matching {
        for frame in matched.range.start..=matched.range.end {
            covered.insert((frame, matched.range.path.as_str()));
        }
    }

    ledger
        .entries()
        .iter()
        .filter(|entry| !covered.contains(&(entry.frame, entry.path.as_str())))
        .cloned()
        .collect()
}
