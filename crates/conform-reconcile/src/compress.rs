//! Greedy compression of the sorted ledger into maximal contiguous runs.

use crate::ledger::LedgerEntry;

/// An inclusive span of contiguous frames on one resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRange {
    /// Resolved storage path shared by every frame in the span.
    pub path: String,
    /// First frame, inclusive.
    pub start: i64,
    /// Last frame, inclusive. Always `>= start`.
    pub end: i64,
}

impl FrameRange {
    /// Build a range. `start <= end` is the caller's invariant.
    pub fn new(path: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            path: path.into(),
            start,
            end,
        }
    }

    /// Whether the range covers exactly one frame.
    pub fn is_single_frame(&self) -> bool {
        self.start == self.end
    }

    /// Display form: `start-end`, or just `start` for a single frame.
    pub fn label(&self) -> String {
        if self.is_single_frame() {
            self.start.to_string()
        } else {
            format!("{}-{}", self.start, self.end)
        }
    }
}

/// The open run of the compression state machine.
struct OpenRun {
    path: String,
    start: i64,
    end: i64,
}

impl OpenRun {
    fn starting_at(entry: &LedgerEntry) -> Self {
        Self {
            path: entry.path.clone(),
            start: entry.frame,
            end: entry.frame,
        }
    }

    fn close(self) -> FrameRange {
        FrameRange {
            path: self.path,
            start: self.start,
            end: self.end,
        }
    }
}

/// Compress sorted ledger entries into maximal contiguous per-path ranges.
///
/// Single linear scan with an explicit open-run accumulator. A path change
/// or any frame discontinuity (a gap, a duplicate, an out-of-order frame)
/// closes the run and opens a new one; closed runs are never reopened or
/// merged backward. Input must already be in (frame, path) order.
pub fn compress(entries: &[LedgerEntry]) -> Vec<FrameRange> {
    let mut ranges = Vec::new();
    let mut run: Option<OpenRun> = None;

    for entry in entries {
        let extends = run
            .as_ref()
            .is_some_and(|open| open.path == entry.path && entry.frame == open.end + 1);

        if extends {
            if let Some(open) = run.as_mut() {
                open.end = entry.frame;
            }
        } else {
            if let Some(open) = run.take() {
                ranges.push(open.close());
            }
            run = Some(OpenRun::starting_at(entry));
        }
    }

    if let Some(open) = run {
        ranges.push(open.close());
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(i64, &str)]) -> Vec<LedgerEntry> {
        pairs
            .iter()
            .map(|&(frame, path)| LedgerEntry::new(frame, path))
            .collect()
    }

    #[test]
    fn empty_ledger_compresses_to_nothing() {
        assert!(compress(&[]).is_empty());
    }

    #[test]
    fn contiguous_run_with_gap() {
        // Scenario: 1..=3 then a jump to 10 on one path.
        let ranges = compress(&entries(&[(1, "P"), (2, "P"), (3, "P"), (10, "P")]));
        assert_eq!(
            ranges,
            vec![FrameRange::new("P", 1, 3), FrameRange::new("P", 10, 10)]
        );
    }

    #[test]
    fn path_change_every_frame_yields_singles() {
        let ranges = compress(&entries(&[(1, "A"), (2, "B"), (3, "A")]));
        assert_eq!(ranges.len(), 3);
        assert!(ranges.iter().all(FrameRange::is_single_frame));
    }

    #[test]
    fn duplicate_frame_same_path_splits_run() {
        // 5 repeats: not end+1, so the run closes even though the frame
        // is "inside" the previous span.
        let ranges = compress(&entries(&[(4, "P"), (5, "P"), (5, "P"), (6, "P")]));
        assert_eq!(
            ranges,
            vec![FrameRange::new("P", 4, 5), FrameRange::new("P", 5, 6)]
        );
    }

    #[test]
    fn no_backward_merge_across_interleaved_path() {
        // After B interrupts, A's 3 cannot rejoin the closed (A,1,2) run
        // even though it is contiguous with it.
        let ranges = compress(&entries(&[(1, "A"), (2, "A"), (2, "B"), (3, "A")]));
        assert_eq!(
            ranges,
            vec![
                FrameRange::new("A", 1, 2),
                FrameRange::new("B", 2, 2),
                FrameRange::new("A", 3, 3),
            ]
        );
    }

    #[test]
    fn ranges_for_one_path_never_overlap_when_input_is_strictly_increasing() {
        let ranges = compress(&entries(&[
            (1, "P"),
            (2, "P"),
            (4, "P"),
            (5, "P"),
            (9, "P"),
        ]));
        for pair in ranges.windows(2) {
            assert!(pair[1].start > pair[0].end + 1);
        }
    }

    #[test]
    fn label_rendering() {
        assert_eq!(FrameRange::new("P", 3, 9).label(), "3-9");
        assert_eq!(FrameRange::new("P", 42, 42).label(), "42");
    }
}
