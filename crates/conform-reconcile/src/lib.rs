//! # conform-reconcile
//!
//! The reconciliation core: a pure, synchronous pipeline from resolved
//! per-frame records to classified frame ranges.
//!
//! Data flows one direction:
//!
//! ```text
//! resolved records -> FrameLedger -> compress -> classify -> unused_frames
//! ```
//!
//! Every stage is a plain function over owned in-memory data; all I/O
//! (reading exports, probing video, persistence) happens in other crates
//! before or after this one runs.
//!
//! ```
//! use conform_reconcile::{compress, classify, FrameLedger, LedgerEntry};
//!
//! let entries = vec![
//!     LedgerEntry::new(1, "/san/partA"),
//!     LedgerEntry::new(2, "/san/partA"),
//!     LedgerEntry::new(3, "/san/partA"),
//!     LedgerEntry::new(10, "/san/partA"),
//! ];
//! let ledger = FrameLedger::from_entries(entries);
//! let ranges = compress(ledger.entries());
//! assert_eq!(ranges.len(), 2);
//!
//! let classified = classify(ranges, 5, 24.0);
//! assert_eq!(classified.matching.len(), 1);
//! assert_eq!(classified.degenerate.len(), 1);
//! ```

pub mod classify;
pub mod compress;
pub mod ledger;
pub mod unused;

pub use classify::{
    classify, Classification, MatchedRange, RejectedRange, REASON_EXCEEDS_DURATION,
    REASON_SINGLE_FRAME,
};
pub use compress::{compress, FrameRange};
pub use ledger::{FrameLedger, LedgerEntry};
pub use unused::unused_frames;
