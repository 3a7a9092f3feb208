//! Report writers for the terminal outputs of a run.
//!
//! The core has no opinion on representation; these modules render its
//! range partitions and unused-frame list to fixed-layout CSV and XLSX
//! files.

pub mod csv;
pub mod xlsx;
