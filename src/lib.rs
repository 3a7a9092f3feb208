//! Conform: reconcile color-grading frame records against facility
//! storage and source media.
//!
//! The library side of the binary: configuration, the batch processor
//! that drives a run end to end, report writers, and the shot upload
//! client. The algorithmic core lives in `conform-reconcile`; parsing in
//! `conform-parser`; external tools in `conform-av`; persistence in
//! `conform-db`.

pub mod config;
pub mod processor;
pub mod report;
pub mod upload;
