//! Conform-Common: shared error types and timecode conversion.
//!
//! This crate provides the pieces every other conform crate leans on:
//!
//! - **Error Handling**: a unified error type and result alias
//! - **Timecode**: frame-number to `HH:MM:SS:FF` / seconds conversion
//!
//! # Examples
//!
//! ```
//! use conform_common::timecode::frame_to_timecode;
//! use conform_common::{Error, Result};
//!
//! assert_eq!(frame_to_timecode(86400, 24.0), "01:00:00:00");
//!
//! fn example() -> Result<()> {
//!     Err(Error::tool("ffprobe", "not found"))
//! }
//! ```

pub mod error;
pub mod timecode;

pub use error::{Error, Result};
