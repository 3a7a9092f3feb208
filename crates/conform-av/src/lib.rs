//! # conform-av
//!
//! Everything that shells out to external media tools:
//!
//! - `command`: an async tool invocation builder with a timeout
//! - `tools`: detection of ffmpeg/ffprobe on the system
//! - `probe`: ffprobe-backed video inspection (duration, fps, frame count)
//! - `actions`: ffmpeg extraction of thumbnails, frame grabs, and clips
//!
//! All of this runs strictly before or after the reconciliation core;
//! nothing here is invoked mid-pipeline.

pub mod actions;
pub mod command;
pub mod probe;
pub mod tools;

pub use command::{ToolCommand, ToolOutput};
pub use probe::{probe_video, VideoInfo};
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
