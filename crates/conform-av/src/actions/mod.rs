//! ffmpeg extraction actions for matched ranges.

mod clip;
mod stills;

pub use clip::extract_clip;
pub use stills::{extract_thumbnail, grab_frame, THUMBNAIL_SIZE};
