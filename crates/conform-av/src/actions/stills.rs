//! Single-frame extraction: range thumbnails and ad-hoc frame grabs.

use std::path::Path;

use conform_common::Result;

use crate::command::ToolCommand;

/// Thumbnail dimensions used in spreadsheet reports.
pub const THUMBNAIL_SIZE: &str = "96x74";

/// Extract a thumbnail of the frame at `seconds` into `out` (JPEG,
/// [`THUMBNAIL_SIZE`]).
pub async fn extract_thumbnail(
    ffmpeg: &Path,
    video: &Path,
    seconds: f64,
    out: &Path,
) -> Result<()> {
    ToolCommand::new(ffmpeg)
        .args(["-y", "-ss"])
        .arg(seconds.to_string())
        .arg("-i")
        .arg(video.to_string_lossy())
        .args(["-vframes", "1", "-s", THUMBNAIL_SIZE, "-q:v", "2"])
        .arg(out.to_string_lossy())
        .run()
        .await?;
    Ok(())
}

/// Extract the frame at `seconds` into `out` at source resolution.
pub async fn grab_frame(ffmpeg: &Path, video: &Path, seconds: f64, out: &Path) -> Result<()> {
    ToolCommand::new(ffmpeg)
        .args(["-y", "-ss"])
        .arg(seconds.to_string())
        .arg("-i")
        .arg(video.to_string_lossy())
        .args(["-vframes", "1", "-q:v", "2"])
        .arg(out.to_string_lossy())
        .run()
        .await?;
    Ok(())
}
