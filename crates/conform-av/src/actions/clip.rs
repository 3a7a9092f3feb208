//! Shot clip extraction for matched ranges.

use std::path::Path;

use conform_common::Result;

use crate::command::ToolCommand;

/// Re-encode the span starting at `start_secs` for `duration_secs` into an
/// H.264/AAC clip at `out`.
///
/// Settings match what the review platform expects: `libx264` medium
/// preset at CRF 22, AAC audio at 128k.
pub async fn extract_clip(
    ffmpeg: &Path,
    video: &Path,
    start_secs: f64,
    duration_secs: f64,
    out: &Path,
) -> Result<()> {
    ToolCommand::new(ffmpeg)
        .args(["-y", "-ss"])
        .arg(start_secs.to_string())
        .arg("-i")
        .arg(video.to_string_lossy())
        .arg("-t")
        .arg(duration_secs.to_string())
        .args(["-c:v", "libx264", "-preset", "medium", "-crf", "22"])
        .args(["-c:a", "aac", "-b:a", "128k"])
        .arg(out.to_string_lossy())
        .run()
        .await?;
    Ok(())
}
