//! Video inspection via ffprobe.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format
//! -show_streams` and reduces the JSON to the three numbers the
//! reconciliation pipeline needs: duration, frame rate, and the derived
//! total frame count.

use std::path::{Path, PathBuf};

use conform_common::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::command::ToolCommand;

/// The video context a conform run classifies against.
#[derive(Debug, Clone, Serialize)]
pub struct VideoInfo {
    /// Inspected file.
    pub path: PathBuf,
    /// Container duration in seconds.
    pub duration_secs: f64,
    /// Frame rate of the first video stream, or the fallback rate.
    pub fps: f64,
    /// `floor(duration * fps)`, the inclusive upper bound on valid
    /// frame numbers.
    pub total_frames: i64,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    r_frame_rate: Option<String>,
}

/// Inspect a video file.
///
/// `fallback_fps` is used when no video stream advertises a usable
/// `r_frame_rate` (the configured project rate, typically 24).
pub async fn probe_video(ffprobe: &Path, video: &Path, fallback_fps: f64) -> Result<VideoInfo> {
    let output = ToolCommand::new(ffprobe)
        .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
        .arg(video.to_string_lossy())
        .run()
        .await?;

    if output.stdout.trim().is_empty() {
        return Err(Error::probe(format!(
            "ffprobe produced no output for {}",
            video.display()
        )));
    }

    let parsed: ProbeOutput = serde_json::from_str(&output.stdout)
        .map_err(|e| Error::probe(format!("ffprobe JSON parse error: {e}")))?;

    Ok(reduce_probe_output(video, parsed, fallback_fps))
}

fn reduce_probe_output(video: &Path, output: ProbeOutput, fallback_fps: f64) -> VideoInfo {
    let duration_secs = output
        .format
        .duration
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    let fps = output
        .streams
        .iter()
        .filter(|s| s.codec_type.as_deref() == Some("video"))
        .find_map(|s| s.r_frame_rate.as_deref().and_then(parse_frame_rate))
        .unwrap_or(fallback_fps);

    VideoInfo {
        path: video.to_path_buf(),
        duration_secs,
        fps,
        total_frames: (duration_secs * fps) as i64,
    }
}

/// Parse ffprobe's `num/den` rational frame rate.
fn parse_frame_rate(rate: &str) -> Option<f64> {
    let (num, den) = rate.split_once('/')?;
    let num: i64 = num.parse().ok()?;
    let den: i64 = den.parse().ok()?;
    if den > 0 {
        Some(num as f64 / den as f64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_rate_fractions() {
        assert_eq!(parse_frame_rate("24/1"), Some(24.0));
        assert!((parse_frame_rate("24000/1001").unwrap() - 23.976).abs() < 0.001);
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("25"), None);
        assert_eq!(parse_frame_rate("abc/def"), None);
    }

    #[test]
    fn reduces_duration_and_stream_rate() {
        let json = r#"{
            "format": { "duration": "300.5" },
            "streams": [
                { "codec_type": "audio", "r_frame_rate": "0/0" },
                { "codec_type": "video", "r_frame_rate": "24/1" }
            ]
        }"#;
        let parsed: ProbeOutput = serde_json::from_str(json).unwrap();
        let info = reduce_probe_output(Path::new("/v.mp4"), parsed, 30.0);
        assert_eq!(info.duration_secs, 300.5);
        assert_eq!(info.fps, 24.0);
        assert_eq!(info.total_frames, 7212);
    }

    #[test]
    fn falls_back_to_configured_rate() {
        let json = r#"{ "format": {}, "streams": [ { "codec_type": "video" } ] }"#;
        let parsed: ProbeOutput = serde_json::from_str(json).unwrap();
        let info = reduce_probe_output(Path::new("/v.mp4"), parsed, 24.0);
        assert_eq!(info.fps, 24.0);
        assert_eq!(info.duration_secs, 0.0);
        assert_eq!(info.total_frames, 0);
    }

    #[test]
    fn total_frames_floors() {
        let json = r#"{
            "format": { "duration": "10.99" },
            "streams": [ { "codec_type": "video", "r_frame_rate": "24/1" } ]
        }"#;
        let parsed: ProbeOutput = serde_json::from_str(json).unwrap();
        let info = reduce_probe_output(Path::new("/v.mp4"), parsed, 24.0);
        // 10.99 * 24 = 263.76 -> 263
        assert_eq!(info.total_frames, 263);
    }
}
