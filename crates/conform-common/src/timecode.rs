//! Frame-number to timecode conversion.
//!
//! Non-drop-frame only: `HH:MM:SS:FF` with every field zero-padded to two
//! digits. No bounds checking is performed; negative or absurdly large
//! frame numbers produce arithmetically consistent but meaningless output,
//! and validating the frame against the video is the caller's job.

/// Convert a frame number at the given rate to an `HH:MM:SS:FF` timecode.
///
/// # Examples
///
/// ```
/// use conform_common::timecode::frame_to_timecode;
///
/// assert_eq!(frame_to_timecode(0, 24.0), "00:00:00:00");
/// assert_eq!(frame_to_timecode(1439, 24.0), "00:00:59:23");
/// assert_eq!(frame_to_timecode(86400, 24.0), "01:00:00:00");
/// ```
pub fn frame_to_timecode(frame: i64, fps: f64) -> String {
    let mut total_seconds = (frame as f64 / fps).floor();
    let frames = (frame as f64 % fps) as i64;
    let hours = (total_seconds / 3600.0) as i64;
    total_seconds %= 3600.0;
    let minutes = (total_seconds / 60.0) as i64;
    let seconds = (total_seconds % 60.0) as i64;
    format!("{hours:02}:{minutes:02}:{seconds:02}:{frames:02}")
}

/// Convert a frame number at the given rate to elapsed seconds.
pub fn frame_to_seconds(frame: i64, fps: f64) -> f64 {
    frame as f64 / fps
}
