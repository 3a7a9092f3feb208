//! CSV renderings of run output.

use std::path::Path;

use anyhow::{Context, Result};
use conform_common::timecode::frame_to_timecode;
use conform_reconcile::{FrameRange, LedgerEntry, RejectedRange};

use crate::processor::ProcessedShot;

/// Write every compressed range: `Path,Frames`.
pub fn write_ranges_csv(path: &Path, ranges: &[FrameRange]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {path:?}"))?;
    writer.write_record(["Path", "Frames"])?;
    for range in ranges {
        writer.write_record([range.path.as_str(), range.label().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write matching ranges with their timecodes, and upload URLs when the
/// run uploaded.
pub fn write_matching_csv(path: &Path, shots: &[ProcessedShot], with_links: bool) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {path:?}"))?;

    let mut headers = vec!["Path", "Frames", "Start Timecode", "End Timecode", "Mid Timecode"];
    if with_links {
        headers.push("Upload URL");
    }
    writer.write_record(&headers)?;

    for shot in shots {
        let range = &shot.matched.range;
        let mut row = vec![
            range.path.clone(),
            range.label(),
            shot.matched.start_tc.clone(),
            shot.matched.end_tc.clone(),
            shot.matched.mid_tc.clone(),
        ];
        if with_links {
            row.push(shot.upload_url.clone().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the rejected partitions: `Type,Path,Frame/Range,Reason`.
pub fn write_rejected_csv(
    path: &Path,
    out_of_bounds: &[RejectedRange],
    degenerate: &[RejectedRange],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {path:?}"))?;
    writer.write_record(["Type", "Path", "Frame/Range", "Reason"])?;
    for rejected in out_of_bounds {
        writer.write_record([
            "Range",
            rejected.range.path.as_str(),
            rejected.range.label().as_str(),
            rejected.reason,
        ])?;
    }
    for rejected in degenerate {
        writer.write_record([
            "Single Frame",
            rejected.range.path.as_str(),
            rejected.range.label().as_str(),
            rejected.reason,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write uncovered ledger frames: `Frame,Path,Timecode`.
pub fn write_unused_csv(path: &Path, unused: &[LedgerEntry], fps: f64) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {path:?}"))?;
    writer.write_record(["Frame", "Path", "Timecode"])?;
    for entry in unused {
        writer.write_record([
            entry.frame.to_string().as_str(),
            entry.path.as_str(),
            frame_to_timecode(entry.frame, fps).as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write upload results: `Path,Range,URL`. Shots that never uploaded are
/// omitted.
pub fn write_links_csv(path: &Path, shots: &[ProcessedShot]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {path:?}"))?;
    writer.write_record(["Path", "Range", "URL"])?;
    for shot in shots {
        if let Some(url) = &shot.upload_url {
            writer.write_record([
                shot.matched.range.path.as_str(),
                shot.matched.range.label().as_str(),
                url.as_str(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
