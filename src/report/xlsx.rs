//! XLSX renderings of run output.
//!
//! Layout is fixed: a "Frame Ranges" sheet with an embedded thumbnail per
//! matching range, and an "Unused Frames" sheet mirroring the CSV.

use std::path::Path;

use anyhow::{Context, Result};
use conform_common::timecode::frame_to_timecode;
use conform_reconcile::LedgerEntry;
use rust_xlsxwriter::{Image, Url, Workbook};

use crate::processor::ProcessedShot;

/// Write the matching ranges with thumbnails (and upload URLs when the
/// run uploaded).
pub fn write_ranges_xlsx(path: &Path, shots: &[ProcessedShot], with_links: bool) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Frame Ranges")?;

    let mut headers = vec![
        "Path",
        "Frame Range",
        "Start Timecode",
        "End Timecode",
        "Mid Timecode",
        "Thumbnail",
    ];
    if with_links {
        headers.push("Upload URL");
    }
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (index, shot) in shots.iter().enumerate() {
        let row = (index + 1) as u32;
        let range = &shot.matched.range;

        worksheet.write_string(row, 0, range.path.as_str())?;
        worksheet.write_string(row, 1, range.label())?;
        worksheet.write_string(row, 2, shot.matched.start_tc.as_str())?;
        worksheet.write_string(row, 3, shot.matched.end_tc.as_str())?;
        worksheet.write_string(row, 4, shot.matched.mid_tc.as_str())?;

        if let Some(thumbnail) = &shot.thumbnail {
            match Image::new(thumbnail) {
                Ok(image) => {
                    worksheet.insert_image(row, 5, &image)?;
                }
                Err(e) => tracing::warn!(
                    thumbnail = %thumbnail.display(),
                    "could not embed thumbnail: {e}"
                ),
            }
        }

        if with_links {
            if let Some(url) = &shot.upload_url {
                worksheet.write_url(row, 6, Url::new(url))?;
            }
        }

        // Tall rows so the embedded thumbnails stay visible.
        worksheet.set_row_height(row, 80)?;
    }

    worksheet.set_column_width(0, 40)?;
    worksheet.set_column_width(1, 15)?;
    for col in 2..=5u16 {
        worksheet.set_column_width(col, 15)?;
    }
    if with_links {
        worksheet.set_column_width(6, 30)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to save {path:?}"))?;
    Ok(())
}

/// Write the uncovered ledger frames.
pub fn write_unused_xlsx(path: &Path, unused: &[LedgerEntry], fps: f64) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Unused Frames")?;

    worksheet.write_string(0, 0, "Frame")?;
    worksheet.write_string(0, 1, "Path")?;
    worksheet.write_string(0, 2, "Timecode")?;

    for (index, entry) in unused.iter().enumerate() {
        let row = (index + 1) as u32;
        worksheet.write_number(row, 0, entry.frame as f64)?;
        worksheet.write_string(row, 1, entry.path.as_str())?;
        worksheet.write_string(row, 2, frame_to_timecode(entry.frame, fps))?;
    }

    worksheet.set_column_width(0, 10)?;
    worksheet.set_column_width(1, 40)?;
    worksheet.set_column_width(2, 15)?;

    workbook
        .save(path)
        .with_context(|| format!("failed to save {path:?}"))?;
    Ok(())
}
