//! The batch processor: drives one conform run end to end.
//!
//! Stage order is fixed: location map → export parse → resolve → persist →
//! ledger → compress → persist/CSV → (with a video) probe → classify →
//! extract artifacts → reports → unused frames → upload. Everything before
//! the probe is pure and synchronous; everything async happens at the
//! media-tool and upload boundaries.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use conform_av::{actions, probe_video, require_tool};
use conform_common::timecode::frame_to_seconds;
use conform_db::pool::{get_conn, init_pool, DbPool};
use conform_db::queries::{frame_ranges, grading_records, locations, video_files};
use conform_parser::{parse_export, resolve_records, LocationMap, ResolvedRecord};
use conform_reconcile::{
    classify, compress, unused_frames, FrameLedger, FrameRange, MatchedRange,
};

use crate::config::Config;
use crate::report;
use crate::upload::{ShotUploader, VimeoClient};

/// Flags and inputs for one `run` invocation, CLI-resolved.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Grading export file.
    pub baselight: Option<PathBuf>,
    /// Location-map file; built-in table when absent.
    pub xytech: Option<PathBuf>,
    /// Video to classify against.
    pub video: Option<PathBuf>,
    /// Fallback fps override.
    pub fps: Option<f64>,
    /// Output directory override.
    pub output: Option<PathBuf>,
    /// Write XLSX reports.
    pub xlsx: bool,
    /// Report uncovered ledger frames.
    pub unused_frames: bool,
    /// Upload extracted clips.
    pub upload: bool,
    /// Skip persistence entirely.
    pub no_db: bool,
}

/// A matching range with its extracted artifacts.
#[derive(Debug, Clone)]
pub struct ProcessedShot {
    /// The classified range.
    pub matched: MatchedRange,
    /// Mid-frame thumbnail, when extraction succeeded.
    pub thumbnail: Option<PathBuf>,
    /// Encoded clip, when extraction succeeded.
    pub clip: Option<PathBuf>,
    /// Upload URL, when the clip was uploaded.
    pub upload_url: Option<String>,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Ledger entries built from the export.
    pub frames: usize,
    /// Compressed ranges.
    pub ranges: usize,
    /// Ranges that matched the video.
    pub matching: usize,
    /// Ranges rejected as out-of-bounds or degenerate.
    pub rejected: usize,
    /// Uncovered ledger frames, when requested.
    pub unused: Option<usize>,
    /// Clips uploaded.
    pub uploaded: usize,
}

/// Execute one run.
pub async fn run(config: &Config, opts: RunOptions) -> Result<RunSummary> {
    if opts.baselight.is_none() && opts.video.is_none() {
        anyhow::bail!("nothing to do: supply a grading export (--baselight), a video (--video), or both");
    }
    for (label, path) in [
        ("grading export", opts.baselight.as_deref()),
        ("location file", opts.xytech.as_deref()),
        ("video file", opts.video.as_deref()),
    ] {
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("{label} does not exist: {path:?}");
            }
        }
    }

    let fallback_fps = opts.fps.unwrap_or(config.video.fps);
    let out_dir = output_dir(config, &opts);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory {out_dir:?}"))?;

    let pool = open_pool(config, &opts)?;

    let map = load_location_map(config, opts.xytech.as_deref())?;
    tracing::info!(entries = map.len(), anchor = map.anchor(), "location map loaded");
    if let Some(pool) = &pool {
        persist_locations(pool, &map)?;
    }

    let mut summary = RunSummary::default();

    // Export stage: parse, resolve, compress, persist.
    let mut export_output: Option<(FrameLedger, Vec<FrameRange>)> = None;
    if let Some(baselight) = &opts.baselight {
        let (ledger, ranges) = process_export(baselight, &map, pool.as_ref())?;
        summary.frames = ledger.len();
        summary.ranges = ranges.len();

        report::csv::write_ranges_csv(&out_dir.join("ranges.csv"), &ranges)?;
        tracing::info!(
            frames = ledger.len(),
            ranges = ranges.len(),
            "compressed grading export"
        );

        export_output = Some((ledger, ranges));
    }

    // Classification needs a bound; without a video the run stops at
    // compression output rather than guessing one.
    let Some(video) = &opts.video else {
        return Ok(summary);
    };

    let ffprobe = require_tool("ffprobe")?;
    let info = probe_video(&ffprobe, video, fallback_fps).await?;
    tracing::info!(
        duration_secs = info.duration_secs,
        fps = info.fps,
        total_frames = info.total_frames,
        "probed video"
    );
    println!(
        "Video: {}, Duration: {:.2}s, FPS: {}, Frames: {}",
        video.file_name().unwrap_or_default().to_string_lossy(),
        info.duration_secs,
        info.fps,
        info.total_frames
    );

    if let Some(pool) = &pool {
        let conn = get_conn(pool)?;
        video_files::insert_video_file(
            &conn,
            &video.file_name().unwrap_or_default().to_string_lossy(),
            &video.to_string_lossy(),
            info.duration_secs,
            info.fps,
            info.total_frames,
        )?;
    }

    // Ranges to classify: this run's, or previously persisted ones.
    let (ledger, ranges) = match export_output {
        Some((ledger, ranges)) => (Some(ledger), ranges),
        None => {
            let pool = pool.as_ref().context(
                "no grading export given and the database is disabled; nothing to classify",
            )?;
            let conn = get_conn(pool)?;
            let stored = frame_ranges::list_ranges(&conn)?;
            tracing::info!(ranges = stored.len(), "loaded persisted ranges");
            let ranges = stored
                .into_iter()
                .map(|r| FrameRange::new(r.path, r.start_frame, r.end_frame))
                .collect();
            (None, ranges)
        }
    };
    summary.ranges = ranges.len();

    let classified = classify(ranges, info.total_frames, info.fps);
    summary.matching = classified.matching.len();
    summary.rejected = classified.out_of_bounds.len() + classified.degenerate.len();

    let mut shots = extract_artifacts(&out_dir, video, info.fps, &classified.matching).await;

    if opts.upload && config.vimeo.enabled {
        summary.uploaded = upload_shots(config, &mut shots).await;
        report::csv::write_links_csv(&out_dir.join("upload_links.csv"), &shots)?;
    }

    report::csv::write_matching_csv(&out_dir.join("matching_ranges.csv"), &shots, opts.upload)?;
    report::csv::write_rejected_csv(
        &out_dir.join("rejected_ranges.csv"),
        &classified.out_of_bounds,
        &classified.degenerate,
    )?;
    if opts.xlsx {
        report::xlsx::write_ranges_xlsx(&out_dir.join("ranges.xlsx"), &shots, opts.upload)?;
    }

    if opts.unused_frames {
        let ledger = match ledger {
            Some(ledger) => ledger,
            None => {
                let pool = pool.as_ref().context(
                    "unused-frame report needs the grading records; database is disabled",
                )?;
                ledger_from_db(pool)?
            }
        };
        let unused = unused_frames(&ledger, &classified.matching);
        report::csv::write_unused_csv(&out_dir.join("unused_frames.csv"), &unused, info.fps)?;
        if opts.xlsx {
            report::xlsx::write_unused_xlsx(&out_dir.join("unused_frames.xlsx"), &unused, info.fps)?;
        }
        tracing::info!(unused = unused.len(), "reconciled unused frames");
        summary.unused = Some(unused.len());
    }

    Ok(summary)
}

/// Resolve the directory reports and artifacts land in.
fn output_dir(config: &Config, opts: &RunOptions) -> PathBuf {
    if let Some(dir) = &opts.output {
        return dir.clone();
    }
    if let Some(dir) = &config.output.dir {
        return dir.clone();
    }
    match &opts.video {
        Some(video) => {
            let stem = video
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "video".to_string());
            PathBuf::from(format!("{stem}_processed"))
        }
        None => PathBuf::from("."),
    }
}

fn open_pool(config: &Config, opts: &RunOptions) -> Result<Option<DbPool>> {
    if opts.no_db || !config.database.enabled {
        return Ok(None);
    }
    let path = config.database.path.to_string_lossy();
    tracing::info!(db = %path, "opening run database");
    Ok(Some(init_pool(&path)?))
}

fn load_location_map(config: &Config, xytech: Option<&Path>) -> Result<LocationMap> {
    match xytech {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open location file {path:?}"))?;
            Ok(LocationMap::from_reader(
                &config.locations.anchor,
                BufReader::new(file),
            )?)
        }
        None => match &config.locations.map_file {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open location map {path:?}"))?;
                Ok(LocationMap::from_reader(
                    &config.locations.anchor,
                    BufReader::new(file),
                )?)
            }
            None => Ok(LocationMap::builtin()),
        },
    }
}

fn persist_locations(pool: &DbPool, map: &LocationMap) -> Result<()> {
    let conn = get_conn(pool)?;
    for entry in map.entries() {
        locations::insert_location(
            &conn,
            &entry.relative_key,
            &entry.canonical_path,
            entry.work_order.as_deref(),
        )?;
    }
    Ok(())
}

fn process_export(
    baselight: &Path,
    map: &LocationMap,
    pool: Option<&DbPool>,
) -> Result<(FrameLedger, Vec<FrameRange>)> {
    let file = File::open(baselight)
        .with_context(|| format!("failed to open grading export {baselight:?}"))?;
    let records = parse_export(BufReader::new(file))?;
    let resolved = resolve_records(map, records);

    for record in resolved.iter().filter(|r| r.frames.is_empty()) {
        tracing::warn!(path = %record.original_path, "export record had no valid frames");
    }

    if let Some(pool) = pool {
        let conn = get_conn(pool)?;
        for record in resolved.iter().filter(|r| !r.frames.is_empty()) {
            grading_records::insert_record(
                &conn,
                &record.original_path,
                &record.mapped_path,
                record.matched_location.as_deref(),
                &record.frames,
            )?;
        }
    }

    let ledger = FrameLedger::from_records(&resolved);
    let ranges = compress(ledger.entries());

    if let Some(pool) = pool {
        let conn = get_conn(pool)?;
        for range in &ranges {
            frame_ranges::insert_range(&conn, &range.path, range.start, range.end)?;
        }
    }

    Ok((ledger, ranges))
}

/// Rebuild the ledger from persisted grading records.
fn ledger_from_db(pool: &DbPool) -> Result<FrameLedger> {
    let conn = get_conn(pool)?;
    let records: Vec<ResolvedRecord> = grading_records::list_records(&conn)?
        .into_iter()
        .map(|r| ResolvedRecord {
            original_path: r.original_path,
            mapped_path: r.mapped_path,
            matched_location: r.matched_location,
            frames: r.frames,
        })
        .collect();
    Ok(FrameLedger::from_records(&records))
}

/// Extract a thumbnail and clip per matching range. Failures degrade to
/// warnings; the shot keeps `None` for whatever could not be produced.
async fn extract_artifacts(
    out_dir: &Path,
    video: &Path,
    fps: f64,
    matching: &[MatchedRange],
) -> Vec<ProcessedShot> {
    let mut shots: Vec<ProcessedShot> = matching
        .iter()
        .map(|matched| ProcessedShot {
            matched: matched.clone(),
            thumbnail: None,
            clip: None,
            upload_url: None,
        })
        .collect();

    if shots.is_empty() {
        return shots;
    }

    let ffmpeg = match require_tool("ffmpeg") {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("skipping artifact extraction: {e}");
            return shots;
        }
    };

    let thumbnails_dir = out_dir.join("thumbnails");
    let shots_dir = out_dir.join("shots");
    for dir in [&thumbnails_dir, &shots_dir] {
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!("skipping artifact extraction: cannot create {dir:?}: {e}");
            return shots;
        }
    }

    for shot in &mut shots {
        let range = &shot.matched.range;
        let thumbnail = thumbnails_dir.join(format!("range_{}_{}.jpg", range.start, range.end));
        match actions::extract_thumbnail(
            &ffmpeg,
            video,
            frame_to_seconds(shot.matched.mid_frame, fps),
            &thumbnail,
        )
        .await
        {
            Ok(()) => shot.thumbnail = Some(thumbnail),
            Err(e) => tracing::warn!(range = %range.label(), "thumbnail extraction failed: {e}"),
        }

        let clip = shots_dir.join(format!("shot_{}_{}.mp4", range.start, range.end));
        let clip_len = frame_to_seconds(range.end - range.start + 1, fps);
        match actions::extract_clip(
            &ffmpeg,
            video,
            frame_to_seconds(range.start, fps),
            clip_len,
            &clip,
        )
        .await
        {
            Ok(()) => shot.clip = Some(clip),
            Err(e) => tracing::warn!(range = %range.label(), "clip extraction failed: {e}"),
        }
    }

    shots
}

/// Upload every extracted clip, annotating shots with their URLs.
async fn upload_shots(config: &Config, shots: &mut [ProcessedShot]) -> usize {
    let client = VimeoClient::new(&config.vimeo);
    let mut uploaded = 0;

    for (index, shot) in shots.iter_mut().enumerate() {
        let Some(clip) = shot.clip.clone() else {
            continue;
        };
        let range = &shot.matched.range;
        let shot_name = Path::new(&range.path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| range.path.clone());
        let title = format!("Shot {}: {} - {}", index + 1, shot_name, range.label());
        let description = format!(
            "Path: {}\nRange: {}\nTC: {} to {}",
            range.path,
            range.label(),
            shot.matched.start_tc,
            shot.matched.end_tc
        );

        match client.upload(&clip, &title, &description).await {
            Ok(url) => {
                tracing::info!(%url, "uploaded shot");
                shot.upload_url = Some(url);
                uploaded += 1;
            }
            Err(e) => tracing::warn!(clip = %clip.display(), "upload failed: {e}"),
        }
    }

    uploaded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_prefers_explicit_flag() {
        let config = Config::default();
        let opts = RunOptions {
            output: Some(PathBuf::from("/tmp/reports")),
            video: Some(PathBuf::from("/media/plate.mp4")),
            ..Default::default()
        };
        assert_eq!(output_dir(&config, &opts), PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn output_dir_derives_from_video_stem() {
        let config = Config::default();
        let opts = RunOptions {
            video: Some(PathBuf::from("/media/plate.mp4")),
            ..Default::default()
        };
        assert_eq!(output_dir(&config, &opts), PathBuf::from("plate_processed"));
    }

    #[test]
    fn output_dir_defaults_to_cwd_without_video() {
        let config = Config::default();
        let opts = RunOptions::default();
        assert_eq!(output_dir(&config, &opts), PathBuf::from("."));
    }
}
