mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

use conform::{config, processor};
use conform_av::actions::grab_frame;
use conform_av::{probe_video, require_tool};
use conform_common::timecode::{frame_to_seconds, frame_to_timecode};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "conform=debug,conform_parser=debug,conform_reconcile=debug,conform_av=debug,conform_db=debug".to_string()
        } else {
            "conform=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Run {
            baselight,
            xytech,
            video,
            fps,
            output,
            xlsx,
            unused_frames,
            upload,
            no_db,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let opts = processor::RunOptions {
                baselight,
                xytech,
                video,
                fps,
                output,
                xlsx,
                unused_frames,
                upload,
                no_db,
            };
            let rt = tokio::runtime::Runtime::new()?;
            let summary = rt.block_on(processor::run(&config, opts))?;

            println!(
                "Processed {} frames into {} frame ranges",
                summary.frames, summary.ranges
            );
            if summary.matching + summary.rejected > 0 {
                println!(
                    "Classified: {} matching, {} rejected",
                    summary.matching, summary.rejected
                );
            }
            if let Some(unused) = summary.unused {
                println!("Unused frames: {unused}");
            }
            if summary.uploaded > 0 {
                println!("Uploaded {} shots", summary.uploaded);
            }
            Ok(())
        }
        Commands::Timecode { frame, fps, video } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let fps = fps.unwrap_or(config.video.fps);
            timecode_command(frame, fps, video.as_deref())
        }
        Commands::Probe { file, json } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            probe_command(&file, json, config.video.fps)
        }
        Commands::CheckTools => check_tools(),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
    }
}

fn timecode_command(frame: i64, fps: f64, video: Option<&std::path::Path>) -> Result<()> {
    println!(
        "Frame {frame} at {fps} fps = {}",
        frame_to_timecode(frame, fps)
    );

    if let Some(video) = video {
        if !video.exists() {
            anyhow::bail!("video file does not exist: {video:?}");
        }
        let ffmpeg = require_tool("ffmpeg")?;
        let out_dir = std::path::Path::new("timecode_extract");
        std::fs::create_dir_all(out_dir)?;
        let out = out_dir.join(format!("frame_{frame}.jpg"));

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(grab_frame(
            &ffmpeg,
            video,
            frame_to_seconds(frame, fps),
            &out,
        ))?;
        println!("Extracted frame to {}", out.display());
    }

    Ok(())
}

fn probe_command(file: &std::path::Path, json: bool, fallback_fps: f64) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("file does not exist: {file:?}");
    }

    let ffprobe = require_tool("ffprobe")?;
    let rt = tokio::runtime::Runtime::new()?;
    let info = rt.block_on(probe_video(&ffprobe, file, fallback_fps))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("File: {}", info.path.display());
        println!("Duration: {:.2}s", info.duration_secs);
        println!("FPS: {}", info.fps);
        println!("Total frames: {}", info.total_frames);
    }

    Ok(())
}

fn check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = conform_av::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);
        if let Some(ref version) = tool.version {
            print!(" ({version})");
        }
        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }
        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Probe, extraction, and frame grabs need them.");
    }

    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {p:?}");
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Fallback fps: {}", config.video.fps);
            println!("  Database enabled: {}", config.database.enabled);
            println!("  Location anchor: {}", config.locations.anchor);
            println!("  Uploads enabled: {}", config.vimeo.enabled);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Fallback fps: {}", config.video.fps);
            println!("  Database path: {:?}", config.database.path);
        }
    }

    Ok(())
}
