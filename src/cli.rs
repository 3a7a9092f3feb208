use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "conform")]
#[command(author, version, about = "Reconcile color-grading frame records against facility storage and source media")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a grading export and/or classify ranges against a video
    Run {
        /// Grading export file (path + frame numbers per line)
        #[arg(long)]
        baselight: Option<PathBuf>,

        /// Facility location file (comma-separated); built-in map if omitted
        #[arg(long)]
        xytech: Option<PathBuf>,

        /// Video file to probe and classify against
        #[arg(long)]
        video: Option<PathBuf>,

        /// Fallback frames per second (overrides config)
        #[arg(long)]
        fps: Option<f64>,

        /// Output directory for reports and artifacts
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write XLSX reports with embedded thumbnails
        #[arg(long)]
        xlsx: bool,

        /// Also report ledger frames not covered by any matching range
        #[arg(long)]
        unused_frames: bool,

        /// Upload extracted shot clips
        #[arg(long)]
        upload: bool,

        /// Skip all database operations
        #[arg(long)]
        no_db: bool,
    },

    /// Convert a frame number to timecode, optionally grabbing the frame
    Timecode {
        /// Frame number to convert
        frame: i64,

        /// Frames per second (overrides config)
        #[arg(long)]
        fps: Option<f64>,

        /// Video to grab the frame from
        #[arg(long)]
        video: Option<PathBuf>,
    },

    /// Probe a media file and display duration, rate, and frame count
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default search if not specified)
        config: Option<PathBuf>,
    },
}
