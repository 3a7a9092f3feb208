//! Configuration types with serde defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `conform.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Frame-rate defaults for classification and timecode.
    #[serde(default)]
    pub video: VideoConfig,

    /// Run persistence.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Location-map source and matching anchor.
    #[serde(default)]
    pub locations: LocationsConfig,

    /// Report and artifact output.
    #[serde(default)]
    pub output: OutputConfig,

    /// Shot upload credentials.
    #[serde(default)]
    pub vimeo: VimeoConfig,
}

/// Frame-rate defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoConfig {
    /// Fallback frames per second when the probed file does not advertise
    /// a rate (and the rate for `timecode` conversions).
    #[serde(default = "default_fps")]
    pub fps: f64,
}

/// Run persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Whether runs persist to SQLite at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Database file path.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

/// Location-map settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationsConfig {
    /// Project-root directory name anchoring path resolution.
    #[serde(default = "default_anchor")]
    pub anchor: String,

    /// Location-map file; the built-in table is used when absent.
    #[serde(default)]
    pub map_file: Option<PathBuf>,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory for reports and extracted artifacts. Defaults to
    /// `<video stem>_processed` next to the working directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Upload credentials. Uploads only run when `enabled` and a token is
/// present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VimeoConfig {
    /// Master switch; `--upload` additionally gates each run.
    #[serde(default)]
    pub enabled: bool,

    /// API access token.
    #[serde(default)]
    pub access_token: String,
}

fn default_fps() -> f64 {
    24.0
}

fn default_true() -> bool {
    true
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./conform.db")
}

fn default_anchor() -> String {
    "dogman".to_string()
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_db_path(),
        }
    }
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            anchor: default_anchor(),
            map_file: None,
        }
    }
}
