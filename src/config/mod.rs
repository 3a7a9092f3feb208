mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {path:?}"))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {path:?}"))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return the defaults.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./conform.toml",
        "~/.config/conform/config.toml",
        "/etc/conform/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Reject configurations a run cannot work with.
fn validate_config(config: &Config) -> Result<()> {
    if config.video.fps <= 0.0 {
        anyhow::bail!("video.fps must be positive, got {}", config.video.fps);
    }

    if config.vimeo.enabled && config.vimeo.access_token.is_empty() {
        anyhow::bail!("vimeo uploads are enabled but no access token is configured");
    }

    if let Some(ref map_file) = config.locations.map_file {
        if !map_file.exists() {
            tracing::warn!("configured location map does not exist: {map_file:?}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.video.fps, 24.0);
        assert!(config.database.enabled);
        assert_eq!(config.locations.anchor, "dogman");
        assert!(!config.vimeo.enabled);
    }

    #[test]
    fn parses_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[video]\nfps = 29.97\n\n[locations]\nanchor = \"showname\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.video.fps, 29.97);
        assert_eq!(config.locations.anchor, "showname");
        // Unspecified sections keep their defaults.
        assert!(config.database.enabled);
    }

    #[test]
    fn rejects_nonpositive_fps() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[video]\nfps = 0.0").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn rejects_upload_without_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[vimeo]\nenabled = true").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn rejects_unknown_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[not_a_section]\nfoo = 1").unwrap();
        assert!(load_config(file.path()).is_err());
    }
}
