//! Detection of the external tools a conform run depends on.

use std::path::PathBuf;
use std::process::Command;

use conform_common::{Error, Result};

/// Availability report for one external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Tool name as looked up on PATH.
    pub name: String,
    /// Whether the tool responded to a version query.
    pub available: bool,
    /// First line of its version output, when available.
    pub version: Option<String>,
    /// Resolved executable path, when available.
    pub path: Option<PathBuf>,
}

/// Query one tool with `-version` (the ffmpeg family's flag).
pub fn check_tool(name: &str) -> ToolInfo {
    let result = Command::new(name).arg("-version").output();

    match result {
        Ok(output) if output.status.success() => ToolInfo {
            name: name.to_string(),
            available: true,
            version: String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(str::to_string),
            path: which::which(name).ok(),
        },
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check every tool conform shells out to.
pub fn check_tools() -> Vec<ToolInfo> {
    vec![check_tool("ffmpeg"), check_tool("ffprobe")]
}

/// Resolve a required tool to its executable path, or fail.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool(name, "not found on PATH"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_reports_unavailable() {
        let info = check_tool("conform_no_such_tool_9f2a");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert!(info.path.is_none());
    }

    #[test]
    fn require_unknown_tool_errors() {
        assert!(require_tool("conform_no_such_tool_9f2a").is_err());
    }
}
