//! Unified error type for the conform crates.
//!
//! All library crates funnel their failures into [`Error`]. The core
//! reconciliation stages never fail; everything here belongs to the I/O
//! boundaries (external tools, database, reports, upload).

/// Unified error type covering all failure modes in conform.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An external tool (ffmpeg, ffprobe) failed or is missing.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// Media inspection failed.
    #[error("Probe error: {0}")]
    Probe(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A report could not be written.
    #[error("Report error: {0}")]
    Report(String),

    /// A shot upload failed.
    #[error("Upload error: {0}")]
    Upload(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Probe`].
    pub fn probe(msg: impl Into<String>) -> Self {
        Error::Probe(msg.into())
    }

    /// Convenience constructor for [`Error::Database`].
    pub fn database(msg: impl Into<String>) -> Self {
        Error::Database(msg.into())
    }

    /// Convenience constructor for [`Error::Report`].
    pub fn report(msg: impl Into<String>) -> Self {
        Error::Report(msg.into())
    }

    /// Convenience constructor for [`Error::Upload`].
    pub fn upload(msg: impl Into<String>) -> Self {
        Error::Upload(msg.into())
    }

    /// Convenience constructor for [`Error::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
