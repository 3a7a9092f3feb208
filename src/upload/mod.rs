//! Shot upload boundary.
//!
//! The processor only knows the [`ShotUploader`] trait; the Vimeo client
//! is the one implementation shipped.

mod vimeo;

pub use vimeo::VimeoClient;

use std::path::Path;

use anyhow::Result;

/// Uploads one extracted shot clip and returns its public URL.
#[async_trait::async_trait]
pub trait ShotUploader: Send + Sync {
    /// Upload `file`, annotating it with a title and description.
    async fn upload(&self, file: &Path, title: &str, description: &str) -> Result<String>;
}
