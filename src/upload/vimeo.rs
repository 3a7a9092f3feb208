//! Vimeo upload client (tus flow).
//!
//! Three requests per shot: create the video with the clip's size, PATCH
//! the bytes to the returned upload link, then PATCH the metadata onto
//! the video URI.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::VimeoConfig;
use crate::upload::ShotUploader;

const API_BASE: &str = "https://api.vimeo.com";
const ACCEPT_HEADER: &str = "application/vnd.vimeo.*+json;version=3.4";

/// Connection timeout for API requests. Clip body uploads get a longer
/// per-request budget.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Vimeo API client authenticated with a bearer token.
pub struct VimeoClient {
    client: Client,
    access_token: String,
}

#[derive(Serialize)]
struct CreateVideoRequest<'a> {
    upload: UploadSpec,
    name: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct UploadSpec {
    approach: &'static str,
    size: u64,
}

#[derive(Deserialize)]
struct CreateVideoResponse {
    uri: String,
    link: Option<String>,
    upload: UploadLink,
}

#[derive(Deserialize)]
struct UploadLink {
    upload_link: String,
}

impl VimeoClient {
    /// Build a client from configured credentials.
    pub fn new(config: &VimeoConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECTION_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("failed to build HTTP client with timeout: {e}");
                Client::new()
            });

        Self {
            client,
            access_token: config.access_token.clone(),
        }
    }

    async fn create_video(&self, size: u64, title: &str, description: &str) -> Result<CreateVideoResponse> {
        let body = CreateVideoRequest {
            upload: UploadSpec {
                approach: "tus",
                size,
            },
            name: title,
            description,
        };

        let response = self
            .client
            .post(format!("{API_BASE}/me/videos"))
            .bearer_auth(&self.access_token)
            .header("Accept", ACCEPT_HEADER)
            .json(&body)
            .send()
            .await
            .context("failed to create video")?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            anyhow::bail!("video creation failed ({status}): {error}");
        }

        response
            .json::<CreateVideoResponse>()
            .await
            .context("unexpected video creation response")
    }

    async fn upload_bytes(&self, upload_link: &str, bytes: Vec<u8>) -> Result<()> {
        let response = self
            .client
            .patch(upload_link)
            .timeout(UPLOAD_TIMEOUT)
            .header("Tus-Resumable", "1.0.0")
            .header("Upload-Offset", "0")
            .header("Content-Type", "application/offset+octet-stream")
            .body(bytes)
            .send()
            .await
            .context("failed to upload clip bytes")?;

        if !response.status().is_success() {
            anyhow::bail!("clip upload failed ({})", response.status());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ShotUploader for VimeoClient {
    async fn upload(&self, file: &Path, title: &str, description: &str) -> Result<String> {
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("failed to read clip {file:?}"))?;

        let created = self
            .create_video(bytes.len() as u64, title, description)
            .await?;
        self.upload_bytes(&created.upload.upload_link, bytes).await?;

        Ok(created
            .link
            .unwrap_or_else(|| format!("https://vimeo.com{}", created.uri)))
    }
}
