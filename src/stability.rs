use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    header::ACCEPT,
    multipart::{Form, Part},
    Client, StatusCode,
};
use thiserror::Error;
use tracing::{error, info};

/// Time budget for a single generation call. The upstream API can take tens
/// of seconds to render; past this the call is surfaced as a 408.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_API_BASE: &str = "https://api.stability.ai";

#[derive(Debug, Error)]
pub enum StabilityError {
    #[error("stability api returned {status}")]
    Status { status: StatusCode, body: String },
    #[error("request to stability api timed out")]
    Timeout,
    #[error("failed to connect to stability api: {0}")]
    Connect(String),
    #[error("stability api request failed: {0}")]
    Transport(String),
}

fn classify(err: reqwest::Error) -> StabilityError {
    if err.is_timeout() {
        StabilityError::Timeout
    } else if err.is_connect() {
        StabilityError::Connect(err.to_string())
    } else {
        StabilityError::Transport(err.to_string())
    }
}

/// Seam between the request handler and the outbound generation call, so
/// tests can substitute a stub collaborator.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<Bytes, StabilityError>;
}

pub struct StabilityClient {
    client: Client,
    base_url: String,
}

impl StabilityClient {
    pub fn new() -> Self {
        let base_url =
            std::env::var("STABILITY_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        // Client construction only fails on malformed TLS/system config.
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, base_url }
    }
}

impl Default for StabilityClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageBackend for StabilityClient {
    /// Issues exactly one multipart POST to the Stable Diffusion endpoint and
    /// returns the raw JPEG bytes. Never retried; the caller maps failures.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<Bytes, StabilityError> {
        let url = format!("{}/v2beta/stable-image/generate/sd3", self.base_url);
        let form = Form::new()
            .part("prompt", Part::text(prompt.to_string()))
            .part("output_format", Part::text("jpeg"));

        info!(%url, "🔗 Calling Stability API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header(ACCEPT, "image/*")
            .multipart(form)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await.map_err(classify)?;
            info!(size = bytes.len(), "✅ Wallpaper generated");
            Ok(bytes)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "❌ Stability API rejected the request");
            Err(StabilityError::Status { status, body })
        }
    }
}
