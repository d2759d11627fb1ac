use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use super::InventoryError;

/// Anything that can hand back the raw inventory payload.
pub trait InventorySource: Debug {
    fn fetch(&self) -> Result<Value, InventoryError>;
}

/// Bearer-authenticated GET against the dealer API. Owns a current-thread
/// runtime so the export stays a plain blocking call for callers.
pub struct HttpInventorySource {
    client: reqwest::Client,
    runtime: Runtime,
    url: String,
    token: String,
}

impl HttpInventorySource {
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InventoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(InventoryError::Transport)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            client,
            runtime,
            url: url.into(),
            token: token.into(),
        })
    }
}

impl Debug for HttpInventorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpInventorySource")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl InventorySource for HttpInventorySource {
    fn fetch(&self) -> Result<Value, InventoryError> {
        info!(url = %self.url, "fetching vehicle inventory");

        let body = self.runtime.block_on(async {
            let response = self
                .client
                .get(&self.url)
                .bearer_auth(&self.token)
                .header(ACCEPT, "application/json")
                .send()
                .await
                .map_err(InventoryError::Transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(InventoryError::Status {
                    status: status.as_u16(),
                    url: self.url.clone(),
                });
            }

            response.bytes().await.map_err(InventoryError::Transport)
        })?;

        debug!(bytes = body.len(), "inventory payload received");
        serde_json::from_slice(&body).map_err(InventoryError::Decode)
    }
}

/// Replays a payload previously saved from the API.
#[derive(Debug, Clone)]
pub struct FileInventorySource {
    path: PathBuf,
}

impl FileInventorySource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl InventorySource for FileInventorySource {
    fn fetch(&self) -> Result<Value, InventoryError> {
        info!(path = %self.path.display(), "reading saved inventory payload");
        let bytes = std::fs::read(&self.path)?;
        debug!(bytes = bytes.len(), "inventory payload loaded");
        serde_json::from_slice(&bytes).map_err(InventoryError::Decode)
    }
}
