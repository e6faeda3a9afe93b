use std::path::Path;

use backup_sync::{ArchiveTransport, SyncError};
use tracing::info;

/// Fetches the shared archive over HTTP, or copies it when the location
/// is a local path.
///
/// An existing destination file is reused without re-download and without
/// verification; delete the cached copy to force a fresh fetch.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ArchiveTransport for HttpTransport {
    async fn fetch(&self, location: &str, destination: &Path) -> Result<(), SyncError> {
        if destination.exists() {
            info!("{} already downloaded, reusing it", destination.display());
            return Ok(());
        }

        if !location.starts_with("http://") && !location.starts_with("https://") {
            info!("copying {location} to {}", destination.display());
            tokio::fs::copy(location, destination).await.map_err(|e| {
                SyncError::Io(format!("failed to copy {location}: {e}"))
            })?;
            return Ok(());
        }

        info!("downloading {location} to {}", destination.display());
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("download of {location} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SyncError::Network(format!(
                "download of {location} returned HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SyncError::Network(format!("failed to read body of {location}: {e}")))?;

        tokio::fs::write(destination, &bytes).await.map_err(|e| {
            SyncError::Io(format!("failed to write {}: {e}", destination.display()))
        })?;

        info!("downloaded {} bytes to {}", bytes.len(), destination.display());
        Ok(())
    }
}
