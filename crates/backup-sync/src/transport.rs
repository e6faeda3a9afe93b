use std::path::Path;

use crate::sync::SyncError;

/// Fetches a remote archive into a local file.
///
/// Implementations are expected to be idempotent with respect to the
/// destination: when a local copy is already present it is reused as-is,
/// without re-verification.
#[async_trait::async_trait]
pub trait ArchiveTransport: Send + Sync {
    /// Fetch `location` (URL or local path) into `destination`.
    async fn fetch(&self, location: &str, destination: &Path) -> Result<(), SyncError>;
}
