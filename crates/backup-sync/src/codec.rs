use std::path::{Path, PathBuf};

use crate::bundle::BundleError;
use crate::filter::EntryFilter;
use crate::sync::SyncError;

/// A directory to add to a bundle, and the top-level name its entries
/// take inside the archive.
#[derive(Debug, Clone)]
pub struct BundleSource {
    pub directory: PathBuf,
    pub archive_root: String,
}

impl BundleSource {
    pub fn new(directory: impl Into<PathBuf>, archive_root: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            archive_root: archive_root.into(),
        }
    }
}

/// Reads and writes the ZIP archives backup sync exchanges.
#[async_trait::async_trait]
pub trait ArchiveCodec: Send + Sync {
    /// Extract only the entries under the named top-level `folder` of
    /// `archive` into `destination`, stripping the folder prefix.
    async fn extract_folder(
        &self,
        archive: &Path,
        folder: &str,
        destination: &Path,
    ) -> Result<(), SyncError>;

    /// Create a new ZIP at `destination` from the given sources, applying
    /// `filter` to every entry. Returns the finished archive's size in
    /// bytes.
    async fn create_archive(
        &self,
        destination: &Path,
        sources: &[BundleSource],
        filter: &EntryFilter,
    ) -> Result<u64, BundleError>;
}
