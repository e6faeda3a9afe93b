use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tracing::info;

use crate::codec::ArchiveCodec;
use crate::params::SyncParams;
use crate::paths;
use crate::preset::GlobalPreset;
use crate::transport::ArchiveTransport;

/// Errors that can occur while syncing a shared backup archive.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("backup sync cannot run: backupSyncLocation has not been defined")]
    MissingLocation,

    #[error("network error: {0}")]
    Network(String),

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Downloads the shared backup archive once and fans out per-database
/// and per-node extractions into the deployment target.
///
/// A target directory that already exists is skipped entirely; existence
/// is the idempotence key, its contents are not inspected.
pub struct SyncService {
    params: SyncParams,
}

impl SyncService {
    pub fn new(params: SyncParams) -> Self {
        Self { params }
    }

    pub async fn run(
        &self,
        preset: &GlobalPreset,
        transport: &dyn ArchiveTransport,
        codec: &dyn ArchiveCodec,
    ) -> Result<(), SyncError> {
        let location = preset
            .backup_sync_location
            .as_deref()
            .ok_or(SyncError::MissingLocation)?;

        let staging = paths::staging_folder(&self.params.target);
        tokio::fs::create_dir_all(&staging)
            .await
            .map_err(|e| SyncError::Io(format!("failed to create {}: {e}", staging.display())))?;
        info!("staging directory {} ready", staging.display());

        let cache = staging.join(preset.local_cache_file_name());
        transport.fetch(location, &cache).await?;

        try_join_all(preset.databases.iter().map(|database| {
            let destination = paths::database_data_folder(&self.params.target, &database.name);
            extract_into(codec, &cache, "mongo", destination)
        }))
        .await?;

        try_join_all(preset.nodes.iter().map(|node| {
            let destination = paths::node_data_folder(&self.params.target, &node.name);
            extract_into(codec, &cache, "data", destination)
        }))
        .await?;

        Ok(())
    }
}

/// Populate one target directory from a top-level folder of the cached
/// archive, unless the directory already exists.
async fn extract_into(
    codec: &dyn ArchiveCodec,
    archive: &Path,
    folder: &str,
    destination: PathBuf,
) -> Result<(), SyncError> {
    if destination.exists() {
        info!("{} exists, backup sync skipped", destination.display());
        return Ok(());
    }

    // Clear any stale partial directory before recreating it empty.
    match tokio::fs::remove_dir_all(&destination).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(SyncError::Io(format!(
                "failed to clear {}: {e}",
                destination.display()
            )));
        }
    }
    tokio::fs::create_dir_all(&destination)
        .await
        .map_err(|e| SyncError::Io(format!("failed to create {}: {e}", destination.display())))?;

    info!("unzipping backup's {folder} into {}", destination.display());
    codec.extract_folder(archive, folder, &destination).await?;
    info!("unzipped {} created", destination.display());
    Ok(())
}
