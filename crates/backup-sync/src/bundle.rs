use std::path::PathBuf;

use tracing::info;

use crate::codec::{ArchiveCodec, BundleSource};
use crate::filter::EntryFilter;
use crate::params::SyncParams;
use crate::paths;
use crate::preset::{DatabasePreset, GlobalPreset, NodePreset};

/// Errors that can occur while producing a distributable bundle.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("api node with name '{0}' has not been configured in this instance")]
    NodeNotFound(String),

    #[error("no api-capable node has been configured in this instance")]
    NoApiNode,

    #[error("database with name/host '{0}' does not exist")]
    DatabaseNotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("archive error: {0}")]
    Archive(String),
}

/// Builds the distributable ZIP for one node and its database, the
/// inverse of the sync operation.
pub struct BundleService {
    params: SyncParams,
}

impl BundleService {
    pub fn new(params: SyncParams) -> Self {
        Self { params }
    }

    /// Create a bundle for the selected node and its database. Returns
    /// the path of the finished archive.
    pub async fn create_backup(
        &self,
        preset: &GlobalPreset,
        codec: &dyn ArchiveCodec,
    ) -> Result<PathBuf, BundleError> {
        let node = self.resolve_node(preset)?;
        let database = resolve_database(preset, node)?;

        let destination = self
            .params
            .destination_file
            .clone()
            .unwrap_or_else(|| self.params.target.join("backup.zip"));

        match tokio::fs::remove_file(&destination).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(BundleError::Io(format!(
                    "failed to remove previous bundle {}: {e}",
                    destination.display()
                )));
            }
        }

        let sources = [
            BundleSource::new(
                paths::database_data_folder(&self.params.target, &database.name),
                "mongo",
            ),
            BundleSource::new(
                paths::node_data_folder(&self.params.target, &node.name),
                "data",
            ),
        ];

        info!("creating bundle {}", destination.display());
        let size = codec
            .create_archive(&destination, &sources, &EntryFilter)
            .await?;
        info!(
            "bundle {} size {} kB created, it can now be shared for backup sync",
            destination.display(),
            size / 1024
        );
        Ok(destination)
    }

    /// The node matching `node_name` if given, else the first node with
    /// the API capability flag. The flag is required either way.
    fn resolve_node<'a>(&self, preset: &'a GlobalPreset) -> Result<&'a NodePreset, BundleError> {
        let selected = preset.nodes.iter().find(|node| {
            self.params
                .node_name
                .as_deref()
                .is_none_or(|name| node.name == name)
                && node.api
        });
        match (selected, &self.params.node_name) {
            (Some(node), _) => Ok(node),
            (None, Some(name)) => Err(BundleError::NodeNotFound(name.clone())),
            (None, None) => Err(BundleError::NoApiNode),
        }
    }
}

/// The database whose name or host matches the node's `databaseHost`.
fn resolve_database<'a>(
    preset: &'a GlobalPreset,
    node: &NodePreset,
) -> Result<&'a DatabasePreset, BundleError> {
    let host = node.database_host.as_deref().unwrap_or_default();
    preset
        .databases
        .iter()
        .find(|db| db.name == host || db.host.as_deref() == Some(host))
        .ok_or_else(|| BundleError::DatabaseNotFound(host.to_owned()))
}
