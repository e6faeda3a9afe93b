use std::path::{Path, PathBuf};

/// Layout of a deployment target directory.
///
/// - `target/backup-sync/` — staging area for the cached shared archive
/// - `target/databases/<name>/` — per-database data directory
/// - `target/nodes/<name>/data/` — per-node data directory

pub const STAGING_DIR: &str = "backup-sync";

/// Staging directory for the locally cached shared archive.
pub fn staging_folder(target: &Path) -> PathBuf {
    target.join(STAGING_DIR)
}

/// Data directory for a named database.
pub fn database_data_folder(target: &Path, database_name: &str) -> PathBuf {
    target.join("databases").join(database_name)
}

/// Data directory for a named node.
pub fn node_data_folder(target: &Path, node_name: &str) -> PathBuf {
    target.join("nodes").join(node_name).join("data")
}
