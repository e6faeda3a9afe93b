use std::path::PathBuf;

/// Parameters shared by the sync and create-backup operations.
#[derive(Debug, Clone)]
pub struct SyncParams {
    /// Root directory of the deployment instance.
    pub target: PathBuf,

    /// Restrict bundle production to the node with this name.
    pub node_name: Option<String>,

    /// Override for the produced bundle's output path.
    pub destination_file: Option<PathBuf>,
}

impl Default for SyncParams {
    fn default() -> Self {
        Self {
            target: PathBuf::from("target"),
            node_name: None,
            destination_file: None,
        }
    }
}

impl SyncParams {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }
}
