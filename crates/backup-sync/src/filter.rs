use tracing::info;

/// File base names never included in a bundle. These are live-process
/// lock and marker files that only make sense on the machine that wrote
/// them.
const EXCLUDED_FILES: &[&str] = &["server.lock", "broker.started", "broker.lock"];

/// Directory names whose entire subtree is excluded from a bundle.
const EXCLUDED_DIRECTORIES: &[&str] = &["spool"];

/// Pure predicate over bundle entry paths.
///
/// Paths are relative to the directory being added, with `/` separators,
/// before the archive's top-level name is prepended.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFilter;

impl EntryFilter {
    /// Whether an entry at `relative_path` belongs in the bundle.
    pub fn includes(&self, relative_path: &str) -> bool {
        let base_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        if EXCLUDED_FILES.contains(&base_name) {
            info!("excluding file '{relative_path}'");
            return false;
        }

        let first_component = relative_path.split('/').next().unwrap_or(relative_path);
        if EXCLUDED_DIRECTORIES.contains(&first_component) {
            if relative_path == first_component {
                info!("excluding directory '{relative_path}'");
            }
            return false;
        }

        true
    }
}
