use std::path::Path;

use anyhow::{Context, Result};
use backup_sync::GlobalPreset;

/// Name of the resolved preset document inside a deployment target.
pub const PRESET_FILE: &str = "preset.yml";

/// Load the deployment's resolved preset from `<target>/preset.yml`.
pub fn load_preset(target: &Path) -> Result<GlobalPreset> {
    let path = target.join(PRESET_FILE);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read preset at {}", path.display()))?;
    serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("failed to parse preset at {}", path.display()))
}
