use serde::Deserialize;

/// Resolved deployment topology and global backup-sync settings.
///
/// Field names follow the camelCase wire form used by existing preset
/// files, so a preset written for one deployment can be shared verbatim
/// with another.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalPreset {
    /// URL or local path of the shared backup archive. Sync cannot run
    /// without it.
    pub backup_sync_location: Option<String>,

    /// Override for the name of the locally cached copy of the archive.
    pub backup_sync_local_cache_file_name: Option<String>,

    /// Seed used to derive the default cache file name when no override
    /// is given.
    pub nemesis_generation_hash_seed: Option<String>,

    #[serde(default)]
    pub databases: Vec<DatabasePreset>,

    #[serde(default)]
    pub nodes: Vec<NodePreset>,
}

/// A database in the deployment topology.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabasePreset {
    pub name: String,
    pub host: Option<String>,
}

/// A node in the deployment topology.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePreset {
    pub name: String,

    /// Marks the node as API-capable, making it eligible for bundle
    /// production.
    #[serde(default)]
    pub api: bool,

    /// Name or host of the database this node is associated with.
    pub database_host: Option<String>,
}

impl GlobalPreset {
    /// File name for the locally cached copy of the shared archive:
    /// the configured override, or a name derived from the generation
    /// hash seed.
    pub fn local_cache_file_name(&self) -> String {
        self.backup_sync_local_cache_file_name
            .clone()
            .unwrap_or_else(|| {
                format!(
                    "backup-{}.zip",
                    self.nemesis_generation_hash_seed.as_deref().unwrap_or("unknown")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preset_from_yaml() {
        let yaml = r#"
backupSyncLocation: https://example.com/testnet.zip
backupSyncLocalCacheFileName: testnet.zip
nemesisGenerationHashSeed: 57F7DA20
databases:
  - name: db
    host: db-host
nodes:
  - name: api-node
    api: true
    databaseHost: db
"#;
        let preset: GlobalPreset = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(
            preset.backup_sync_location.as_deref(),
            Some("https://example.com/testnet.zip")
        );
        assert_eq!(preset.databases.len(), 1);
        assert_eq!(preset.databases[0].name, "db");
        assert_eq!(preset.databases[0].host.as_deref(), Some("db-host"));
        assert_eq!(preset.nodes.len(), 1);
        assert!(preset.nodes[0].api);
        assert_eq!(preset.nodes[0].database_host.as_deref(), Some("db"));
    }

    #[test]
    fn api_flag_defaults_to_false() {
        let yaml = r#"
nodes:
  - name: peer-node
"#;
        let preset: GlobalPreset = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(!preset.nodes[0].api);
    }

    #[test]
    fn cache_file_name_prefers_override() {
        let preset = GlobalPreset {
            backup_sync_local_cache_file_name: Some("custom.zip".into()),
            nemesis_generation_hash_seed: Some("ABCD".into()),
            ..Default::default()
        };
        assert_eq!(preset.local_cache_file_name(), "custom.zip");
    }

    #[test]
    fn cache_file_name_derived_from_seed() {
        let preset = GlobalPreset {
            nemesis_generation_hash_seed: Some("ABCD".into()),
            ..Default::default()
        };
        assert_eq!(preset.local_cache_file_name(), "backup-ABCD.zip");
    }
}
