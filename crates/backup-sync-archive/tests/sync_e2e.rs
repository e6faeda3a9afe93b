use std::fs::File;
use std::io::Write;
use std::path::Path;

use backup_sync::{
    BundleService, DatabasePreset, GlobalPreset, NodePreset, SyncParams, SyncService,
};
use backup_sync_archive::{HttpTransport, ZipCodec};
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

fn build_shared_archive(path: &Path) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, content) in [
        ("mongo/mongod.lock", "db lock"),
        ("mongo/journal/wt.log", "journal"),
        ("data/00000/00002.dat", "block"),
        ("data/index.dat", "index"),
    ] {
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

fn testnet_preset(location: &Path) -> GlobalPreset {
    GlobalPreset {
        backup_sync_location: Some(location.to_str().unwrap().to_owned()),
        backup_sync_local_cache_file_name: Some("testnet.zip".into()),
        databases: vec![DatabasePreset {
            name: "db".into(),
            host: None,
        }],
        nodes: vec![NodePreset {
            name: "api-node".into(),
            api: true,
            database_host: Some("db".into()),
        }],
        ..Default::default()
    }
}

#[tokio::test]
async fn run_populates_database_and_node_directories() {
    let dir = tempfile::tempdir().unwrap();
    let shared = dir.path().join("shared.zip");
    build_shared_archive(&shared);
    let target = dir.path().join("target");

    let service = SyncService::new(SyncParams::new(&target));
    service
        .run(&testnet_preset(&shared), &HttpTransport::new(), &ZipCodec)
        .await
        .unwrap();

    assert!(target.join("databases/db/mongod.lock").exists());
    assert!(target.join("databases/db/journal/wt.log").exists());
    assert!(target.join("nodes/api-node/data/00000/00002.dat").exists());
    assert!(target.join("backup-sync/testnet.zip").exists());
}

#[tokio::test]
async fn run_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let shared = dir.path().join("shared.zip");
    build_shared_archive(&shared);
    let target = dir.path().join("target");
    let preset = testnet_preset(&shared);

    let service = SyncService::new(SyncParams::new(&target));
    service
        .run(&preset, &HttpTransport::new(), &ZipCodec)
        .await
        .unwrap();

    // Mark an extracted file, run again, marker must survive the skip.
    let marker = target.join("databases/db/marker.txt");
    std::fs::write(&marker, "left by first run").unwrap();

    service
        .run(&preset, &HttpTransport::new(), &ZipCodec)
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&marker).unwrap(),
        "left by first run"
    );
    assert!(target.join("nodes/api-node/data/index.dat").exists());
}

#[tokio::test]
async fn create_backup_bundles_the_synced_deployment() {
    let dir = tempfile::tempdir().unwrap();
    let shared = dir.path().join("shared.zip");
    build_shared_archive(&shared);
    let target = dir.path().join("target");
    let preset = testnet_preset(&shared);

    SyncService::new(SyncParams::new(&target))
        .run(&preset, &HttpTransport::new(), &ZipCodec)
        .await
        .unwrap();

    // Live-process files that must not travel in the bundle.
    let data = target.join("nodes/api-node/data");
    std::fs::write(data.join("server.lock"), "pid").unwrap();
    std::fs::create_dir_all(data.join("spool/partial")).unwrap();
    std::fs::write(data.join("spool/partial/0000.dat"), "transient").unwrap();

    let produced = BundleService::new(SyncParams::new(&target))
        .create_backup(&preset, &ZipCodec)
        .await
        .unwrap();

    assert_eq!(produced, target.join("backup.zip"));
    let mut archive = ZipArchive::new(File::open(&produced).unwrap()).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_owned())
        .collect();
    assert!(names.contains(&"mongo/mongod.lock".to_owned()));
    assert!(names.contains(&"data/index.dat".to_owned()));
    assert!(!names.iter().any(|n| n.contains("server.lock")));
    assert!(!names.iter().any(|n| n.contains("spool")));
}

#[tokio::test]
async fn create_backup_without_api_node_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("target");
    std::fs::create_dir_all(&target).unwrap();

    let preset = GlobalPreset {
        nodes: vec![NodePreset {
            name: "peer".into(),
            api: false,
            database_host: None,
        }],
        ..Default::default()
    };

    let result = BundleService::new(SyncParams::new(&target))
        .create_backup(&preset, &ZipCodec)
        .await;

    assert!(result.is_err());
    assert!(!target.join("backup.zip").exists());
}
