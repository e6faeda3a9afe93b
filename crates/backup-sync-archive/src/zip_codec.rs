use std::fs::File;
use std::path::Path;

use backup_sync::{ArchiveCodec, BundleError, BundleSource, EntryFilter, SyncError};
use tracing::{info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// ZIP reader/writer for backup archives, built on the `zip` crate.
///
/// Reading extracts a single named top-level folder; writing adds whole
/// directory trees under a top-level name with per-entry filtering.
pub struct ZipCodec;

#[async_trait::async_trait]
impl ArchiveCodec for ZipCodec {
    async fn extract_folder(
        &self,
        archive: &Path,
        folder: &str,
        destination: &Path,
    ) -> Result<(), SyncError> {
        let file = File::open(archive)
            .map_err(|e| SyncError::Io(format!("failed to open {}: {e}", archive.display())))?;
        let mut zip = ZipArchive::new(file).map_err(|e| {
            SyncError::Extraction(format!("failed to read {}: {e}", archive.display()))
        })?;

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| {
                SyncError::Extraction(format!("failed to read entry {index}: {e}"))
            })?;

            // Entries with unsafe names (absolute, or escaping via ..)
            // are never extracted.
            let Some(enclosed) = entry.enclosed_name() else {
                warn!("skipping entry with unsafe name '{}'", entry.name());
                continue;
            };
            let Ok(relative) = enclosed.strip_prefix(folder) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }

            let output = destination.join(relative);
            if entry.is_dir() {
                std::fs::create_dir_all(&output).map_err(|e| {
                    SyncError::Io(format!("failed to create {}: {e}", output.display()))
                })?;
                continue;
            }
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SyncError::Io(format!("failed to create {}: {e}", parent.display()))
                })?;
            }
            let mut target = File::create(&output).map_err(|e| {
                SyncError::Io(format!("failed to create {}: {e}", output.display()))
            })?;
            std::io::copy(&mut entry, &mut target).map_err(|e| {
                SyncError::Extraction(format!("failed to extract {}: {e}", output.display()))
            })?;
        }

        Ok(())
    }

    async fn create_archive(
        &self,
        destination: &Path,
        sources: &[BundleSource],
        filter: &EntryFilter,
    ) -> Result<u64, BundleError> {
        let file = File::create(destination).map_err(|e| {
            BundleError::Io(format!("failed to create {}: {e}", destination.display()))
        })?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(9));

        for source in sources {
            info!(
                "adding '{}' to {} as '{}'",
                source.directory.display(),
                destination.display(),
                source.archive_root
            );
            add_directory(&mut writer, source, filter, options)?;
        }

        let file = writer.finish().map_err(|e| {
            BundleError::Archive(format!("failed to finish {}: {e}", destination.display()))
        })?;
        let size = file
            .metadata()
            .map_err(|e| {
                BundleError::Io(format!("failed to stat {}: {e}", destination.display()))
            })?
            .len();
        Ok(size)
    }
}

/// Walk a source directory and add its filtered entries to the archive
/// under the source's top-level name.
///
/// A file that disappears between being listed and being read is logged
/// and skipped; these directories belong to live processes and transient
/// files are expected. Every other failure is fatal.
fn add_directory(
    writer: &mut ZipWriter<File>,
    source: &BundleSource,
    filter: &EntryFilter,
    options: SimpleFileOptions,
) -> Result<(), BundleError> {
    let root = &source.directory;
    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name().into_iter();

    while let Some(result) = walker.next() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) if e.io_error().is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound) => {
                warn!("skipping vanished entry under {}: {e}", root.display());
                continue;
            }
            Err(e) => {
                return Err(BundleError::Io(format!(
                    "failed to walk {}: {e}",
                    root.display()
                )));
            }
        };

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| BundleError::Io(format!("unexpected path under {}: {e}", root.display())))?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if !filter.includes(&relative) {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        let name = format!("{}/{relative}", source.archive_root);
        if entry.file_type().is_dir() {
            writer.add_directory(name.as_str(), options).map_err(|e| {
                BundleError::Archive(format!("failed to add directory '{name}': {e}"))
            })?;
            continue;
        }

        let mut input = match File::open(entry.path()) {
            Ok(input) => input,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("skipping vanished file {}", entry.path().display());
                continue;
            }
            Err(e) => {
                return Err(BundleError::Io(format!(
                    "failed to open {}: {e}",
                    entry.path().display()
                )));
            }
        };
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| BundleError::Archive(format!("failed to start entry '{name}': {e}")))?;
        std::io::copy(&mut input, writer).map_err(|e| {
            BundleError::Archive(format!(
                "failed to compress {}: {e}",
                entry.path().display()
            ))
        })?;
    }

    Ok(())
}
