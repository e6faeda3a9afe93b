mod preset_loader;

use std::path::PathBuf;

use anyhow::{Context, Result};
use backup_sync::{BundleService, SyncParams, SyncService};
use backup_sync_archive::{HttpTransport, ZipCodec};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "backup-sync")]
#[command(about = "Sync and produce shared backup archives for a node deployment")]
struct Cli {
    /// Log filter (e.g. info, debug, backup_sync=trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download the shared backup archive and extract it into every
    /// database and node directory that does not exist yet
    Sync {
        /// Deployment target directory
        #[arg(long, default_value = "target")]
        target: PathBuf,
    },
    /// Bundle one node's data and its database into a distributable zip
    CreateBackup {
        /// Deployment target directory
        #[arg(long, default_value = "target")]
        target: PathBuf,
        /// Bundle this node instead of the first api-capable one
        #[arg(long)]
        node_name: Option<String>,
        /// Write the bundle here instead of <target>/backup.zip
        #[arg(long)]
        destination_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level)
        .with_context(|| format!("invalid log level '{}'", cli.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Sync { target } => {
            let preset = preset_loader::load_preset(&target)?;
            let service = SyncService::new(SyncParams::new(&target));
            service
                .run(&preset, &HttpTransport::new(), &ZipCodec)
                .await
                .context("backup sync failed")?;
        }
        Command::CreateBackup {
            target,
            node_name,
            destination_file,
        } => {
            let preset = preset_loader::load_preset(&target)?;
            let service = BundleService::new(SyncParams {
                target,
                node_name,
                destination_file,
            });
            service
                .create_backup(&preset, &ZipCodec)
                .await
                .context("backup creation failed")?;
        }
    }

    Ok(())
}
