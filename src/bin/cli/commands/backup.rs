use atelie::backup;
use atelie::config::Config;
use atelie::store::DocumentStore;
use clap::Subcommand;
use std::fs;
use std::path::PathBuf;

use crate::output::{self, OutputConfig};

/// Backup, export, and import commands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Snapshot the current data under a timestamped backup key
    Create,
    /// List backup snapshots, newest first
    List,
    /// Restore a backup snapshot (replaces current data)
    Restore {
        /// The backup key, as shown by `backup list`
        key: String,
    },
    /// Write a JSON export to a file (or stdout with `-`)
    Export {
        /// Output path; defaults to alunos_export_<date>.json
        #[clap(long)]
        output: Option<String>,
    },
    /// Import a JSON export, replacing current data
    Import {
        /// Path of the file to import
        file: PathBuf,
    },
    /// Delete old snapshots, keeping the newest ones
    Prune {
        /// How many snapshots to keep (defaults to the configured count)
        #[clap(long)]
        keep: Option<u32>,
    },
}

/// Executes a backup command
pub fn execute(
    store: &dyn DocumentStore,
    cmd: BackupCommands,
    config: &Config,
    output_config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        BackupCommands::Create => {
            let result = backup::create_backup(store)?;
            output::print_backup_result(&result, output_config);
        }
        BackupCommands::List => {
            let backups = backup::list_backups(store)?;
            output::print_backups(&backups, output_config);
        }
        BackupCommands::Restore { key } => {
            let result = backup::restore_backup(store, &key)?;
            output::print_import_result(&result, output_config);
            if !result.success {
                std::process::exit(1);
            }
        }
        BackupCommands::Export { output } => {
            let data = backup::export_database(store)?;
            match output.as_deref() {
                Some("-") => println!("{}", data),
                Some(path) => {
                    fs::write(path, &data)?;
                    output::print_success(&format!("Exported to {}", path), output_config);
                }
                None => {
                    let path = backup::export_filename();
                    fs::write(&path, &data)?;
                    output::print_success(&format!("Exported to {}", path), output_config);
                }
            }
        }
        BackupCommands::Import { file } => {
            let data = fs::read_to_string(&file)?;
            let result = backup::import_database(store, &data)?;
            output::print_import_result(&result, output_config);
            if !result.success {
                std::process::exit(1);
            }
        }
        BackupCommands::Prune { keep } => {
            let keep = keep.unwrap_or(config.backup_count) as usize;
            let removed = backup::prune_backups(store, keep)?;
            output::print_success(&format!("Removed {} old backups.", removed), output_config);
        }
    }
    Ok(())
}
