use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use toml;
use tracing::{info, warn};

/// Configuration for the Ateliê application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the document store (primary data and backups)
    pub data_dir: String,
    /// Number of backup snapshots to keep when pruning
    pub backup_count: u32,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    /// Optional update for the data directory
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Optional update for the backup count
    #[serde(default)]
    pub backup_count: Option<u32>,
}

/// Command line arguments shared by every subcommand
#[derive(Parser, Debug, Default)]
pub struct CliArgs {
    /// Data directory
    #[clap(long, env = "ATELIE_DATA_DIR", global = true)]
    pub data_dir: Option<String>,

    /// Number of backups to keep when pruning
    #[clap(long, env = "ATELIE_BACKUP_COUNT", global = true)]
    pub backup_count: Option<u32>,

    /// Debug mode
    #[clap(long, env = "ATELIE_DEBUG", default_value_t = false, global = true)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            data_dir: update.data_dir.unwrap_or(self.data_dir),
            backup_count: update.backup_count.unwrap_or(self.backup_count),
        }
    }
}

/// Returns the base (default) configuration
pub fn base_config(data_path: Option<PathBuf>) -> Config {
    let data_dir = data_path.map_or("atelie_data".to_string(), |path| {
        path.to_string_lossy().to_string()
    });

    Config {
        data_dir,
        backup_count: 10,
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    // if the config path is None, return the default config
    if config_path.is_none() {
        return Ok(ConfigUpdate::default());
    }

    let config_path = config_path.unwrap();

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        data_dir: args.data_dir,
        backup_count: args.backup_count,
    }
}

/// Returns the directory where the config file lives, if one can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "atelie", "atelie").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: CliArgs) -> Config {
    let project_dirs = ProjectDirs::from("com", "atelie", "atelie");
    let (config_path, data_path) = match project_dirs {
        Some(dirs) => (
            Some(dirs.config_dir().join("config.toml")),
            Some(dirs.data_dir().to_path_buf()),
        ),
        None => {
            warn!("Could not determine XDG directories, using working-directory defaults");
            (None, None)
        }
    };

    let base = base_config(data_path);

    // Apply updates in order of increasing precedence
    let config = base
        .apply_update(config_from_file(config_path).unwrap_or_default())
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: data_dir={}, backup_count={}",
        config.data_dir, config.backup_count
    );

    config
}
