use serde::{Deserialize, Serialize};
use std::{fs::{self, OpenOptions}, path::{Path, PathBuf}};
use std::io::Write;
use thiserror::Error;

pub const CONFIG_DIR: &str = ".config/velerolens";
pub const MAIN_CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Impossible to get your home dir")]
    NoHomeDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub last_window_pos_x: f32,
    pub last_window_pos_y: f32,
    pub last_width: f32,
    pub last_height: f32,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct VeleroOptions {
    pub namespace: String,
    pub refresh_interval_secs: u64,
    pub storage_location: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub options: AppOptions,
    pub velero: VeleroOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            options: AppOptions {
                last_window_pos_x: 20.0,
                last_window_pos_y: 10.0,
                last_width: 1400.0,
                last_height: 800.0,
            },
            velero: VeleroOptions {
                namespace: "velero".to_string(),
                refresh_interval_secs: 10,
                storage_location: "default".to_string(),
            },
        }
    }
}

pub fn app_root_path() -> Result<PathBuf, ConfigError> {
    let mut app_root_path = home::home_dir().ok_or(ConfigError::NoHomeDir)?;
    app_root_path.push(CONFIG_DIR);
    Ok(app_root_path)
}

pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let mut config_file_path = app_root_path()?;
    config_file_path.push(MAIN_CONFIG_FILE_NAME);
    Ok(config_file_path)
}

pub fn write_config_to_file(config_file_path: &Path, app_config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(parent) = config_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let toml_string = toml::to_string(app_config)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(config_file_path)?;

    file.write_all(toml_string.as_bytes())?;
    file.flush()?;

    Ok(())
}

/// Reads the config, rewriting it with defaults when it is missing or no
/// longer parses (older layouts).
pub fn read_app_config_from_file(config_file_path: &Path) -> Result<AppConfig, ConfigError> {
    let toml_str = match fs::read_to_string(config_file_path) {
        Ok(res) => res,
        Err(_) => {
            let app_config = AppConfig::default();
            write_config_to_file(config_file_path, &app_config)?;
            return Ok(app_config);
        }
    };

    match toml::from_str(&toml_str) {
        Ok(app_config) => Ok(app_config),
        Err(e) => {
            log::warn!("Config {} is invalid, rewriting defaults: {}", config_file_path.display(), e);
            let app_config = AppConfig::default();
            write_config_to_file(config_file_path, &app_config)?;
            Ok(app_config)
        }
    }
}
