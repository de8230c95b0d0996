use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR_WINDOWS: &str = "kviktime";
const APP_DIR_UNIX: &str = ".kviktime";
const CONFIG_FILE: &str = "kviktime.conf";
const DB_FILE: &str = "kviktime.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Fallback tracing filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Upper bound on entries in a single user export.
    #[serde(default = "default_max_export_entries")]
    pub max_export_entries: usize,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_max_export_entries() -> usize {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            log_level: default_log_level(),
            max_export_entries: default_max_export_entries(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join(APP_DIR_WINDOWS)
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(APP_DIR_UNIX)
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_FILE)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Resolve the database path for `init`: user provided name (relative
    /// names live in the config directory) or the default file.
    pub fn resolve_db_path(custom_name: Option<&str>) -> PathBuf {
        match custom_name {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() {
                    p
                } else {
                    Self::config_dir().join(p)
                }
            }
            None => Self::database_file(),
        }
    }

    /// Create the config directory and write a fresh configuration file
    /// pointing at `db_path` (skipped in test mode).
    pub fn init_all(db_path: &std::path::Path, is_test: bool) -> AppResult<Self> {
        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), yaml)?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
