use crate::errors::{AppError, AppResult};
use crate::utils::path::{beside, expand_tilde};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_ledger")]
    pub ledger: String,
    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,
    #[serde(default = "default_pending_file")]
    pub pending_file: String,
    #[serde(default = "default_completed_file")]
    pub completed_file: String,
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

fn default_ledger() -> String {
    Config::ledger_file().to_string_lossy().to_string()
}
fn default_tasks_file() -> String {
    "tasks.csv".to_string()
}
fn default_pending_file() -> String {
    "pending_tasks.csv".to_string()
}
fn default_completed_file() -> String {
    "completed_tasks.csv".to_string()
}
fn default_command_prefix() -> String {
    "/".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger: default_ledger(),
            tasks_file: default_tasks_file(),
            pending_file: default_pending_file(),
            completed_file: default_completed_file(),
            command_prefix: default_command_prefix(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("zcapture")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".zcapture")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("zcapture.conf")
    }

    /// Return the default path of the CSV ledger
    pub fn ledger_file() -> PathBuf {
        Self::config_dir().join("Z.csv")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Ledger path with `~/` expanded.
    pub fn ledger_path(&self) -> PathBuf {
        expand_tilde(&self.ledger)
    }

    /// Default destination of an extraction, next to the ledger.
    pub fn output_path(&self, name: &str) -> PathBuf {
        beside(&self.ledger_path(), name)
    }

    /// Write the configuration file (unless `is_test`) and create an empty
    /// ledger with the current header if none exists yet.
    pub fn init_all(&self, is_test: bool) -> AppResult<PathBuf> {
        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let yaml = self.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        let ledger = self.ledger_path();
        if let Some(dir) = ledger.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        Ok(ledger)
    }
}
