use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DATABASE_FILE_NAME: &str = "projects.db";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub styles: Styles,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Colors used by the table renderers (xlsx and pdf exports).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Styles {
    #[serde(default = "default_header_background")]
    pub header_background: String,
    #[serde(default = "default_header_text_color")]
    pub header_text_color: String,
    #[serde(default = "default_row_background")]
    pub row_background: String,
    #[serde(default = "default_row_alternate_background")]
    pub row_alternate_background: String,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub enable_notifications: bool,
    #[serde(default)]
    pub pdf_orientation: PdfOrientation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PdfOrientation {
    #[default]
    Landscape,
    Portrait,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_header_background() -> String {
    "#2F75B5".to_string()
}
fn default_header_text_color() -> String {
    "#FFFFFF".to_string()
}
fn default_row_background() -> String {
    "#FFFFFF".to_string()
}
fn default_row_alternate_background() -> String {
    "#EAF3FB".to_string()
}
fn default_grid_color() -> String {
    "#A6A6A6".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header_background: default_header_background(),
            header_text_color: default_header_text_color(),
            row_background: default_row_background(),
            row_alternate_background: default_row_alternate_background(),
            grid_color: default_grid_color(),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            enable_notifications: true,
            pdf_orientation: PdfOrientation::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            styles: Styles::default(),
            preferences: Preferences::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rtimetracker")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE_NAME)
    }

    /// Database path with `~/` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Load the configuration from `path`.
    ///
    /// When the file does not exist the defaults are returned and, if
    /// `persist` is set, written to `path` so the next run finds them.
    pub fn load_or_create(path: &Path, persist: bool) -> AppResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            return serde_json::from_str(&content).map_err(|e| {
                AppError::Config(format!("failed to parse {}: {e}", path.display()))
            });
        }

        let cfg = Config::default();
        if persist {
            cfg.save(path)?;
            warning(format!(
                "Configuration file not found, default written to {}",
                path.display()
            ));
        }
        Ok(cfg)
    }

    /// Write the configuration as pretty JSON, creating the parent directory.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("failed to serialize configuration: {e}")))?;
        fs::write(path, json)?;
        info(format!("Configuration saved: {}", path.display()));
        Ok(())
    }
}
