//! Configuration management for quickqr.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::render::MAX_MARGIN;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/quickqr/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the recent list is kept
    pub storage: StorageConfig,
    /// PNG export settings
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from the XDG config path, falling back to defaults if not found.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if not found.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let config: Self = if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            tracing::debug!("Config file not found, using defaults");
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `QUICKQR_DATA_DIR`: Override the recent-list directory
    /// - `QUICKQR_EXPORT_DIR`: Override the PNG export directory
    /// - `QUICKQR_EXPORT_SIZE`: Override the exported code size in pixels
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("QUICKQR_DATA_DIR") {
            tracing::debug!("Override storage.data_dir from env: {}", val);
            self.storage.data_dir = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("QUICKQR_EXPORT_DIR") {
            tracing::debug!("Override export.dir from env: {}", val);
            self.export.dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("QUICKQR_EXPORT_SIZE") {
            match val.parse() {
                Ok(size) => {
                    self.export.size = size;
                    tracing::debug!("Override export.size from env: {}", size);
                }
                Err(e) => {
                    tracing::warn!("Ignoring QUICKQR_EXPORT_SIZE={:?}: {}", val, e);
                }
            }
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.export.size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "export.size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.export.margin > MAX_MARGIN {
            return Err(ConfigError::InvalidValue {
                field: "export.margin".to_string(),
                reason: format!("must be at most {MAX_MARGIN}"),
            });
        }
        if self.export.file_prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.file_prefix".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to the XDG config path.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/quickqr/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory holding the recent list.
    ///
    /// `storage.data_dir` if set, otherwise `~/.local/share/quickqr`.
    pub fn data_dir(&self) -> ConfigResult<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("com", "quickqr", "quickqr").ok_or(ConfigError::NoConfigDir)
}

/// Recent-list storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
}

/// PNG export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported images are written to
    pub dir: PathBuf,
    /// Side length of the code itself, in pixels
    pub size: u32,
    /// White padding added on every side, in pixels
    pub margin: u32,
    /// File names are `<prefix>-<kind>-<unix millis>.png`
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            size: 240,
            margin: 20,
            file_prefix: "quickqr".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.export.size, 240);
        assert_eq!(config.export.margin, 20);
        assert_eq!(config.export.file_prefix, "quickqr");
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("conf").join("config.toml");

        let mut config = AppConfig::default();
        config.export.size = 512;
        config.storage.data_dir = Some(tmp.path().join("data"));
        config.save_to(&config_path).expect("save config");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded, config);
        assert_eq!(loaded.data_dir().expect("data dir"), tmp.path().join("data"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let loaded = AppConfig::load_from(&tmp.path().join("absent.toml")).expect("load config");
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[export]
margin = 8
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.export.margin, 8);
        assert_eq!(config.export.size, 240);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_zero_size_rejected() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[export]\nsize = 0\n").expect("write config");

        let err = AppConfig::load_from(&path).expect_err("zero size must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("QUICKQR_DATA_DIR", "/tmp/quickqr-data");
        std::env::set_var("QUICKQR_EXPORT_DIR", "/tmp/quickqr-out");
        std::env::set_var("QUICKQR_EXPORT_SIZE", "512");

        let mut config = AppConfig::default();
        config.apply_env();
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/quickqr-data")));
        assert_eq!(config.export.dir, PathBuf::from("/tmp/quickqr-out"));
        assert_eq!(config.export.size, 512);

        // Unparseable sizes are ignored.
        std::env::set_var("QUICKQR_EXPORT_SIZE", "large");
        let mut config = AppConfig::default();
        config.apply_env();
        assert_eq!(config.export.size, 240);

        std::env::remove_var("QUICKQR_DATA_DIR");
        std::env::remove_var("QUICKQR_EXPORT_DIR");
        std::env::remove_var("QUICKQR_EXPORT_SIZE");
    }

    #[test]
    fn test_oversized_margin_rejected() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[export]\nmargin = 4294967295\n").expect("write config");

        let err = AppConfig::load_from(&path).expect_err("huge margin must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[export\n").expect("write config");

        let err = AppConfig::load_from(&path).expect_err("broken TOML must be rejected");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
