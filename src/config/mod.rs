use crate::models::UserConfig;
use crate::models::config::{default_console_logging, default_log_dir, default_store_file};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use ::config::{Config, File, FileFormat};
use std::fs;

/// Name of the settings file inside the data directory.
pub const USER_CONFIG_FILE: &str = "PrimeTime Settings.yaml";

/// Configuration manager for the data directory.
///
/// Owns:
/// - User settings (`PrimeTime Settings.yaml`): store file name, logging options
/// - The location of the key-value store the counter is persisted to
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    user_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified data directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding settings and the store (e.g., "PrimeTime Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            user_config_path: config_dir.join(USER_CONFIG_FILE),
            config_dir,
        })
    }

    /// Load the user configuration file.
    ///
    /// The file is optional and layered over the built-in defaults, so a
    /// missing file or missing keys fall back to [`UserConfig::default()`].
    pub fn load_user_config(&self) -> Result<UserConfig> {
        if !self.user_config_path.exists() {
            tracing::warn!(
                "User config file not found at {}, using defaults",
                self.user_config_path
            );
        }

        let config: UserConfig = Config::builder()
            .set_default("store_file", default_store_file())?
            .set_default("log_dir", default_log_dir())?
            .set_default("debug_mode", false)?
            .set_default("console_logging", default_console_logging())?
            .add_source(
                File::new(self.user_config_path.as_str(), FileFormat::Yaml).required(false),
            )
            .build()
            .with_context(|| format!("Failed to read user config: {}", self.user_config_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse user config: {}", self.user_config_path))?;

        tracing::info!("Loaded user config from {}", self.user_config_path);
        Ok(config)
    }

    /// Save the user configuration file.
    pub fn save_user_config(&self, config: &UserConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize user config to YAML")?;

        fs::write(&self.user_config_path, yaml_string)
            .with_context(|| format!("Failed to write user config: {}", self.user_config_path))?;

        tracing::info!("Saved user config to {}", self.user_config_path);
        Ok(())
    }

    /// Path of the key-value store named by `config`.
    pub fn store_path(&self, config: &UserConfig) -> Utf8PathBuf {
        self.config_dir.join(&config.store_file)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn user_config_path(&self) -> &Utf8Path {
        &self.user_config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = Utf8PathBuf::try_from(temp_dir.path().join("PrimeTime Data")).unwrap();

        let manager = ConfigManager::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(manager.config_dir(), nested);
    }

    #[test]
    fn test_missing_user_config_uses_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();

        let loaded = manager.load_user_config().unwrap();
        assert_eq!(loaded, UserConfig::default());
    }

    #[test]
    fn test_load_save_user_config() {
        let (manager, _temp_dir) = create_test_config_manager();

        let config = UserConfig {
            store_file: "counter.yaml".to_string(),
            debug_mode: true,
            ..UserConfig::default()
        };
        manager.save_user_config(&config).unwrap();

        let loaded = manager.load_user_config().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_store_path() {
        let (manager, _temp_dir) = create_test_config_manager();
        let path = manager.store_path(&UserConfig::default());

        assert_eq!(path, manager.config_dir().join("defaults.yaml"));
    }
}
