use serde::{Deserialize, Serialize};

/// User configuration from `PrimeTime Settings.yaml`
///
/// Every field falls back to its default when absent, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// File name of the key-value store, relative to the data directory
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Directory for rotated log files
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default)]
    pub debug_mode: bool,

    /// Mirror log output to the console in addition to the log file
    #[serde(default = "default_console_logging")]
    pub console_logging: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            log_dir: default_log_dir(),
            debug_mode: false,
            console_logging: default_console_logging(),
        }
    }
}

pub(crate) fn default_store_file() -> String {
    "defaults.yaml".to_string()
}

pub(crate) fn default_log_dir() -> String {
    "logs".to_string()
}

pub(crate) fn default_console_logging() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_config_defaults() {
        let config = UserConfig::default();
        assert_eq!(config.store_file, "defaults.yaml");
        assert_eq!(config.log_dir, "logs");
        assert!(!config.debug_mode);
        assert!(config.console_logging);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: UserConfig = serde_yaml_ng::from_str("debug_mode: true\n").unwrap();
        assert!(config.debug_mode);
        assert_eq!(config.store_file, "defaults.yaml");
        assert!(config.console_logging);
    }
}
