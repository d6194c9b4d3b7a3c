//! memfs Configuration
//!
//! Settings for the virtual disk, namespace behavior and logging. Loaded from
//! a TOML file; every field has a default so an empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main memfs configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemFsConfig {
    /// Virtual disk configuration
    #[serde(default)]
    pub disk: DiskConfig,

    /// Namespace behavior
    #[serde(default)]
    pub namespace: NamespaceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Virtual disk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskConfig {
    /// Capacity of the virtual disk in bytes
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

/// Namespace behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Copy file contents on `cp` and carry them over on `mv`.
    /// When false, the destination of a copy or move starts empty.
    #[serde(default)]
    pub copy_contents: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Default virtual disk capacity in bytes
pub const DEFAULT_CAPACITY: usize = 1000;

/// Largest virtual disk capacity accepted, in bytes (256 MiB)
pub const MAX_CAPACITY: usize = 256 * 1024 * 1024;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl MemFsConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> crate::Result<Self> {
        let config: MemFsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.disk.capacity == 0 {
            return Err(crate::Error::Config("disk.capacity must be greater than zero".into()));
        }

        if self.disk.capacity > MAX_CAPACITY {
            return Err(crate::Error::Config(format!(
                "disk.capacity must not exceed {} bytes, got {}",
                MAX_CAPACITY, self.disk.capacity
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(crate::Error::Config(format!(
                "logging.level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Override the disk capacity (e.g. from the command line)
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.disk.capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[disk]
capacity = 4096

[namespace]
copy_contents = true

[logging]
level = "debug"
"#;

        let config = MemFsConfig::from_str(toml).unwrap();
        assert_eq!(config.disk.capacity, 4096);
        assert!(config.namespace.copy_contents);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = MemFsConfig::from_str("").unwrap();
        assert_eq!(config.disk.capacity, DEFAULT_CAPACITY);
        assert!(!config.namespace.copy_contents);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = MemFsConfig::from_str("[disk]\ncapacity = 0\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_rejects_oversized_capacity() {
        let config = MemFsConfig::default().with_capacity(usize::MAX);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must not exceed"));

        MemFsConfig::default().with_capacity(MAX_CAPACITY).validate().unwrap();
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = MemFsConfig::from_str("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("memfs.toml");

        let config = MemFsConfig::default().with_capacity(64);
        config.save(&path).unwrap();

        let loaded = MemFsConfig::from_file(&path).unwrap();
        assert_eq!(loaded.disk.capacity, 64);
    }
}
