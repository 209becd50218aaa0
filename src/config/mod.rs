//! Configuration module for curator
//!
//! The client reads its settings from a key-value registry:
//! 1. [`Registry`] answers single key lookups (`logging.enabled`, ...)
//! 2. [`CuratorConfig`] is the typed view of the whole registry
//!
//! Configuration is stored in the user's config directory.

use config::{Config, ConfigError, File, FileFormat};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Registry keys read by the library
pub mod keys {
    pub const LOGGING_ENABLED: &str = "logging.enabled";
    pub const LOGGING_CONSOLE: &str = "logging.console";
    pub const LOGGING_DIR: &str = "logging.dir";
    pub const LOGGING_FILE: &str = "logging.file";
    pub const LOGGING_HOME: &str = "logging.home";
    pub const LOGGING_PLUGIN: &str = "logging.plugin";
    pub const WIZARD_FILTER_ANYWHERE: &str = "wizard.filter_anywhere";
}

/// Settings consumed by the logger factory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Whether logging to a file or the host is switched on at all
    pub enabled: bool,

    /// Verbose console output, and stderr echo for the file logger
    pub console: bool,

    /// Name of the log directory inside the home directory
    pub dir: String,

    /// Name of the log file
    pub file: String,

    /// Name of the client home directory inside the user home
    pub home: String,

    /// Host logging channel; negative or absent when not running as a plugin
    pub plugin: Option<i32>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            console: false,
            dir: "log".to_string(),
            file: "curator.log".to_string(),
            home: ".curator".to_string(),
            plugin: None,
        }
    }
}

impl LoggingSettings {
    /// Host channel to delegate to, if running in plugin mode
    #[must_use]
    pub fn plugin_channel(&self) -> Option<i32> {
        self.plugin.filter(|channel| *channel >= 0)
    }
}

/// Settings of the selection wizard
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct WizardSettings {
    /// Match the filter text anywhere in a label instead of at its start
    pub filter_anywhere: bool,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            filter_anywhere: true,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CuratorConfig {
    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub wizard: WizardSettings,
}

impl CuratorConfig {
    /// Get the curator directory inside the system config directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("curator"))
    }

    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the path to the log configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn log_config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("logging.toml"))
    }

    /// Load configuration from the default path, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing the defaults there if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        Registry::load(path)?.settings()
    }

    /// Save configuration to the default path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}

/// Key-value view over a TOML configuration source
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Config,
}

impl Registry {
    /// Build a registry from TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let inner = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;
        Ok(Self { inner })
    }

    /// Build a registry from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let inner = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;
        Ok(Self { inner })
    }

    /// Look up a single value; absent or mistyped keys give `None`
    #[must_use]
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.inner.get::<T>(key).ok()
    }

    #[must_use]
    pub fn lookup_bool(&self, key: &str) -> Option<bool> {
        self.lookup(key)
    }

    #[must_use]
    pub fn lookup_int(&self, key: &str) -> Option<i64> {
        self.lookup(key)
    }

    #[must_use]
    pub fn lookup_string(&self, key: &str) -> Option<String> {
        self.lookup(key)
    }

    /// Deserialize the whole registry, filling missing keys with defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present key holds a value of the wrong type.
    pub fn settings(&self) -> Result<CuratorConfig, ConfigError> {
        self.inner.clone().try_deserialize()
    }

    /// Logging settings, key by key, falling back to the defaults
    #[must_use]
    pub fn logging(&self) -> LoggingSettings {
        let defaults = LoggingSettings::default();
        LoggingSettings {
            enabled: self.lookup_bool(keys::LOGGING_ENABLED).unwrap_or(defaults.enabled),
            console: self.lookup_bool(keys::LOGGING_CONSOLE).unwrap_or(defaults.console),
            dir: self.lookup_string(keys::LOGGING_DIR).unwrap_or(defaults.dir),
            file: self.lookup_string(keys::LOGGING_FILE).unwrap_or(defaults.file),
            home: self.lookup_string(keys::LOGGING_HOME).unwrap_or(defaults.home),
            plugin: self
                .lookup_int(keys::LOGGING_PLUGIN)
                .and_then(|value| i32::try_from(value).ok()),
        }
    }

    /// Whether the wizard filter matches anywhere in a label
    #[must_use]
    pub fn filter_anywhere(&self) -> bool {
        self.lookup_bool(keys::WIZARD_FILTER_ANYWHERE)
            .unwrap_or_else(|| WizardSettings::default().filter_anywhere)
    }
}
