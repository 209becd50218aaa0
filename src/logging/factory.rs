//! Logger selection
//!
//! The factory decides which backend to build, in this order:
//! 1. Logging disabled: console
//! 2. No log configuration file on disk: console
//! 3. Non-negative plugin channel: delegate to the host
//! 4. Otherwise: a file inside `<home>/<log dir>`
//!
//! Directory creation failures are not errors. An unusable home directory
//! falls back to the container home, an unusable log directory puts the log
//! file directly in the home directory.

use super::backends::{HostLogChannel, LogConfig, Logger};
use super::error::LoggingError;
use crate::config::{CuratorConfig, LoggingSettings, Registry};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Backend chosen by [`LoggerFactory::plan`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerPlan {
    /// Log to stderr
    Console { verbose: bool },
    /// Delegate to the host on this channel
    Plugin { channel: i32 },
    /// Append to `log_file`, echoing to stderr when `echo` is set
    File { log_file: PathBuf, echo: bool },
}

impl fmt::Display for LoggerPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console { verbose: true } => write!(f, "console (verbose)"),
            Self::Console { verbose: false } => write!(f, "console"),
            Self::Plugin { channel } => write!(f, "plugin channel {channel}"),
            Self::File { log_file, echo } => {
                write!(f, "file {}", log_file.display())?;
                if *echo {
                    write!(f, " (echo to stderr)")?;
                }
                Ok(())
            }
        }
    }
}

/// Builds the logger matching the client configuration
pub struct LoggerFactory {
    settings: LoggingSettings,
    config_file: PathBuf,
    user_home: Option<PathBuf>,
    container_home: PathBuf,
    host: Option<Arc<dyn HostLogChannel>>,
}

impl LoggerFactory {
    /// Create a factory
    ///
    /// `config_file` is the log configuration file, `container_home` the
    /// directory used when the client home directory is unusable.
    #[must_use]
    pub fn new(
        settings: LoggingSettings,
        config_file: impl Into<PathBuf>,
        container_home: impl Into<PathBuf>,
    ) -> Self {
        Self {
            settings,
            config_file: config_file.into(),
            user_home: dirs::home_dir(),
            container_home: container_home.into(),
            host: None,
        }
    }

    /// Create a factory reading its settings from `registry`
    #[must_use]
    pub fn from_registry(
        registry: &Registry,
        config_file: impl Into<PathBuf>,
        container_home: impl Into<PathBuf>,
    ) -> Self {
        Self::new(registry.logging(), config_file, container_home)
    }

    /// Create a factory using the default log configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn with_default_paths(
        settings: LoggingSettings,
        container_home: impl Into<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        Ok(Self::new(settings, CuratorConfig::log_config_path()?, container_home))
    }

    /// Override the user home directory
    #[must_use]
    pub fn user_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.user_home = Some(home.into());
        self
    }

    /// Register the host channel used in plugin mode
    #[must_use]
    pub fn host_channel(mut self, host: Arc<dyn HostLogChannel>) -> Self {
        self.host = Some(host);
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &LoggingSettings {
        &self.settings
    }

    #[must_use]
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Decide which backend to build
    ///
    /// Only the file branch touches the filesystem, creating the home and
    /// log directories when they are missing.
    #[must_use]
    pub fn plan(&self) -> LoggerPlan {
        let plan = self.choose();
        log::debug!("logger plan: {plan}");
        plan
    }

    fn choose(&self) -> LoggerPlan {
        if !self.settings.enabled {
            return LoggerPlan::Console {
                verbose: self.settings.console,
            };
        }
        if !self.config_file.is_file() {
            log::debug!(
                "no log configuration at {}, using console",
                self.config_file.display()
            );
            return LoggerPlan::Console {
                verbose: self.settings.console,
            };
        }
        if let Some(channel) = self.settings.plugin_channel() {
            return LoggerPlan::Plugin { channel };
        }

        LoggerPlan::File {
            log_file: self.log_file(),
            echo: self.settings.console,
        }
    }

    /// Build the planned logger
    ///
    /// Plugin mode without a registered host channel gives the console logger.
    ///
    /// # Errors
    ///
    /// Returns `LoggingError` if the log configuration file cannot be read or
    /// the log file cannot be opened.
    pub fn build(&self) -> Result<Logger, LoggingError> {
        match self.plan() {
            LoggerPlan::Console { verbose } => Ok(Logger::console(verbose)),
            LoggerPlan::Plugin { channel } => match &self.host {
                Some(host) => {
                    let config = LogConfig::load(&self.config_file)?;
                    Ok(Logger::plugin(channel, Arc::clone(host), config.level))
                }
                None => {
                    log::warn!("plugin channel {channel} has no host, using console");
                    Ok(Logger::console(self.settings.console))
                }
            },
            LoggerPlan::File { log_file, echo } => {
                let config = LogConfig::load(&self.config_file)?;
                Logger::file(&log_file, config.level, echo)
            }
        }
    }

    /// Build the planned logger and install it globally
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build) and [`Logger::install`].
    pub fn install(&self) -> Result<(), LoggingError> {
        self.build()?.install()
    }

    fn home_dir(&self) -> PathBuf {
        let Some(user_home) = &self.user_home else {
            return self.container_home.clone();
        };
        let home = user_home.join(&self.settings.home);
        let _ = fs::create_dir_all(&home);
        if home.is_dir() {
            home
        } else {
            self.container_home.clone()
        }
    }

    fn log_file(&self) -> PathBuf {
        let home = self.home_dir();
        let log_dir = home.join(&self.settings.dir);
        let _ = fs::create_dir_all(&log_dir);
        if log_dir.is_dir() {
            log_dir.join(&self.settings.file)
        } else {
            home.join(&self.settings.file)
        }
    }
}
