//! Logger selection and backends
//!
//! [`LoggerFactory`] reads the logging settings of the client and builds one
//! [`Logger`]: console, file, or plugin-delegating. The result can be used as
//! a plain [`log::Log`] or installed as the global logger, which [`init`]
//! does in one step from the configuration files.

pub mod backends;
pub mod error;
pub mod factory;

pub use backends::{HostLogChannel, LogConfig, Logger, LoggerKind};
pub use error::LoggingError;
pub use factory::{LoggerFactory, LoggerPlan};

use crate::CuratorError;
use crate::config::CuratorConfig;
use std::path::{Path, PathBuf};

/// Install the logger selected by the configuration in the user's config directory
///
/// # Errors
///
/// Returns `CuratorError::ConfigError` if the configuration cannot be loaded
/// and `CuratorError::LoggingError` if the logger cannot be built or installed.
pub fn init(container_home: impl Into<PathBuf>) -> Result<LoggerKind, CuratorError> {
    let config = CuratorConfig::load()?;
    install(&LoggerFactory::with_default_paths(config.logging, container_home)?)
}

/// Install the logger selected by `config_path`, using `log_config` as the
/// log configuration file
///
/// # Errors
///
/// See [`init`].
pub fn init_from(
    config_path: &Path,
    log_config: &Path,
    container_home: impl Into<PathBuf>,
) -> Result<LoggerKind, CuratorError> {
    let config = CuratorConfig::load_from(config_path)?;
    install(&LoggerFactory::new(config.logging, log_config, container_home))
}

fn install(factory: &LoggerFactory) -> Result<LoggerKind, CuratorError> {
    let logger = factory.build()?;
    let kind = logger.kind();
    logger.install()?;
    Ok(kind)
}
