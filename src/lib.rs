//! Curator - selection, search and logging building blocks for an image data
//! management client
//!
//! This library provides the non-visual core of three client features:
//! 1. [`wizard`]: a dual-list wizard moving tags, attachments and datasets
//!    between an "available" and a "selected" list
//! 2. [`search`]: the advanced search panel and the builder turning its
//!    fields into a [`search::SearchContext`]
//! 3. [`logging`]: the factory choosing console, file or plugin logging from
//!    the client configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod logging;
pub mod search;
pub mod wizard;

#[cfg(test)]
pub mod testing;

/// Server side id of an experimenter group
pub type GroupId = i64;

/// Server side id of an experimenter
pub type UserId = i64;

/// Error enum, contains all failure states of the library
#[derive(Debug, Error)]
pub enum CuratorError {
    /// Search error
    #[error("Search error: {0}")]
    SearchError(#[from] search::SearchError),
    /// Logging error
    #[error("Logging error: {0}")]
    LoggingError(#[from] logging::LoggingError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
}

/// Experimenter group the current user belongs to
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserGroup {
    pub id: GroupId,
    pub name: String,
}

impl UserGroup {
    /// Create a new `UserGroup`
    #[must_use]
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
