//! Search-specific error types
//!
//! These errors can occur while setting up the search panel or while turning
//! the panel's field values into a [`SearchContext`](super::SearchContext).
//!
//! # Error Types
//!
//! - **`NoGroups`**: The panel was initialized without a group list
//! - **`BuildError`**: The field values do not describe a runnable search
//! - **`Busy`**: A search was requested while the previous one still runs

use thiserror::Error;

/// Search-specific errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search panel needs the list of groups to offer
    #[error("No groups specified")]
    NoGroups,

    /// Failed to build a search context
    #[error("Failed to build search context: {0}")]
    BuildError(String),

    /// The search action is disabled while a search runs
    #[error("A search is already running")]
    Busy,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
