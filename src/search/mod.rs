//! Advanced search
//!
//! Turns the values of the advanced search panel into an immutable
//! [`SearchContext`]:
//! 1. Query text is split into terms (never absent, possibly empty)
//! 2. A time range is applied only when both bounds are given, in order
//! 3. "All groups" is expanded to the current user's groups
//!
//! The finished context is emitted to subscribers; running the search is
//! somebody else's job.

pub mod builder;
pub mod context;
pub mod error;
pub mod panel;

pub use builder::{ALL_GROUPS_ID, GroupDirectory, GroupSelection, SearchQueryBuilder, parse_terms};
pub use context::{SearchContext, SearchScope, SearchType, TimeRange};
pub use error::SearchError;
pub use panel::{GroupChoice, SearchEvent, SearchForm, SearchListener, SearchPanel, SearchStatus, UserRole};
