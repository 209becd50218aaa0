//! Builder turning raw search field values into a [`SearchContext`]
//!
//! ```
//! use curator::search::{GroupSelection, SearchQueryBuilder};
//!
//! let user_groups: Vec<i64> = vec![1, 2, 3];
//! let ctx = SearchQueryBuilder::new()
//!     .query("mitosis, spindle")
//!     .group(GroupSelection::All)
//!     .build(&user_groups)?;
//!
//! assert_eq!(ctx.terms(), ["mitosis", "spindle"]);
//! assert_eq!(ctx.groups(), [1, 2, 3]);
//! # Ok::<(), curator::search::SearchError>(())
//! ```

use super::context::{SearchContext, SearchScope, SearchType, TimeRange};
use super::error::SearchError;
use crate::{GroupId, UserGroup, UserId};
use chrono::{DateTime, Utc};

/// Group id standing for "every group of the current user"
pub const ALL_GROUPS_ID: GroupId = -1;

/// Group chosen in the search panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupSelection {
    /// Every group the current user belongs to
    #[default]
    All,
    /// A single group
    Group(GroupId),
}

impl From<GroupId> for GroupSelection {
    fn from(id: GroupId) -> Self {
        if id == ALL_GROUPS_ID {
            Self::All
        } else {
            Self::Group(id)
        }
    }
}

/// Source of the current user's group memberships
pub trait GroupDirectory {
    fn current_user_groups(&self) -> Vec<GroupId>;
}

impl GroupDirectory for [GroupId] {
    fn current_user_groups(&self) -> Vec<GroupId> {
        self.to_vec()
    }
}

impl GroupDirectory for Vec<GroupId> {
    fn current_user_groups(&self) -> Vec<GroupId> {
        self.clone()
    }
}

impl GroupDirectory for [UserGroup] {
    fn current_user_groups(&self) -> Vec<GroupId> {
        self.iter().map(|g| g.id).collect()
    }
}

impl GroupDirectory for Vec<UserGroup> {
    fn current_user_groups(&self) -> Vec<GroupId> {
        self.as_slice().current_user_groups()
    }
}

/// Split raw query text into terms.
///
/// Terms are separated by whitespace or commas; blank input gives no terms.
///
/// # Examples
/// ```
/// # use curator::search::parse_terms;
/// assert_eq!(parse_terms("a, b  c"), vec!["a", "b", "c"]);
/// assert!(parse_terms("   ").is_empty());
/// ```
#[must_use]
pub fn parse_terms(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builder for [`SearchContext`]
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    terms: Vec<String>,
    scope: Vec<SearchScope>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    owner: Option<UserId>,
    group: GroupSelection,
    search_type: Option<SearchType>,
}

impl SearchQueryBuilder {
    /// Create an empty builder: no terms, all groups
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the terms directly
    #[must_use]
    pub fn terms(mut self, terms: Vec<String>) -> Self {
        self.terms = terms;
        self
    }

    /// Set the terms from raw query text, see [`parse_terms`]
    #[must_use]
    pub fn query(mut self, raw: &str) -> Self {
        self.terms = parse_terms(raw);
        self
    }

    /// Fields to match the terms against
    #[must_use]
    pub fn scope(mut self, scope: Vec<SearchScope>) -> Self {
        self.scope = scope;
        self
    }

    /// One bound of the time filter
    #[must_use]
    pub const fn from_date(mut self, from: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self
    }

    /// The other bound of the time filter
    #[must_use]
    pub const fn to_date(mut self, to: Option<DateTime<Utc>>) -> Self {
        self.to = to;
        self
    }

    #[must_use]
    pub const fn owner(mut self, owner: Option<UserId>) -> Self {
        self.owner = owner;
        self
    }

    #[must_use]
    pub const fn group(mut self, group: GroupSelection) -> Self {
        self.group = group;
        self
    }

    #[must_use]
    pub const fn search_type(mut self, search_type: Option<SearchType>) -> Self {
        self.search_type = search_type;
        self
    }

    /// Build the `SearchContext`
    ///
    /// The time filter only applies when both bounds are set, and its bounds
    /// are put in order. [`GroupSelection::All`] is expanded through
    /// `directory`, each group kept once.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::BuildError` if the group selection resolves to
    /// no group at all.
    pub fn build<D>(self, directory: &D) -> Result<SearchContext, SearchError>
    where
        D: GroupDirectory + ?Sized,
    {
        let groups = match self.group {
            GroupSelection::Group(id) => vec![id],
            GroupSelection::All => {
                let mut groups: Vec<GroupId> = Vec::new();
                for id in directory.current_user_groups() {
                    if !groups.contains(&id) {
                        groups.push(id);
                    }
                }
                groups
            }
        };
        if groups.is_empty() {
            return Err(SearchError::BuildError(
                "current user belongs to no group".to_string(),
            ));
        }

        let time_range = match (self.from, self.to) {
            (Some(from), Some(to)) => Some(TimeRange::new(from, to)),
            _ => None,
        };

        Ok(SearchContext {
            terms: self.terms,
            scope: self.scope,
            time_range,
            owner: self.owner,
            groups,
            search_type: self.search_type,
        })
    }
}
