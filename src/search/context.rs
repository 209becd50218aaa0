//! The immutable result of the advanced search panel

use crate::{GroupId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field a search term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    Name,
    Description,
    Annotation,
    Tags,
    Comments,
    Attachments,
    Urls,
    Rois,
    Custom,
}

impl SearchScope {
    /// Scopes offered by the panel and selected initially
    pub const DEFAULTS: [Self; 3] = [Self::Name, Self::Description, Self::Annotation];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Annotation => "Annotation",
            Self::Tags => "Tags",
            Self::Comments => "Comments",
            Self::Attachments => "Attachments",
            Self::Urls => "URLs",
            Self::Rois => "ROIs",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of object to search for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Images,
    Datasets,
    Projects,
    Plates,
    Screens,
}

impl SearchType {
    pub const ALL: [Self; 5] = [
        Self::Images,
        Self::Datasets,
        Self::Projects,
        Self::Plates,
        Self::Screens,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Images => "Images",
            Self::Datasets => "Datasets",
            Self::Projects => "Projects",
            Self::Plates => "Plates",
            Self::Screens => "Screens",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed time interval with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTimeRange")]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl From<RawTimeRange> for TimeRange {
    fn from(raw: RawTimeRange) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Create a range from two bounds given in any order
    #[must_use]
    pub fn new(a: DateTime<Utc>, b: DateTime<Utc>) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Search criteria handed to whoever runs the search
///
/// Only built by [`SearchQueryBuilder`](super::SearchQueryBuilder); `groups`
/// is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchContext {
    pub(crate) terms: Vec<String>,
    pub(crate) scope: Vec<SearchScope>,
    pub(crate) time_range: Option<TimeRange>,
    pub(crate) owner: Option<UserId>,
    pub(crate) groups: Vec<GroupId>,
    pub(crate) search_type: Option<SearchType>,
}

impl SearchContext {
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn scope(&self) -> &[SearchScope] {
        &self.scope
    }

    #[must_use]
    pub const fn time_range(&self) -> Option<TimeRange> {
        self.time_range
    }

    #[must_use]
    pub const fn owner(&self) -> Option<UserId> {
        self.owner
    }

    #[must_use]
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    #[must_use]
    pub const fn search_type(&self) -> Option<SearchType> {
        self.search_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_range_orders_bounds() {
        let early = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();

        let range = TimeRange::new(late, early);
        assert_eq!(range.start(), early);
        assert_eq!(range.end(), late);
        assert!(range.contains(Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_deserialized_time_range_is_ordered() {
        let range: TimeRange = toml::from_str(
            "start = \"2020-05-01T00:00:00Z\"\nend = \"2020-01-01T00:00:00Z\"\n",
        )
        .unwrap();

        assert!(range.start() <= range.end());
        assert_eq!(range.start(), Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(SearchScope::Urls.to_string(), "URLs");
        assert_eq!(SearchScope::DEFAULTS[2].to_string(), "Annotation");
        assert_eq!(SearchType::Plates.to_string(), "Plates");
    }
}
