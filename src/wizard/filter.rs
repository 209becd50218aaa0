//! Label filtering for the available list
//!
//! Matching is a case-insensitive substring test, either anchored at the start
//! of the label or anywhere in it. Tag-sets match through their children.

use super::item::{Item, Leaf};
use serde::{Deserialize, Serialize};

/// Placeholder shown in an empty filter field; never used as a query
pub const DEFAULT_FILTER_TEXT: &str = "Filter";

/// Where the query has to occur in a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Label must start with the query
    StartsWith,
    /// Query may appear anywhere in the label
    #[default]
    Contains,
}

impl MatchMode {
    /// Mode for the "filter anywhere" toggle
    #[must_use]
    pub const fn from_anywhere(anywhere: bool) -> Self {
        if anywhere { Self::Contains } else { Self::StartsWith }
    }
}

/// Which set the filter starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPass {
    /// Query was extended: narrow the current available list
    Narrow,
    /// Query was shortened or replaced: start again from the original items
    Widen,
}

impl FilterPass {
    /// Pass to run when the filter text changes from `previous` to `current`
    #[must_use]
    pub fn between(previous: &str, current: &str) -> Self {
        if current.len() > previous.len() && current.starts_with(previous) {
            Self::Narrow
        } else {
            Self::Widen
        }
    }
}

/// A normalized filter query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    needle: String,
    mode: MatchMode,
}

impl FilterQuery {
    #[must_use]
    pub fn new(text: &str, mode: MatchMode) -> Self {
        Self {
            needle: text.to_lowercase(),
            mode,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Test a single label
    #[must_use]
    pub fn matches_label(&self, label: &str) -> bool {
        let value = label.to_lowercase();
        match self.mode {
            MatchMode::StartsWith => value.starts_with(&self.needle),
            MatchMode::Contains => value.contains(&self.needle),
        }
    }

    /// Test an available item.
    ///
    /// A group matches when one of its children still eligible for selection
    /// matches; `eligible` decides which children count.
    pub fn matches_item(&self, item: &Item, eligible: impl Fn(&Leaf) -> bool) -> bool {
        if self.is_empty() {
            return match item {
                Item::Leaf(_) => true,
                Item::Group(group) => group.children.iter().any(|child| eligible(child)),
            };
        }
        match item {
            Item::Leaf(leaf) => leaf.kind.is_filterable() && self.matches_label(&leaf.label),
            Item::Group(group) => group.children.iter().any(|child| {
                eligible(child) && child.kind.is_filterable() && self.matches_label(&child.label)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::item::{Group, ObjectKind};

    #[test]
    fn test_starts_with_mode() {
        let query = FilterQuery::new("data", MatchMode::StartsWith);
        assert!(query.matches_label("Dataset1"));

        let query = FilterQuery::new("set1", MatchMode::StartsWith);
        assert!(!query.matches_label("Dataset1"));
    }

    #[test]
    fn test_contains_mode() {
        let query = FilterQuery::new("set1", MatchMode::Contains);
        assert!(query.matches_label("Dataset1"));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let query = FilterQuery::new("DOG", MatchMode::Contains);
        assert!(query.matches_label("hotdogs"));
    }

    #[test]
    fn test_group_matches_through_eligible_children() {
        let group: Item = Group::new(9, "pets", vec![Leaf::tag(1, "cat"), Leaf::tag(2, "dog")]).into();
        let query = FilterQuery::new("do", MatchMode::Contains);

        assert!(query.matches_item(&group, |_| true));
        assert!(!query.matches_item(&group, |child| child.id != 2));
    }

    #[test]
    fn test_group_label_alone_does_not_match() {
        let group: Item = Group::new(9, "pets", vec![Leaf::tag(1, "cat")]).into();
        let query = FilterQuery::new("pet", MatchMode::Contains);
        assert!(!query.matches_item(&group, |_| true));
    }

    #[test]
    fn test_other_kinds_are_not_filterable() {
        let item: Item = Leaf::new(4, ObjectKind::Other, "plate").into();
        assert!(!FilterQuery::new("pl", MatchMode::Contains).matches_item(&item, |_| true));
        assert!(FilterQuery::new("", MatchMode::Contains).matches_item(&item, |_| true));
    }

    #[test]
    fn test_filter_pass_between() {
        assert_eq!(FilterPass::between("do", "dog"), FilterPass::Narrow);
        assert_eq!(FilterPass::between("dog", "do"), FilterPass::Widen);
        assert_eq!(FilterPass::between("cat", "dog"), FilterPass::Widen);
        assert_eq!(FilterPass::between("", "d"), FilterPass::Narrow);
    }

    #[test]
    fn test_mode_from_anywhere() {
        assert_eq!(MatchMode::from_anywhere(true), MatchMode::Contains);
        assert_eq!(MatchMode::from_anywhere(false), MatchMode::StartsWith);
    }
}
