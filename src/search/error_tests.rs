//! Unit tests for search error types

#[cfg(test)]
mod tests {
    use crate::search::error::SearchError;
    use crate::CuratorError;
    use std::error::Error;

    #[test]
    fn test_no_groups_error() {
        let error = SearchError::NoGroups;
        assert_eq!(error.to_string(), "No groups specified");
    }

    #[test]
    fn test_build_error() {
        let error = SearchError::BuildError("current user has no group".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to build search context: current user has no group"
        );
    }

    #[test]
    fn test_busy_error() {
        let error = SearchError::Busy;
        assert_eq!(error.to_string(), "A search is already running");
    }

    #[test]
    fn test_error_debug() {
        let error = SearchError::NoGroups;
        let debug = format!("{error:?}");
        assert!(debug.contains("NoGroups"));
    }

    #[test]
    fn test_build_error_creation() {
        let msg = "empty group list";
        let error = SearchError::BuildError(msg.to_string());

        match error {
            SearchError::BuildError(s) => assert_eq!(s, msg),
            SearchError::NoGroups | SearchError::Busy => panic!("Expected BuildError variant"),
        }
    }

    #[test]
    fn test_error_has_no_source() {
        let error = SearchError::BuildError("x".to_string());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_converts_into_crate_error() {
        let error: CuratorError = SearchError::NoGroups.into();
        assert!(error.to_string().contains("Search error"));
        assert!(error.source().is_some());
    }
}
