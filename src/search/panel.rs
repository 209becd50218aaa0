//! Event surface of the advanced search panel
//!
//! The panel keeps the raw field values entered by the user in a
//! [`SearchForm`], builds a [`SearchContext`] when asked to search, and hands
//! every outcome to its subscribers as a [`SearchEvent`]. Executing the
//! search, or stopping one, is up to the subscriber.

use super::builder::{GroupDirectory, GroupSelection, SearchQueryBuilder, parse_terms};
use super::context::{SearchContext, SearchScope, SearchType};
use super::error::SearchError;
use crate::{UserGroup, UserId};
use chrono::{DateTime, Utc};

/// Text shown in the status area while a search runs
pub const SEARCHING_TEXT: &str = "Searching";

/// Which user the owner chooser is currently selecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// User who owns the objects
    Owner,
    /// User who annotated the objects
    Annotator,
}

/// Notification emitted by the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A search was requested with this context
    Search(SearchContext),
    /// The running search should be stopped
    Cancel,
    /// The user wants to pick an owner or annotator
    SelectUser(UserRole),
    /// Result nodes were expanded
    NodesExpanded,
}

/// Callback receiving panel events
pub type SearchListener = Box<dyn FnMut(&SearchEvent)>;

/// Raw values of the search fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub terms: Vec<String>,
    pub scope: Vec<SearchScope>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub owner: Option<UserId>,
    pub group: GroupSelection,
    pub search_type: Option<SearchType>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            terms: Vec::new(),
            scope: SearchScope::DEFAULTS.to_vec(),
            from: None,
            to: None,
            owner: None,
            group: GroupSelection::All,
            search_type: None,
        }
    }
}

impl SearchForm {
    /// Set the terms from the query field text
    pub fn set_query(&mut self, raw: &str) {
        self.terms = parse_terms(raw);
    }

    /// Clear both date fields
    pub fn reset_dates(&mut self) {
        self.from = None;
        self.to = None;
    }

    /// Put every field back to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn builder(&self) -> SearchQueryBuilder {
        SearchQueryBuilder::new()
            .terms(self.terms.clone())
            .scope(self.scope.clone())
            .from_date(self.from)
            .to_date(self.to)
            .owner(self.owner)
            .group(self.group)
            .search_type(self.search_type)
    }
}

/// Entry of the group chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupChoice {
    pub selection: GroupSelection,
    pub name: String,
}

/// Busy indicator of the panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatus {
    pub busy: bool,
    pub message: String,
}

/// Advanced search panel state
pub struct SearchPanel {
    form: SearchForm,
    groups: Vec<UserGroup>,
    status: SearchStatus,
    user_role: Option<UserRole>,
    listeners: Vec<SearchListener>,
}

impl SearchPanel {
    /// Initialize the panel with the groups it offers
    ///
    /// # Errors
    ///
    /// Returns `SearchError::NoGroups` if `groups` is `None`.
    pub fn initialize(groups: Option<Vec<UserGroup>>) -> Result<Self, SearchError> {
        let groups = groups.ok_or(SearchError::NoGroups)?;
        Ok(Self {
            form: SearchForm::default(),
            groups,
            status: SearchStatus::default(),
            user_role: None,
            listeners: Vec::new(),
        })
    }

    /// Register a callback receiving every panel event
    pub fn subscribe(&mut self, listener: impl FnMut(&SearchEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub const fn form(&self) -> &SearchForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    /// Scope choices offered next to the query field
    #[must_use]
    pub const fn scope_choices(&self) -> &'static [SearchScope] {
        &SearchScope::DEFAULTS
    }

    /// Object type choices
    #[must_use]
    pub const fn type_choices(&self) -> &'static [SearchType] {
        &SearchType::ALL
    }

    /// Group chooser entries: "All groups" first, then each group
    #[must_use]
    pub fn group_choices(&self) -> Vec<GroupChoice> {
        std::iter::once(GroupChoice {
            selection: GroupSelection::All,
            name: "All groups".to_string(),
        })
        .chain(self.groups.iter().map(|g| GroupChoice {
            selection: GroupSelection::Group(g.id),
            name: g.name.clone(),
        }))
        .collect()
    }

    #[must_use]
    pub const fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// Whether the search action is enabled
    #[must_use]
    pub const fn can_search(&self) -> bool {
        !self.status.busy
    }

    /// Role picked by the last [`select_user`](Self::select_user)
    #[must_use]
    pub const fn user_role(&self) -> Option<UserRole> {
        self.user_role
    }

    /// Build a context from the form and emit it
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Busy` while a search runs, and
    /// `SearchError::BuildError` if the selected groups resolve to nothing.
    pub fn search<D>(&mut self, directory: &D) -> Result<SearchContext, SearchError>
    where
        D: GroupDirectory + ?Sized,
    {
        if !self.can_search() {
            return Err(SearchError::Busy);
        }
        let ctx = self.form.builder().build(directory)?;
        log::info!(
            "search requested: {} term(s) over {} group(s)",
            ctx.terms().len(),
            ctx.groups().len()
        );
        self.emit(&SearchEvent::Search(ctx.clone()));
        Ok(ctx)
    }

    /// Run a search for a query coming from elsewhere in the application.
    ///
    /// The form is reset and the query becomes its only term. Blank queries
    /// are ignored.
    ///
    /// # Errors
    ///
    /// See [`search`](Self::search).
    pub fn quick_search<D>(
        &mut self,
        query: &str,
        directory: &D,
    ) -> Result<Option<SearchContext>, SearchError>
    where
        D: GroupDirectory + ?Sized,
    {
        if query.trim().is_empty() {
            return Ok(None);
        }
        if !self.can_search() {
            return Err(SearchError::Busy);
        }
        self.form.reset();
        self.form.terms = vec![query.to_string()];
        self.search(directory).map(Some)
    }

    /// Ask the subscriber to stop the running search
    pub fn cancel(&mut self) {
        log::debug!("search cancelled");
        self.emit(&SearchEvent::Cancel);
    }

    pub fn select_user(&mut self, role: UserRole) {
        self.user_role = Some(role);
        self.emit(&SearchEvent::SelectUser(role));
    }

    pub fn notify_nodes_expanded(&mut self) {
        self.emit(&SearchEvent::NodesExpanded);
    }

    /// Show or clear the busy indicator
    pub fn set_searching(&mut self, busy: bool) {
        let message = if busy { SEARCHING_TEXT } else { "" };
        self.set_searching_with(message, busy);
    }

    /// Show or clear the busy indicator with a custom message
    pub fn set_searching_with(&mut self, message: &str, busy: bool) {
        self.status = SearchStatus {
            busy,
            message: message.to_string(),
        };
    }

    pub fn reset_dates(&mut self) {
        self.form.reset_dates();
    }

    fn emit(&mut self, event: &SearchEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn panel() -> SearchPanel {
        SearchPanel::initialize(Some(vec![UserGroup::new(1, "lab"), UserGroup::new(2, "core")])).unwrap()
    }

    fn recorder(panel: &mut SearchPanel) -> Rc<RefCell<Vec<SearchEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        panel.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn test_initialize_without_groups_fails() {
        let result = SearchPanel::initialize(None);
        assert!(matches!(result, Err(SearchError::NoGroups)));
    }

    #[test]
    fn test_default_scope() {
        let panel = panel();
        assert_eq!(panel.form().scope, SearchScope::DEFAULTS.to_vec());
        assert_eq!(panel.scope_choices().len(), 3);
        assert_eq!(panel.type_choices().len(), 5);
    }

    #[test]
    fn test_search_emits_context() {
        let mut panel = panel();
        let events = recorder(&mut panel);
        panel.form_mut().set_query("nucleus");
        panel.form_mut().group = GroupSelection::Group(2);

        let ctx = panel.search(&vec![1_i64, 2]).unwrap();

        assert_eq!(events.borrow().as_slice(), &[SearchEvent::Search(ctx)]);
    }

    #[test]
    fn test_failed_search_emits_nothing() {
        let mut panel = panel();
        let events = recorder(&mut panel);

        assert!(panel.search(&Vec::<i64>::new()).is_err());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_quick_search_uses_whole_query_as_term() {
        let mut panel = panel();
        panel.form_mut().owner = Some(3);

        let ctx = panel.quick_search("two words", &vec![1_i64]).unwrap().unwrap();

        assert_eq!(ctx.terms(), ["two words"]);
        assert_eq!(ctx.owner(), None);
    }

    #[test]
    fn test_blank_quick_search_is_ignored() {
        let mut panel = panel();
        let events = recorder(&mut panel);
        assert!(panel.quick_search("   ", &vec![1_i64]).unwrap().is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_cancel_and_user_selection_events() {
        let mut panel = panel();
        let events = recorder(&mut panel);

        panel.cancel();
        panel.select_user(UserRole::Annotator);
        panel.notify_nodes_expanded();

        assert_eq!(
            events.borrow().as_slice(),
            &[
                SearchEvent::Cancel,
                SearchEvent::SelectUser(UserRole::Annotator),
                SearchEvent::NodesExpanded
            ]
        );
        assert_eq!(panel.user_role(), Some(UserRole::Annotator));
    }

    #[test]
    fn test_searching_status() {
        let mut panel = panel();
        panel.set_searching(true);
        assert_eq!(panel.status().message, SEARCHING_TEXT);
        assert!(!panel.can_search());

        panel.set_searching(false);
        assert!(panel.status().message.is_empty());
        assert!(panel.can_search());
    }

    #[test]
    fn test_search_refused_while_busy() {
        let mut panel = panel();
        let events = recorder(&mut panel);
        panel.set_searching(true);

        assert!(matches!(panel.search(&vec![1_i64]), Err(SearchError::Busy)));
        assert!(matches!(
            panel.quick_search("nucleus", &vec![1_i64]),
            Err(SearchError::Busy)
        ));
        assert!(events.borrow().is_empty());
        assert!(panel.form().terms.is_empty());

        panel.set_searching(false);
        assert!(panel.search(&vec![1_i64]).is_ok());
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_group_choices_start_with_all() {
        let choices = panel().group_choices();
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[0].selection, GroupSelection::All);
        assert_eq!(choices[2].name, "core");
    }

    #[test]
    fn test_reset_dates() {
        let mut panel = panel();
        panel.form_mut().from = Some(Utc::now());
        panel.form_mut().to = Some(Utc::now());
        panel.reset_dates();
        assert!(panel.form().from.is_none() && panel.form().to.is_none());
    }
}
