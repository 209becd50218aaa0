//! Wizard session driving a [`SelectionState`] from UI events
//!
//! The session is what a dual-list panel talks to: it turns button, key and
//! text-field events into state transitions, keeps track of the filter text,
//! and notifies subscribers after every change.
//!
//! ```
//! use curator::wizard::{Leaf, SelectionWizard, WizardAction};
//!
//! let mut wizard = SelectionWizard::builder()
//!     .available(vec![Leaf::tag(1, "cats").into(), Leaf::tag(2, "dogs").into()])
//!     .build();
//!
//! wizard.handle(WizardAction::AddAll);
//! assert_eq!(wizard.selected().len(), 2);
//! ```

use super::filter::{DEFAULT_FILTER_TEXT, FilterPass, FilterQuery, MatchMode};
use super::item::{Item, LabelOrder, Leaf, ObjectId, ObjectKind, case_insensitive};
use super::state::{SelectionChange, SelectionState, Transition};
use crate::config::WizardSettings;
use crate::{GroupId, UserGroup};
use std::collections::HashMap;

/// User action on the transfer buttons (or the equivalent key/mouse gesture)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Move the highlighted available items
    Add(Vec<Item>),
    /// Move the highlighted selected items back
    Remove(Vec<Leaf>),
    AddAll,
    RemoveAll,
}

/// One of the two lists of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Available,
    Selected,
}

impl Pane {
    const fn title(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Selected => "Selected",
        }
    }
}

/// Callback invoked after every transition that changed something
pub type SelectionListener = Box<dyn FnMut(&SelectionChange, &SelectionState)>;

/// Stateful selection wizard
///
/// Use [`SelectionWizard::builder()`] to construct.
pub struct SelectionWizard {
    state: SelectionState,
    object_kind: ObjectKind,
    filter_text: String,
    match_mode: MatchMode,
    groups: HashMap<GroupId, String>,
    listeners: Vec<SelectionListener>,
}

impl SelectionWizard {
    /// Create a new builder for constructing a `SelectionWizard`
    #[must_use]
    pub fn builder() -> SelectionWizardBuilder {
        SelectionWizardBuilder::new()
    }

    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn available(&self) -> &[Item] {
        self.state.available()
    }

    #[must_use]
    pub fn selected(&self) -> &[Leaf] {
        self.state.selected()
    }

    /// Selected leaves to save, see [`SelectionState::selection`]
    #[must_use]
    pub fn selection(&self) -> Vec<&Leaf> {
        self.state.selection()
    }

    #[must_use]
    pub fn is_selected(&self, item: &Item) -> bool {
        self.state.is_selected(item)
    }

    #[must_use]
    pub fn is_added(&self, leaf: &Leaf) -> bool {
        self.state.is_added(leaf)
    }

    /// Register a callback run after each change
    pub fn subscribe(&mut self, listener: impl FnMut(&SelectionChange, &SelectionState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a transfer action
    pub fn handle(&mut self, action: WizardAction) -> SelectionChange {
        let transition = match &action {
            WizardAction::Add(items) => self.state.add_items(items),
            WizardAction::Remove(leaves) => self.state.remove_items(leaves),
            WizardAction::AddAll => self.state.add_all(),
            WizardAction::RemoveAll => self.state.remove_all(),
        };
        log::debug!("wizard action {action:?}");
        self.commit(transition)
    }

    /// React to a new filter field value.
    ///
    /// The placeholder text is ignored. Extending the previous text narrows
    /// the available list; any other edit re-filters the original items.
    pub fn set_filter_text(&mut self, text: &str) -> SelectionChange {
        if text == DEFAULT_FILTER_TEXT {
            return SelectionChange::default();
        }
        let pass = FilterPass::between(&self.filter_text, text);
        self.filter_text = text.to_string();

        let query = FilterQuery::new(text, self.match_mode);
        let transition = self.state.filter(&query, pass);
        log::debug!("filter {text:?} ({pass:?}, {:?})", self.match_mode);
        self.commit(transition)
    }

    #[must_use]
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Switch between "starts with" and "contains" matching.
    ///
    /// A non-empty filter text is applied again from the original items.
    pub fn set_match_mode(&mut self, mode: MatchMode) -> SelectionChange {
        if mode == self.match_mode {
            return SelectionChange::default();
        }
        self.match_mode = mode;
        if self.filter_text.is_empty() {
            return SelectionChange::default();
        }
        let query = FilterQuery::new(&self.filter_text, mode);
        let transition = self.state.filter(&query, FilterPass::Widen);
        self.commit(transition)
    }

    /// Replace the ids that cannot be removed. `None` means no immutable item.
    pub fn set_immutable(&mut self, ids: Option<Vec<ObjectId>>) {
        self.state = self.state.clone().with_immutable(ids);
    }

    /// Restore the initial lists
    pub fn reset(&mut self) -> SelectionChange {
        let transition = self.state.reset();
        self.commit(transition)
    }

    /// Add objects created outside the wizard to the selection
    pub fn add_objects(&mut self, objects: &[Leaf]) -> SelectionChange {
        if objects.is_empty() {
            return SelectionChange::default();
        }
        let transition = self.state.add_objects(objects);
        self.commit(transition)
    }

    /// Name of a known user group
    #[must_use]
    pub fn group_name(&self, id: GroupId) -> Option<&str> {
        self.groups.get(&id).map(String::as_str)
    }

    /// Caption shown above a pane, e.g. `Available tags:`
    #[must_use]
    pub fn caption(&self, pane: Pane) -> String {
        match self.object_kind.caption_noun() {
            Some(noun) => format!("{} {noun}:", pane.title()),
            None => format!("{}:", pane.title()),
        }
    }

    fn commit(&mut self, transition: Transition) -> SelectionChange {
        let Transition { state, change } = transition;
        self.state = state;
        if !change.is_empty() {
            log::debug!(
                "selection changed: +{} -{} kept {}",
                change.selected.len(),
                change.deselected.len(),
                change.kept.len()
            );
            for listener in &mut self.listeners {
                listener(&change, &self.state);
            }
        }
        change
    }
}

/// Builder for [`SelectionWizard`]
pub struct SelectionWizardBuilder {
    available: Vec<Item>,
    selected: Vec<Leaf>,
    object_kind: ObjectKind,
    immutable: Option<Vec<ObjectId>>,
    match_mode: MatchMode,
    order: LabelOrder,
    groups: Vec<UserGroup>,
}

impl SelectionWizardBuilder {
    /// Create a builder with no items, tag captions and "contains" matching
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: Vec::new(),
            selected: Vec::new(),
            object_kind: ObjectKind::Tag,
            immutable: None,
            match_mode: MatchMode::Contains,
            order: case_insensitive,
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn available(mut self, items: Vec<Item>) -> Self {
        self.available = items;
        self
    }

    #[must_use]
    pub fn selected(mut self, leaves: Vec<Leaf>) -> Self {
        self.selected = leaves;
        self
    }

    /// Kind of object handled, used for pane captions
    #[must_use]
    pub const fn object_kind(mut self, kind: ObjectKind) -> Self {
        self.object_kind = kind;
        self
    }

    #[must_use]
    pub fn immutable(mut self, ids: Option<Vec<ObjectId>>) -> Self {
        self.immutable = ids;
        self
    }

    #[must_use]
    pub const fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Apply the wizard section of the client configuration
    #[must_use]
    pub const fn settings(mut self, settings: &WizardSettings) -> Self {
        self.match_mode = MatchMode::from_anywhere(settings.filter_anywhere);
        self
    }

    /// Comparator keeping both lists ordered
    #[must_use]
    pub fn order(mut self, order: LabelOrder) -> Self {
        self.order = order;
        self
    }

    /// User groups the wizard may need to name
    #[must_use]
    pub fn groups(mut self, groups: Vec<UserGroup>) -> Self {
        self.groups = groups;
        self
    }

    #[must_use]
    pub fn build(self) -> SelectionWizard {
        let state = SelectionState::with_order(self.available, self.selected, self.order)
            .with_immutable(self.immutable);
        SelectionWizard {
            state,
            object_kind: self.object_kind,
            filter_text: String::new(),
            match_mode: self.match_mode,
            groups: self.groups.into_iter().map(|g| (g.id, g.name)).collect(),
            listeners: Vec::new(),
        }
    }
}

impl Default for SelectionWizardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pets_group, tag};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn wizard() -> SelectionWizard {
        SelectionWizard::builder()
            .available(vec![tag(1, "cats"), tag(2, "dogs"), tag(3, "doves")])
            .build()
    }

    #[test]
    fn test_listener_runs_after_change() {
        let mut wizard = wizard();
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        wizard.subscribe(move |change, _| {
            assert!(!change.is_empty());
            *seen.borrow_mut() += 1;
        });

        wizard.handle(WizardAction::Add(vec![tag(1, "cats")]));
        wizard.handle(WizardAction::RemoveAll);

        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_listener_skipped_for_noop() {
        let mut wizard = wizard();
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        wizard.subscribe(move |_, _| *seen.borrow_mut() += 1);

        wizard.handle(WizardAction::RemoveAll);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_filter_narrows_then_widens() {
        let mut wizard = wizard();

        wizard.set_filter_text("d");
        wizard.set_filter_text("do");
        wizard.set_filter_text("dov");
        assert_eq!(wizard.available(), &[tag(3, "doves")]);

        wizard.set_filter_text("do");
        assert_eq!(wizard.available().len(), 2);

        wizard.set_filter_text("");
        assert_eq!(wizard.available().len(), 3);
    }

    #[test]
    fn test_placeholder_text_is_ignored() {
        let mut wizard = wizard();
        wizard.set_filter_text("ca");
        let change = wizard.set_filter_text(DEFAULT_FILTER_TEXT);

        assert!(change.is_empty());
        assert_eq!(wizard.filter_text(), "ca");
    }

    #[test]
    fn test_starts_with_mode() {
        let mut wizard = wizard();
        wizard.set_match_mode(MatchMode::StartsWith);
        wizard.set_filter_text("ogs");
        assert!(wizard.available().is_empty());
    }

    #[test]
    fn test_mode_switch_refilters_current_text() {
        let mut wizard = wizard();
        wizard.set_match_mode(MatchMode::StartsWith);
        wizard.set_filter_text("o");
        assert!(wizard.available().is_empty());

        let change = wizard.set_match_mode(MatchMode::Contains);
        assert!(change.available_changed);
        assert_eq!(wizard.available(), &[tag(2, "dogs"), tag(3, "doves")]);

        wizard.set_filter_text("og");
        assert_eq!(wizard.available(), &[tag(2, "dogs")]);
    }

    #[test]
    fn test_same_mode_is_noop() {
        let mut wizard = wizard();
        wizard.set_filter_text("ca");
        assert!(wizard.set_match_mode(MatchMode::Contains).is_empty());
    }

    #[test]
    fn test_captions() {
        let tags = wizard();
        assert_eq!(tags.caption(Pane::Available), "Available tags:");

        let files = SelectionWizard::builder()
            .object_kind(ObjectKind::Attachment)
            .build();
        assert_eq!(files.caption(Pane::Selected), "Selected attachments:");

        let datasets = SelectionWizard::builder()
            .object_kind(ObjectKind::Dataset)
            .build();
        assert_eq!(datasets.caption(Pane::Available), "Available:");
    }

    #[test]
    fn test_group_name_lookup() {
        let wizard = SelectionWizard::builder()
            .groups(vec![UserGroup::new(3, "lab"), UserGroup::new(4, "imaging")])
            .build();
        assert_eq!(wizard.group_name(4), Some("imaging"));
        assert_eq!(wizard.group_name(5), None);
    }

    #[test]
    fn test_set_immutable_after_build() {
        let mut wizard = SelectionWizard::builder()
            .selected(vec![Leaf::tag(7, "kept")])
            .build();
        wizard.set_immutable(Some(vec![7]));

        wizard.handle(WizardAction::RemoveAll);
        assert_eq!(wizard.selected().len(), 1);
        assert!(wizard.selection().is_empty());
    }

    #[test]
    fn test_add_objects_and_reset() {
        let mut wizard = SelectionWizard::builder().available(vec![pets_group()]).build();
        wizard.add_objects(&[Leaf::tag(-1, "brand new")]);
        assert!(wizard.is_added(&Leaf::tag(-1, "brand new")));

        wizard.reset();
        assert!(wizard.selected().is_empty());
        assert_eq!(wizard.available(), &[pets_group()]);
    }

    #[test]
    fn test_add_empty_objects_is_noop() {
        let mut wizard = wizard();
        assert!(wizard.add_objects(&[]).is_empty());
    }

    #[test]
    fn test_settings_choose_match_mode() {
        let settings = WizardSettings {
            filter_anywhere: false,
        };
        let wizard = SelectionWizard::builder().settings(&settings).build();
        assert_eq!(wizard.match_mode(), MatchMode::StartsWith);
        assert_eq!(SelectionWizard::builder().build().match_mode(), MatchMode::Contains);
    }
}
