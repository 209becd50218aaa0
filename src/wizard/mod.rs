//! Dual-list selection wizard
//!
//! Moves items between an "available" and a "selected" list:
//! 1. Leaves (tags, attachments, datasets) move one by one or in bulk
//! 2. Groups (tag-sets) transfer their children and leave the lists
//! 3. Immutable selected items are never removed
//! 4. The available list can be filtered by label
//!
//! [`SelectionState`] holds the pure transitions; [`SelectionWizard`] wires
//! them to UI events and change listeners.

pub mod filter;
pub mod item;
pub mod session;
pub mod state;

pub use filter::{DEFAULT_FILTER_TEXT, FilterPass, FilterQuery, MatchMode};
pub use item::{Group, Item, LabelOrder, Leaf, ObjectId, ObjectKind, Parent, case_insensitive};
pub use session::{Pane, SelectionListener, SelectionWizard, SelectionWizardBuilder, WizardAction};
pub use state::{SelectionChange, SelectionState, Transition};
