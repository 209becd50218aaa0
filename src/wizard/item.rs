//! Display items shown in the selection wizard
//!
//! An [`Item`] is either a plain [`Leaf`] (a tag, an attachment, a dataset)
//! or a [`Group`] owning leaves (a tag-set). Groups are never selected
//! themselves: selecting one transfers its children.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identifier of a domain object. Negative values mark objects that are
/// not saved yet.
pub type ObjectId = i64;

/// Kind of domain object wrapped by a display item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Tag annotation
    Tag,
    /// Tag-set (a tag grouping other tags)
    TagSet,
    /// File attachment
    Attachment,
    /// Dataset container
    Dataset,
    /// Anything else; never matched by a non-empty filter
    Other,
}

impl ObjectKind {
    /// Plural noun used in pane captions, if the kind has one
    #[must_use]
    pub const fn caption_noun(&self) -> Option<&'static str> {
        match self {
            Self::Tag | Self::TagSet => Some("tags"),
            Self::Attachment => Some("attachments"),
            Self::Dataset | Self::Other => None,
        }
    }

    /// Whether the filter matches items of this kind by label
    #[must_use]
    pub const fn is_filterable(&self) -> bool {
        matches!(self, Self::Tag | Self::Attachment | Self::Dataset)
    }
}

/// Structural parent of a leaf in the display tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parent {
    /// A real domain object, e.g. the tag-set owning a tag
    Group(ObjectId),
    /// A synthetic grouping node with no domain object behind it
    Folder(String),
}

/// A display node with no children
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leaf {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub label: String,
    /// Non-owning reference to the enclosing node
    pub parent: Option<Parent>,
}

impl Leaf {
    /// Create a leaf with no parent
    #[must_use]
    pub fn new(id: ObjectId, kind: ObjectKind, label: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            parent: None,
        }
    }

    /// Create a tag leaf
    #[must_use]
    pub fn tag(id: ObjectId, label: impl Into<String>) -> Self {
        Self::new(id, ObjectKind::Tag, label)
    }

    /// Attach the leaf to a parent node
    #[must_use]
    pub fn with_parent(mut self, parent: Parent) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Id of the owning group, when the parent is a real domain object
    #[must_use]
    pub const fn group_id(&self) -> Option<ObjectId> {
        match self.parent {
            Some(Parent::Group(id)) => Some(id),
            _ => None,
        }
    }

    /// Whether the leaf stands for an object that is not saved yet
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id < 0
    }
}

/// A display node owning child leaves (a tag-set)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    pub id: ObjectId,
    pub label: String,
    pub children: Vec<Leaf>,
}

impl Group {
    /// Create a tag-set group; children get this group as their parent
    #[must_use]
    pub fn new(id: ObjectId, label: impl Into<String>, children: Vec<Leaf>) -> Self {
        let children = children
            .into_iter()
            .map(|child| child.with_parent(Parent::Group(id)))
            .collect();
        Self {
            id,
            label: label.into(),
            children,
        }
    }
}

/// Entry of the available list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Leaf(Leaf),
    Group(Group),
}

impl Item {
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        match self {
            Self::Leaf(leaf) => leaf.id,
            Self::Group(group) => group.id,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.label,
            Self::Group(group) => &group.label,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Leaf(leaf) => leaf.kind,
            Self::Group(_) => ObjectKind::TagSet,
        }
    }

    /// The leaf, if this item is one
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    /// Whether this item is the given leaf
    #[must_use]
    pub fn is_leaf(&self, other: &Leaf) -> bool {
        self.as_leaf() == Some(other)
    }
}

impl From<Leaf> for Item {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<Group> for Item {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Anything ordered by its display label
pub trait Labelled {
    fn label(&self) -> &str;
}

impl Labelled for Item {
    fn label(&self) -> &str {
        Item::label(self)
    }
}

impl Labelled for Leaf {
    fn label(&self) -> &str {
        &self.label
    }
}

/// Comparator over display labels used to keep both lists ordered
pub type LabelOrder = fn(&str, &str) -> Ordering;

/// Case-insensitive label order, the default for both lists
#[must_use]
pub fn case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable sort of `items` by label under `order`
pub fn sort_by_label<T: Labelled>(items: &mut [T], order: LabelOrder) {
    items.sort_by(|a, b| order(a.label(), b.label()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_children_point_to_group() {
        let group = Group::new(7, "animals", vec![Leaf::tag(1, "cat"), Leaf::tag(2, "dog")]);
        assert!(group.children.iter().all(|c| c.group_id() == Some(7)));
    }

    #[test]
    fn test_folder_parent_is_not_a_group() {
        let leaf = Leaf::tag(3, "x").with_parent(Parent::Folder("recent".into()));
        assert_eq!(leaf.group_id(), None);
    }

    #[test]
    fn test_sort_is_case_insensitive_and_stable() {
        let mut items: Vec<Item> = vec![
            Leaf::tag(1, "beta").into(),
            Leaf::tag(2, "Alpha").into(),
            Leaf::tag(3, "alpha").into(),
        ];
        sort_by_label(&mut items, case_insensitive);
        let ids: Vec<ObjectId> = items.iter().map(Item::id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_caption_nouns() {
        assert_eq!(ObjectKind::Tag.caption_noun(), Some("tags"));
        assert_eq!(ObjectKind::Attachment.caption_noun(), Some("attachments"));
        assert_eq!(ObjectKind::Dataset.caption_noun(), None);
    }

    #[test]
    fn test_new_leaf_has_negative_id() {
        assert!(Leaf::tag(-1, "fresh").is_new());
        assert!(!Leaf::tag(0, "saved").is_new());
    }
}
