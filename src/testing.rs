//! Testing utilities for curator
//!
//! Small constructors for the items the wizard tests keep building, plus a
//! temporary home directory for logger tests.
//!
//! Only available when compiled with `cfg(test)`.

use crate::wizard::{Group, Item, Leaf, ObjectId, ObjectKind};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A tag as an available item
#[must_use]
pub fn tag(id: ObjectId, label: &str) -> Item {
    Item::Leaf(Leaf::tag(id, label))
}

#[must_use]
pub fn dataset(id: ObjectId, label: &str) -> Item {
    Item::Leaf(Leaf::new(id, ObjectKind::Dataset, label))
}

#[must_use]
pub fn attachment(id: ObjectId, label: &str) -> Item {
    Item::Leaf(Leaf::new(id, ObjectKind::Attachment, label))
}

/// Tag-set "pets" (id 20) holding the tags "cat" (21) and "dog" (22)
#[must_use]
pub fn pets_group() -> Item {
    Item::Group(Group::new(
        20,
        "pets",
        vec![Leaf::tag(21, "cat"), Leaf::tag(22, "dog")],
    ))
}

/// Temporary user home, removed on drop
///
/// # Examples
/// ```ignore
/// let home = TestHome::new();
/// let log_dir = home.path().join(".curator").join("log");
/// ```
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    /// Create an empty home directory
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temporary home"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Join `relative` onto the home directory
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}
