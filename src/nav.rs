//! Breadcrumb navigation state for vdrive.
//!
//! Pure client-side trail of ancestor folders from the root to the folder
//! currently open. Nothing here touches the database; a fresh session
//! starts a fresh trail at the root.

use crate::drive::ROOT_ID;

/// Display name of the root crumb.
pub const ROOT_NAME: &str = "Home";

/// One entry in the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    /// Folder ID.
    pub id: String,
    /// Folder display name.
    pub name: String,
}

impl Crumb {
    fn root() -> Self {
        Self {
            id: ROOT_ID.to_string(),
            name: ROOT_NAME.to_string(),
        }
    }
}

/// Ordered ancestor chain from the root to the currently open folder.
///
/// The trail is never empty and always starts with the root entry; its last
/// entry is the folder on display.
#[derive(Debug, Clone)]
pub struct Trail {
    entries: Vec<Crumb>,
}

impl Trail {
    /// Create a trail positioned at the root.
    pub fn new() -> Self {
        Self {
            entries: vec![Crumb::root()],
        }
    }

    /// Move the trail to a folder.
    ///
    /// - The root id resets the trail to the single root entry.
    /// - An id already in the trail truncates it to end at that entry
    ///   (ancestor click).
    /// - Any other id is appended (descend into a child).
    pub fn navigate_to(&mut self, id: &str, name: &str) {
        if id == ROOT_ID {
            self.entries.truncate(1);
            return;
        }

        if let Some(pos) = self.entries.iter().position(|crumb| crumb.id == id) {
            self.entries.truncate(pos + 1);
        } else {
            self.entries.push(Crumb {
                id: id.to_string(),
                name: name.to_string(),
            });
        }
    }

    /// The folder currently on display.
    pub fn current(&self) -> &Crumb {
        self.entries.last().expect("trail is never empty")
    }

    /// True when the trail sits at the root.
    pub fn is_at_root(&self) -> bool {
        self.entries.len() == 1
    }

    /// Number of entries, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the root entry cannot be removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The full trail, root first.
    pub fn entries(&self) -> &[Crumb] {
        &self.entries
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}
