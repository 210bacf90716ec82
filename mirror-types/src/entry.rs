//! Typed directory listing entries.

use serde::{Deserialize, Serialize};

/// Whether a listed entry is a file or a directory.
///
/// Transfer and recursion decisions differ by kind, so classification
/// happens once per listing and the result is carried alongside the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// A regular file, eligible for transfer and digesting.
    File,
    /// A directory, eligible for recursion, never digested.
    Directory,
}

/// One entry of a directory listing.
///
/// Derived per listing call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The entry's name within its directory.
    pub name: String,
    /// File or directory.
    pub kind: EntryKind,
}

impl Entry {
    /// Create a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Whether this entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Entry::file("a.txt").kind, EntryKind::File);
        assert!(Entry::directory("docs").is_directory());
        assert!(!Entry::file("a.txt").is_directory());
    }
}
