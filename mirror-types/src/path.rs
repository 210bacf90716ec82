//! Structured remote paths.
//!
//! Remote paths are kept as ordered segment lists rather than strings so that
//! separator conventions never leak between sides. Conversion happens only at
//! the boundaries: [`RemotePath::to_local`] for filesystem call sites and
//! [`std::fmt::Display`] (`/`-joined) for transport call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A platform-neutral relative path on the remote side.
///
/// The root of the synchronized tree is the empty path, which displays as
/// an empty string (the transport's convention for "current directory").
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RemotePath {
    segments: Vec<String>,
}

impl RemotePath {
    /// The root of the synchronized tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `/`-separated path, ignoring empty segments.
    ///
    /// `"a/b"`, `"/a/b"` and `"a//b/"` all parse to the same path.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Whether this is the tree root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path of a child entry named `name`.
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The final segment, or `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The ordered segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments (0 for the root).
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Map this path onto the local filesystem below `base`.
    ///
    /// Each segment becomes one local path component, so the local platform's
    /// separator convention applies without any string rewriting.
    pub fn to_local(&self, base: &Path) -> PathBuf {
        let mut local = base.to_path_buf();
        for segment in &self.segments {
            local.push(segment);
        }
        local
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl fmt::Debug for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RemotePath({})", self)
    }
}
