//! # mirror-types
//!
//! Foundational types for the treemirror directory synchronizer.
//!
//! This crate provides the types shared across all treemirror crates:
//! - [`Entry`], [`EntryKind`] - Typed directory listing entries
//! - [`RemotePath`] - Structured, platform-neutral remote paths
//! - [`SyncMode`] - The two mirroring directions

#![warn(missing_docs)]
#![warn(clippy::all)]

mod entry;
mod mode;
mod path;

pub use entry::{Entry, EntryKind};
pub use mode::SyncMode;
pub use path::RemotePath;
