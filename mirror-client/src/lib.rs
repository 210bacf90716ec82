//! # mirror-client
//!
//! Directory tree mirroring over a file-transfer session.
//!
//! This is the main library that applications use to synchronize a local
//! directory tree with a remote one.
//!
//! ## Features
//!
//! - **Transport Abstraction**: Pluggable transport layer (any file-transfer
//!   session implementing [`Transport`]; [`MockRemote`] for tests)
//! - **Content Digests**: MD5 change detection with session-scoped caches
//! - **Two Mirroring Directions**: remote-as-truth downloads or local-as-truth
//!   remote pruning, with uploads in both
//! - **Pure Decision Logic**: Uses mirror-core for side-effect-free
//!   classification and diffing
//!
//! ## Example
//!
//! ```ignore
//! use mirror_client::{MockRemote, SyncClient};
//! use mirror_types::{RemotePath, SyncMode};
//!
//! let client = SyncClient::new(MockRemote::new());
//! let report = client
//!     .sync(Path::new("/srv/mirror"), &RemotePath::root(), SyncMode::MirrorToLocal)
//!     .await?;
//! println!("downloaded {} files", report.files_downloaded);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cascade;
pub mod client;
pub mod hasher;
pub mod session;
pub mod transport;

pub use client::{ClientError, SkippedFile, SyncClient, SyncReport};
pub use session::DigestCaches;
pub use transport::{MockRemote, Transport, TransportError};
