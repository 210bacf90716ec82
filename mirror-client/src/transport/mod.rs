//! Transport abstraction over the remote file-transfer session.
//!
//! This module provides a pluggable transport layer that abstracts the
//! underlying file-transfer protocol (FTP-style session, mock for testing).
//!
//! # Design
//!
//! The trait exposes the eight primitive verbs the synchronizer consumes.
//! Implementations are assumed to wrap one reliable, already-authenticated
//! session; connection establishment, login and credentials are outside this
//! crate. Listing a path that does not exist fails with
//! [`TransportError::NotFound`], which the orchestrator interprets as
//! "directory not created yet" and self-heals.
//!
//! # Example
//!
//! ```ignore
//! let remote = MockRemote::new();
//! remote.insert_file(&RemotePath::parse("a.txt"), b"hello");
//! let names = remote.list_names(&RemotePath::root()).await?;
//! ```

mod mock;

pub use mock::MockRemote;

use async_trait::async_trait;
use mirror_types::RemotePath;
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The path does not exist on the remote side.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote session rejected the operation.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The underlying connection failed mid-operation.
    #[error("connection error: {0}")]
    Connection(String),
}

/// The primitive operations of the remote file-transfer session.
///
/// Implementations handle the underlying protocol (FTP, SFTP, mock, etc).
/// Every operation blocks its caller until complete; there is no
/// cancellation or timeout contract at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Names of the immediate children of `path`.
    ///
    /// Fails with [`TransportError::NotFound`] if the path is absent.
    async fn list_names(&self, path: &RemotePath) -> Result<Vec<String>, TransportError>;

    /// Raw per-entry listing text for `path`, one ls-style line per entry,
    /// sufficient to classify directories against files.
    async fn list_raw(&self, path: &RemotePath) -> Result<String, TransportError>;

    /// Full content read of a remote file.
    async fn retrieve(&self, path: &RemotePath) -> Result<Vec<u8>, TransportError>;

    /// Full content write; creates or overwrites the remote file.
    async fn store(&self, path: &RemotePath, data: &[u8]) -> Result<(), TransportError>;

    /// Delete a single remote file.
    async fn remove(&self, path: &RemotePath) -> Result<(), TransportError>;

    /// Create an empty remote directory.
    async fn make_directory(&self, path: &RemotePath) -> Result<(), TransportError>;

    /// Delete an empty remote directory.
    ///
    /// Deleting a non-empty directory is a protocol error; callers must
    /// empty it first.
    async fn remove_directory(&self, path: &RemotePath) -> Result<(), TransportError>;

    /// Size in bytes of a remote file.
    async fn size(&self, path: &RemotePath) -> Result<u64, TransportError>;
}
