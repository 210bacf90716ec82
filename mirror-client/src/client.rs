//! SyncClient - the main interface for treemirror.
//!
//! This module provides [`SyncClient`], the recursive driver that walks the
//! local and remote trees one directory level at a time and reconciles them.
//!
//! # Architecture
//!
//! SyncClient uses pure decision logic (from mirror-core) to classify
//! listings and partition name sets, and interprets the results as I/O
//! against the local filesystem and the [`Transport`] collaborator.
//!
//! ```text
//! Application → SyncClient → Transport → remote session
//!                   ↓
//!              mirror-core (pure classification and diffing)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use mirror_client::{MockRemote, SyncClient};
//! use mirror_types::{RemotePath, SyncMode};
//!
//! let client = SyncClient::new(MockRemote::new());
//! let report = client
//!     .sync(local_base, &RemotePath::root(), SyncMode::MirrorToRemote)
//!     .await?;
//! ```

use std::collections::BTreeSet;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use mirror_core::listing;
use mirror_core::NamePartition;
use mirror_types::{RemotePath, SyncMode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cascade;
use crate::hasher;
use crate::session::DigestCaches;
use crate::transport::{Transport, TransportError};

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A transport operation failed; the run is aborted.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A local filesystem operation failed; the run is aborted.
    #[error("local i/o error: {0}")]
    Io(#[from] io::Error),
}

/// A local file left out of the run, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// The local path that was skipped.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// The outcome of one synchronization run.
///
/// A run either returns this report or aborts on the first unrecovered
/// transport failure, leaving the trees partially synchronized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Files transferred remote → local.
    pub files_downloaded: u64,
    /// Files transferred local → remote.
    pub files_uploaded: u64,
    /// Remote entries (files and directories) pruned.
    pub entries_deleted_remote: u64,
    /// Total bytes moved in either direction.
    pub bytes_transferred: u64,
    /// Local files skipped because they could not be read.
    pub skipped: Vec<SkippedFile>,
}

impl SyncReport {
    /// Whether the run moved or deleted anything.
    pub fn changed_anything(&self) -> bool {
        self.files_downloaded > 0 || self.files_uploaded > 0 || self.entries_deleted_remote > 0
    }
}

/// The synchronization session.
///
/// Owns the transport session and the digest caches; both live exactly as
/// long as the client, so repeated runs on one client share last-known
/// digests while separate clients never observe each other's state.
pub struct SyncClient<T: Transport> {
    transport: T,
    caches: DigestCaches,
}

impl<T: Transport> SyncClient<T> {
    /// Create a new client around an established transport session.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            caches: DigestCaches::new(),
        }
    }

    /// Get a reference to the underlying transport (for testing).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a reference to the session digest caches.
    pub fn caches(&self) -> &DigestCaches {
        &self.caches
    }

    /// Synchronize `remote_root` and the local tree below `local_base`.
    ///
    /// Walks both trees depth-first in lockstep. Under both modes, new or
    /// changed local files are uploaded; `mode` selects whether remote
    /// content is downloaded ([`SyncMode::MirrorToLocal`]) or whether remote
    /// entries absent locally are pruned ([`SyncMode::MirrorToRemote`]).
    pub async fn sync(
        &self,
        local_base: &Path,
        remote_root: &RemotePath,
        mode: SyncMode,
    ) -> Result<SyncReport, ClientError> {
        let mut report = SyncReport::default();
        self.sync_level(local_base, remote_root.clone(), mode, &mut report)
            .await?;
        info!(
            ?mode,
            downloaded = report.files_downloaded,
            uploaded = report.files_uploaded,
            deleted = report.entries_deleted_remote,
            skipped = report.skipped.len(),
            "synchronization finished"
        );
        Ok(report)
    }

    /// Remove entries from either side.
    ///
    /// `local` removes a single local file. `remote` removes a file, or a
    /// directory together with everything below it, children first. Returns
    /// the number of entries removed.
    pub async fn delete(
        &self,
        local: Option<&Path>,
        remote: Option<&RemotePath>,
    ) -> Result<u64, ClientError> {
        let mut removed = 0;
        if let Some(path) = local {
            cascade::remove_local(path, &self.caches).await?;
            removed += 1;
        }
        if let Some(path) = remote {
            removed += cascade::remove_remote(&self.transport, &self.caches, path).await?;
        }
        Ok(removed)
    }

    /// Reconcile one directory level, recursing into subdirectories.
    fn sync_level<'a>(
        &'a self,
        local_base: &'a Path,
        dir: RemotePath,
        mode: SyncMode,
        report: &'a mut SyncReport,
    ) -> Pin<Box<dyn Future<Output = Result<(), ClientError>> + Send + 'a>> {
        Box::pin(async move {
            let local_dir = dir.to_local(local_base);
            tokio::fs::create_dir_all(&local_dir).await?;

            let local_names = list_local_names(&local_dir).await?;
            let local_set: BTreeSet<String> = local_names.iter().cloned().collect();

            // A listing failure for a directory that does not exist yet is
            // self-healing: create it remotely and continue with an empty
            // entry set. Anything else aborts the run.
            let remote_names = match self.transport.list_names(&dir).await {
                Ok(names) => names,
                Err(TransportError::NotFound(_)) => {
                    debug!(path = %dir, "remote directory missing, creating");
                    self.transport.make_directory(&dir).await?;
                    Vec::new()
                }
                Err(err) => return Err(err.into()),
            };
            let remote_set: BTreeSet<String> = remote_names.iter().cloned().collect();

            let raw = self.transport.list_raw(&dir).await?;
            let entries = listing::classify(&remote_names, &raw);
            let partition = NamePartition::compute(&local_set, &remote_set);

            // Download pass: walk the remote listing. Every remote file is
            // hashed into the session cache here, whichever mode is active;
            // the upload pass compares against these digests.
            for entry in &entries {
                let child_remote = dir.join(&entry.name);
                let child_local = local_dir.join(&entry.name);

                if !entry.is_directory() {
                    let digest = hasher::remote_digest(&self.transport, &child_remote).await?;
                    self.caches.record_remote(child_remote.clone(), digest);
                }

                match mode {
                    SyncMode::MirrorToLocal => {
                        if entry.is_directory() {
                            tokio::fs::create_dir_all(&child_local).await?;
                            self.sync_level(local_base, child_remote, mode, report)
                                .await?;
                        } else {
                            // Change detection on the download side compares
                            // byte sizes only; the digest is not consulted.
                            let needs_download = if local_set.contains(&entry.name) {
                                match tokio::fs::metadata(&child_local).await {
                                    Ok(meta) if meta.is_file() => {
                                        meta.len() != self.transport.size(&child_remote).await?
                                    }
                                    Ok(_) => false,
                                    Err(_) => true,
                                }
                            } else {
                                true
                            };
                            if partition.download.contains(&entry.name) && needs_download {
                                let data = self.transport.retrieve(&child_remote).await?;
                                tokio::fs::write(&child_local, &data).await?;
                                report.files_downloaded += 1;
                                report.bytes_transferred += data.len() as u64;
                                debug!(path = %child_remote, bytes = data.len(), "downloaded");
                            }
                        }
                    }
                    SyncMode::MirrorToRemote => {
                        if partition.download.contains(&entry.name) {
                            // Absent locally: mirror the absence remotely.
                            report.entries_deleted_remote += cascade::remove_remote(
                                &self.transport,
                                &self.caches,
                                &child_remote,
                            )
                            .await?;
                        } else if entry.is_directory() {
                            self.sync_level(local_base, child_remote, mode, report)
                                .await?;
                        }
                    }
                }
            }

            // Upload pass: identical under both modes. New or changed local
            // content always moves to the remote side.
            for name in &local_names {
                let child_local = local_dir.join(name);
                let child_remote = dir.join(name);
                let meta = tokio::fs::metadata(&child_local).await?;

                if meta.is_dir() {
                    if partition.upload.contains(name) {
                        self.sync_level(local_base, child_remote, mode, report)
                            .await?;
                    }
                    continue;
                }

                let digest = match hasher::local_digest(&child_local).await {
                    Ok(digest) => digest,
                    Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                        self.record_skip(report, &child_local, &err);
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };
                self.caches.record_local(child_local.clone(), digest.clone());

                // Change detection on the upload side compares digests, both
                // taken from this session's caches.
                let needs_upload = if remote_set.contains(name) {
                    match self.caches.remote(&child_remote) {
                        Some(remote_digest) => digest != remote_digest,
                        None => true,
                    }
                } else {
                    true
                };
                if needs_upload {
                    let data = match tokio::fs::read(&child_local).await {
                        Ok(data) => data,
                        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                            self.record_skip(report, &child_local, &err);
                            continue;
                        }
                        Err(err) => return Err(err.into()),
                    };
                    self.transport.store(&child_remote, &data).await?;
                    report.files_uploaded += 1;
                    report.bytes_transferred += data.len() as u64;
                    debug!(path = %child_remote, bytes = data.len(), "uploaded");
                }
            }

            Ok(())
        })
    }

    fn record_skip(&self, report: &mut SyncReport, path: &Path, err: &io::Error) {
        warn!(path = %path.display(), %err, "skipping unreadable local file");
        report.skipped.push(SkippedFile {
            path: path.to_path_buf(),
            reason: err.to_string(),
        });
    }
}

/// Names of the immediate children of a local directory, sorted.
async fn list_local_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut reader = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
