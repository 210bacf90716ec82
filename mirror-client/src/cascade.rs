//! Recursive deletion of synchronized entries.
//!
//! The transport can only delete empty directories, so removing a remote
//! directory means emptying it child-by-child first, descending as deep as
//! the tree goes. Whether a path is a directory is decided by re-listing its
//! parent's classification at deletion time, not by trusting stale state.

use crate::client::ClientError;
use crate::session::DigestCaches;
use crate::transport::Transport;
use mirror_core::listing;
use mirror_types::RemotePath;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tracing::debug;

/// Remove a single local file and evict its cached digest.
pub(crate) async fn remove_local(path: &Path, caches: &DigestCaches) -> Result<(), ClientError> {
    tokio::fs::remove_file(path).await?;
    caches.evict_local(path);
    debug!(path = %path.display(), "removed local file");
    Ok(())
}

/// Remove `path` on the remote side, descending into directories before
/// removing the directory itself. Returns the number of entries removed.
pub(crate) fn remove_remote<'a, T: Transport>(
    transport: &'a T,
    caches: &'a DigestCaches,
    path: &'a RemotePath,
) -> Pin<Box<dyn Future<Output = Result<u64, ClientError>> + Send + 'a>> {
    Box::pin(async move {
        let parent = path.parent().unwrap_or_default();
        let raw = transport.list_raw(&parent).await?;
        let directories = listing::directory_names(&raw);
        let is_directory = path
            .file_name()
            .map(|name| directories.contains(name))
            .unwrap_or(false);

        if is_directory {
            let mut removed = 0;
            for child in transport.list_names(path).await? {
                removed += remove_remote(transport, caches, &path.join(&child)).await?;
            }
            transport.remove_directory(path).await?;
            debug!(path = %path, "removed remote directory");
            Ok(removed + 1)
        } else {
            transport.remove(path).await?;
            caches.evict_remote(path);
            debug!(path = %path, "removed remote file");
            Ok(1)
        }
    })
}
