//! Session-scoped digest caches.
//!
//! One cache pair lives for the lifetime of a [`crate::SyncClient`] - the
//! session - and is shared by every directory level of a walk. It is owned
//! state, never process-global, so repeated or concurrent sessions cannot
//! stale-read each other. A path appears only after it has been hashed this
//! session; directories are never hashed or cached.

use mirror_types::RemotePath;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Last-known content digests for both sides of the mirror.
///
/// Locks are short and never held across an `await`, which keeps the caches
/// safe under a future concurrent walk without changing this interface.
#[derive(Debug, Default)]
pub struct DigestCaches {
    remote: Mutex<HashMap<RemotePath, String>>,
    local: Mutex<HashMap<PathBuf, String>>,
}

impl DigestCaches {
    /// Create an empty cache pair.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the digest of a remote file.
    pub fn record_remote(&self, path: RemotePath, digest: String) {
        self.remote.lock().unwrap().insert(path, digest);
    }

    /// The last-known digest of a remote file, if hashed this session.
    pub fn remote(&self, path: &RemotePath) -> Option<String> {
        self.remote.lock().unwrap().get(path).cloned()
    }

    /// Record the digest of a local file.
    pub fn record_local(&self, path: PathBuf, digest: String) {
        self.local.lock().unwrap().insert(path, digest);
    }

    /// The last-known digest of a local file, if hashed this session.
    pub fn local(&self, path: &Path) -> Option<String> {
        self.local.lock().unwrap().get(path).cloned()
    }

    /// Drop the cached digest of a removed remote file.
    pub fn evict_remote(&self, path: &RemotePath) {
        self.remote.lock().unwrap().remove(path);
    }

    /// Drop the cached digest of a removed local file.
    pub fn evict_local(&self, path: &Path) {
        self.local.lock().unwrap().remove(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_record_and_lookup() {
        let caches = DigestCaches::new();
        let path = RemotePath::parse("a/b.txt");

        assert_eq!(caches.remote(&path), None);
        caches.record_remote(path.clone(), "abc123".to_string());
        assert_eq!(caches.remote(&path), Some("abc123".to_string()));
    }

    #[test]
    fn local_record_and_lookup() {
        let caches = DigestCaches::new();
        let path = PathBuf::from("base/a.txt");

        caches.record_local(path.clone(), "def456".to_string());
        assert_eq!(caches.local(&path), Some("def456".to_string()));
    }

    #[test]
    fn eviction_removes_entries() {
        let caches = DigestCaches::new();
        let remote = RemotePath::parse("x.txt");
        let local = PathBuf::from("x.txt");
        caches.record_remote(remote.clone(), "1".to_string());
        caches.record_local(local.clone(), "2".to_string());

        caches.evict_remote(&remote);
        caches.evict_local(&local);

        assert_eq!(caches.remote(&remote), None);
        assert_eq!(caches.local(&local), None);
    }

    #[test]
    fn rerecording_overwrites() {
        let caches = DigestCaches::new();
        let path = RemotePath::parse("x.txt");
        caches.record_remote(path.clone(), "old".to_string());
        caches.record_remote(path.clone(), "new".to_string());

        assert_eq!(caches.remote(&path), Some("new".to_string()));
    }
}
