//! Mock transport for testing.
//!
//! Keeps a whole remote tree in memory, renders ls-style raw listings, and
//! records every operation for verification.

use super::{Transport, TransportError};
use async_trait::async_trait;
use mirror_types::RemotePath;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Directory,
}

/// Mock transport for testing.
///
/// Stores the remote tree in a thread-safe map keyed by [`RemotePath`]; the
/// tree root always exists. Allows injecting failures and inspecting the
/// operation log for verification.
#[derive(Debug, Default)]
pub struct MockRemote {
    inner: Arc<Mutex<MockRemoteInner>>,
}

#[derive(Debug, Default)]
struct MockRemoteInner {
    nodes: BTreeMap<RemotePath, Node>,
    operations: Vec<String>,
    fail_next_retrieve: Option<String>,
    fail_next_store: Option<String>,
}

impl MockRemote {
    /// Create a new mock remote with an empty root directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a file at `path`, creating missing parent directories.
    pub fn insert_file(&self, path: &RemotePath, content: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        Self::ensure_parents(&mut inner, path);
        inner.nodes.insert(path.clone(), Node::File(content.to_vec()));
    }

    /// Place an empty directory at `path`, creating missing parents.
    pub fn insert_directory(&self, path: &RemotePath) {
        let mut inner = self.inner.lock().unwrap();
        Self::ensure_parents(&mut inner, path);
        if !path.is_root() {
            inner.nodes.insert(path.clone(), Node::Directory);
        }
    }

    /// The content of the file at `path`, if present.
    pub fn file_content(&self, path: &RemotePath) -> Option<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        match inner.nodes.get(path) {
            Some(Node::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Whether any entry (file or directory) exists at `path`.
    pub fn contains(&self, path: &RemotePath) -> bool {
        path.is_root() || self.inner.lock().unwrap().nodes.contains_key(path)
    }

    /// All stored paths, in order.
    pub fn paths(&self) -> Vec<RemotePath> {
        self.inner.lock().unwrap().nodes.keys().cloned().collect()
    }

    /// The log of operations performed so far, e.g. `"stor a/b.txt"`.
    pub fn operations(&self) -> Vec<String> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Cause the next `retrieve()` to fail with a connection error.
    pub fn fail_next_retrieve(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_retrieve = Some(error.to_string());
    }

    /// Cause the next `store()` to fail with a connection error.
    pub fn fail_next_store(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_store = Some(error.to_string());
    }

    fn ensure_parents(inner: &mut MockRemoteInner, path: &RemotePath) {
        let mut current = RemotePath::root();
        let segments = path.segments();
        if segments.is_empty() {
            return;
        }
        for segment in &segments[..segments.len() - 1] {
            current = current.join(segment);
            inner.nodes.entry(current.clone()).or_insert(Node::Directory);
        }
    }

    fn is_directory(inner: &MockRemoteInner, path: &RemotePath) -> bool {
        path.is_root() || matches!(inner.nodes.get(path), Some(Node::Directory))
    }

    fn children<'a>(
        inner: &'a MockRemoteInner,
        path: &RemotePath,
    ) -> Vec<(&'a str, &'a Node)> {
        inner
            .nodes
            .iter()
            .filter(|(candidate, _)| candidate.parent().as_ref() == Some(path))
            .filter_map(|(candidate, node)| candidate.file_name().map(|name| (name, node)))
            .collect()
    }
}

impl Clone for MockRemote {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockRemote {
    async fn list_names(&self, path: &RemotePath) -> Result<Vec<String>, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(format!("nlst {path}"));
        if !Self::is_directory(&inner, path) {
            return Err(TransportError::NotFound(path.to_string()));
        }
        Ok(Self::children(&inner, path)
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect())
    }

    async fn list_raw(&self, path: &RemotePath) -> Result<String, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(format!("list {path}"));
        if !Self::is_directory(&inner, path) {
            return Err(TransportError::NotFound(path.to_string()));
        }
        let lines: Vec<String> = Self::children(&inner, path)
            .into_iter()
            .map(|(name, node)| match node {
                Node::Directory => {
                    format!("drwxr-xr-x 2 ftp ftp 0 Jan 01 12:34 {name}")
                }
                Node::File(content) => {
                    format!("-rw-r--r-- 1 ftp ftp {} Jan 01 12:34 {name}", content.len())
                }
            })
            .collect();
        Ok(lines.join("\n"))
    }

    async fn retrieve(&self, path: &RemotePath) -> Result<Vec<u8>, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(format!("retr {path}"));
        if let Some(error) = inner.fail_next_retrieve.take() {
            return Err(TransportError::Connection(error));
        }
        match inner.nodes.get(path) {
            Some(Node::File(content)) => Ok(content.clone()),
            _ => Err(TransportError::NotFound(path.to_string())),
        }
    }

    async fn store(&self, path: &RemotePath, data: &[u8]) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(format!("stor {path}"));
        if let Some(error) = inner.fail_next_store.take() {
            return Err(TransportError::Connection(error));
        }
        let parent = path.parent().unwrap_or_default();
        if !Self::is_directory(&inner, &parent) {
            return Err(TransportError::NotFound(parent.to_string()));
        }
        if matches!(inner.nodes.get(path), Some(Node::Directory)) {
            return Err(TransportError::Protocol(format!("is a directory: {path}")));
        }
        inner.nodes.insert(path.clone(), Node::File(data.to_vec()));
        Ok(())
    }

    async fn remove(&self, path: &RemotePath) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(format!("dele {path}"));
        match inner.nodes.get(path) {
            Some(Node::File(_)) => {
                inner.nodes.remove(path);
                Ok(())
            }
            Some(Node::Directory) => {
                Err(TransportError::Protocol(format!("is a directory: {path}")))
            }
            None => Err(TransportError::NotFound(path.to_string())),
        }
    }

    async fn make_directory(&self, path: &RemotePath) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(format!("mkd {path}"));
        if path.is_root() || inner.nodes.contains_key(path) {
            return Err(TransportError::Protocol(format!("already exists: {path}")));
        }
        let parent = path.parent().unwrap_or_default();
        if !Self::is_directory(&inner, &parent) {
            return Err(TransportError::NotFound(parent.to_string()));
        }
        inner.nodes.insert(path.clone(), Node::Directory);
        Ok(())
    }

    async fn remove_directory(&self, path: &RemotePath) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(format!("rmd {path}"));
        if path.is_root() {
            return Err(TransportError::Protocol("cannot remove root".to_string()));
        }
        match inner.nodes.get(path) {
            Some(Node::Directory) => {
                if !Self::children(&inner, path).is_empty() {
                    return Err(TransportError::Protocol(format!(
                        "directory not empty: {path}"
                    )));
                }
                inner.nodes.remove(path);
                Ok(())
            }
            Some(Node::File(_)) => {
                Err(TransportError::Protocol(format!("not a directory: {path}")))
            }
            None => Err(TransportError::NotFound(path.to_string())),
        }
    }

    async fn size(&self, path: &RemotePath) -> Result<u64, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(format!("size {path}"));
        match inner.nodes.get(path) {
            Some(Node::File(content)) => Ok(content.len() as u64),
            _ => Err(TransportError::NotFound(path.to_string())),
        }
    }
}
