//! Content digests.
//!
//! Change detection fingerprints files with MD5, hex-encoded, matching the
//! digests the remote side's tooling reports. Local files are streamed
//! through the hasher in fixed-size chunks; remote files must be retrieved
//! in full first, so computing a remote digest costs a whole transfer, not
//! just a metadata call.

use crate::transport::{Transport, TransportError};
use md5::{Digest, Md5};
use mirror_types::RemotePath;
use std::io;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Chunk size for streaming local files through the hasher.
const READ_CHUNK: usize = 8 * 1024;

/// Digest a byte slice, returning lowercase hex.
pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Stream the full content of a local file through the hasher.
pub async fn local_digest(path: &Path) -> io::Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let read = file.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Retrieve a remote file in full and digest its content.
pub async fn remote_digest<T: Transport + ?Sized>(
    transport: &T,
    path: &RemotePath,
) -> Result<String, TransportError> {
    let bytes = transport.retrieve(path).await?;
    Ok(digest_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockRemote;

    // Reference vectors from RFC 1321.
    #[test]
    fn digest_matches_known_vectors() {
        assert_eq!(digest_bytes(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(digest_bytes(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[tokio::test]
    async fn local_digest_streams_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.bin");
        // Larger than one read chunk, so the loop runs more than once.
        let content = vec![0xA5u8; READ_CHUNK * 3 + 17];
        std::fs::write(&path, &content).unwrap();

        let digest = local_digest(&path).await.unwrap();
        assert_eq!(digest, digest_bytes(&content));
    }

    #[tokio::test]
    async fn local_digest_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = local_digest(&dir.path().join("ghost")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn remote_digest_costs_a_full_retrieve() {
        let remote = MockRemote::new();
        let path = RemotePath::parse("x.bin");
        remote.insert_file(&path, b"remote content");

        let digest = remote_digest(&remote, &path).await.unwrap();

        assert_eq!(digest, digest_bytes(b"remote content"));
        assert_eq!(remote.operations(), vec!["retr x.bin".to_string()]);
    }
}
