//! Synchronization modes.

use serde::{Deserialize, Serialize};

/// The mirroring direction of a synchronization run.
///
/// Uploads of new or changed local content happen under both modes; the mode
/// only selects the download direction and which side deletions mirror to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncMode {
    /// The remote tree is the source of truth: missing files are downloaded
    /// and remote subdirectories are materialized locally.
    MirrorToLocal,
    /// The local tree is the source of truth: remote entries with no local
    /// counterpart are pruned from the remote side.
    MirrorToRemote,
}

impl SyncMode {
    /// Whether this mode deletes remote entries that are absent locally.
    pub fn prunes_remote(&self) -> bool {
        matches!(self, Self::MirrorToRemote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_mirror_to_remote_prunes() {
        assert!(SyncMode::MirrorToRemote.prunes_remote());
        assert!(!SyncMode::MirrorToLocal.prunes_remote());
    }
}
