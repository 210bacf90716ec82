//! Name-set difference partitioning.
//!
//! Given the entry names of the same directory on both sides, the symmetric
//! difference is split into the names only the remote side has (download
//! candidates) and the names only the local side has (upload candidates).
//! Names present on both sides are not emitted; per-entry change detection
//! for those is the orchestrator's job.

use std::collections::BTreeSet;

/// The partition of a directory's symmetric name difference.
///
/// Invariants, for any inputs:
/// - `download` and `upload` are disjoint
/// - their union is exactly the symmetric difference of the inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePartition {
    /// Names present remotely but absent locally.
    pub download: BTreeSet<String>,
    /// Names present locally but absent remotely.
    pub upload: BTreeSet<String>,
}

impl NamePartition {
    /// Partition the symmetric difference of `local` and `remote`.
    pub fn compute(local: &BTreeSet<String>, remote: &BTreeSet<String>) -> Self {
        let difference: BTreeSet<String> =
            local.symmetric_difference(remote).cloned().collect();
        Self {
            download: difference.intersection(remote).cloned().collect(),
            upload: difference.intersection(local).cloned().collect(),
        }
    }

    /// Whether both sides list exactly the same names.
    pub fn is_empty(&self) -> bool {
        self.download.is_empty() && self.upload.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn disjoint_inputs_split_cleanly() {
        let partition = NamePartition::compute(&names(&["a", "b"]), &names(&["c"]));
        assert_eq!(partition.upload, names(&["a", "b"]));
        assert_eq!(partition.download, names(&["c"]));
    }

    #[test]
    fn common_names_are_not_emitted() {
        let partition =
            NamePartition::compute(&names(&["a", "b", "c"]), &names(&["b", "c", "d"]));
        assert_eq!(partition.upload, names(&["a"]));
        assert_eq!(partition.download, names(&["d"]));
    }

    #[test]
    fn identical_sets_partition_empty() {
        let set = names(&["x", "y"]);
        let partition = NamePartition::compute(&set, &set);
        assert!(partition.is_empty());
    }

    #[test]
    fn empty_local_downloads_everything() {
        let partition = NamePartition::compute(&BTreeSet::new(), &names(&["a", "b"]));
        assert_eq!(partition.download, names(&["a", "b"]));
        assert!(partition.upload.is_empty());
    }

    #[test]
    fn empty_remote_uploads_everything() {
        let partition = NamePartition::compute(&names(&["a", "b"]), &BTreeSet::new());
        assert_eq!(partition.upload, names(&["a", "b"]));
        assert!(partition.download.is_empty());
    }

    #[test]
    fn partition_law_holds() {
        // download ∩ upload = ∅ and download ∪ upload = local Δ remote,
        // checked over a spread of overlapping inputs.
        let cases = [
            (names(&[]), names(&[])),
            (names(&["a"]), names(&["a"])),
            (names(&["a", "b", "c"]), names(&["b", "d"])),
            (names(&["1", "2", "3", "4"]), names(&["3", "4", "5", "6"])),
            (names(&["only-local"]), names(&["only-remote"])),
        ];
        for (local, remote) in &cases {
            let partition = NamePartition::compute(local, remote);
            assert!(partition.download.is_disjoint(&partition.upload));
            let union: BTreeSet<String> = partition
                .download
                .union(&partition.upload)
                .cloned()
                .collect();
            let symmetric: BTreeSet<String> =
                local.symmetric_difference(remote).cloned().collect();
            assert_eq!(union, symmetric);
        }
    }
}
