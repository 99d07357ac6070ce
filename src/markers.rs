//! Marker-file discovery
//!
//! Package-manager detection keys off marker files (`.envrc`, lock
//! manifests) that may live in the project directory or any ancestor.

use std::path::{Path, PathBuf};

/// Find the nearest `filename` by walking up from `start`.
///
/// Checks `start` itself first, then each parent directory up to the
/// filesystem root. Returns the path of the first hit.
pub fn find_in_ancestors(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    None
}
