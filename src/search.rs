//! Glob-based discovery of metadata dumps under a search root.

use crate::error::SearchError;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// `*` stays within one path component; `**` crosses directories.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Recursively collect files under `root` whose path relative to `root`
/// matches any of `globs`. Results are sorted and free of duplicates.
pub fn find_files(root: &Path, globs: &[String]) -> Result<Vec<PathBuf>, SearchError> {
    if !root.is_dir() {
        return Err(SearchError::NotADirectory(root.to_path_buf()));
    }
    let patterns = globs
        .iter()
        .map(|g| {
            Pattern::new(g).map_err(|e| SearchError::InvalidPattern {
                pattern: g.clone(),
                message: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if patterns
            .iter()
            .any(|p| p.matches_path_with(relative, MATCH_OPTIONS))
        {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files.dedup();

    debug!(
        root = %root.display(),
        patterns = ?globs,
        files_count = files.len(),
        "Metadata files discovered"
    );
    Ok(files)
}
