use super::document::{load_config, RoutingConfig};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names probed in each directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["routelens.json", "routelens.yaml", "routelens.yml"];

/// Maximum number of ancestor directories searched.
const MAX_SEARCH_DEPTH: usize = 20;

/// First configuration file present directly in `dir`.
pub fn find_config_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Walk up from `start` (a file or directory) to the nearest directory
/// holding a configuration file.
pub fn find_nearest_config(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_dir() {
        Some(start)
    } else {
        start.parent()
    };
    for _ in 0..MAX_SEARCH_DEPTH {
        let current = dir?;
        if let Some(found) = find_config_in(current) {
            return Some(found);
        }
        dir = current.parent();
    }
    None
}

/// Resolve and load the configuration applying to one metadata file.
///
/// An explicit path must exist. Otherwise the search root is probed first,
/// then the ancestors of `module_path`. `Ok(None)` means no document was
/// found.
pub fn resolve_config(
    explicit: Option<&Path>,
    search_root: Option<&Path>,
    module_path: &Path,
) -> Result<Option<RoutingConfig>, ConfigError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => search_root
            .and_then(find_config_in)
            .or_else(|| find_nearest_config(module_path)),
    };
    let Some(path) = path else {
        debug!(module = %module_path.display(), "No routing config found");
        return Ok(None);
    };
    load_config(&path).map(Some)
}
