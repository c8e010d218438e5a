use super::types::ModuleMetadata;
use crate::error::MetadataError;
use std::path::Path;
use tracing::info;

/// Load a module metadata dump, picking the decoder from the file extension
/// (`.yaml`/`.yml` for YAML, anything else JSON).
pub fn load_module(path: impl AsRef<Path>) -> Result<ModuleMetadata, MetadataError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let module: ModuleMetadata = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|source| MetadataError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| MetadataError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };

    info!(
        path = %path.display(),
        module = %module.name,
        types_count = module.types.len(),
        "Loaded module metadata"
    );
    Ok(module)
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
