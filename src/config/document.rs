use crate::conventional::ConventionalRoute;
use crate::discovery::ControllerKind;
use crate::error::ConfigError;
use crate::metadata::is_yaml;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Raw configuration document as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    #[serde(default, alias = "ConventionalRoutes")]
    pub conventional_routes: Vec<TemplateEntry>,
}

/// One conventional template entry of a [`ConfigDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    #[serde(alias = "Template")]
    pub template: String,
    /// Route value defaults keyed by parameter name
    #[serde(default, alias = "Defaults")]
    pub defaults: BTreeMap<String, String>,
    /// Controller kind the template is restricted to
    #[serde(default, alias = "Type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ControllerKind>,
}

/// Parsed routing configuration handed to the analysis pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingConfig {
    pub conventional_routes: Vec<ConventionalRoute>,
}

impl RoutingConfig {
    pub fn new(conventional_routes: Vec<ConventionalRoute>) -> Self {
        Self {
            conventional_routes,
        }
    }

    /// Parse every template of a document. All failures are collected and
    /// reported together.
    pub fn from_document(document: ConfigDocument) -> Result<Self, ConfigError> {
        let mut routes = Vec::with_capacity(document.conventional_routes.len());
        let mut errors = Vec::new();
        for entry in document.conventional_routes {
            match ConventionalRoute::parse(&entry.template, entry.defaults, entry.kind) {
                Ok(route) => routes.push(route),
                Err(e) => errors.push(e),
            }
        }
        if !errors.is_empty() {
            return Err(ConfigError::InvalidTemplates(errors));
        }
        Ok(Self::new(routes))
    }

    pub fn is_empty(&self) -> bool {
        self.conventional_routes.is_empty()
    }
}

/// Load and parse a configuration document, JSON or YAML by extension.
pub fn load_config(path: impl AsRef<Path>) -> Result<RoutingConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document: ConfigDocument = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };
    debug!(
        path = %path.display(),
        templates_count = document.conventional_routes.len(),
        "Decoded routing config"
    );

    let config = RoutingConfig::from_document(document)?;
    info!(
        path = %path.display(),
        templates_count = config.conventional_routes.len(),
        "Loaded routing config"
    );
    Ok(config)
}
