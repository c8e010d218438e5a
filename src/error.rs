//! Error types surfaced by the analysis pipeline.
//!
//! Only structural problems are errors. Missing or malformed attribute
//! arguments degrade to "unset" inside the classifier, and unresolved base
//! types or unroutable methods are ordinary outcomes.

use std::path::PathBuf;
use thiserror::Error;

/// A conventional route template could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid route template '{template}': {reason} (in '{part}')")]
pub struct TemplateParseError {
    /// The full template being parsed
    pub template: String,
    /// The offending substring of the template
    pub part: String,
    /// Human-readable description of the failure
    pub reason: String,
}

impl TemplateParseError {
    pub(crate) fn new(
        template: impl Into<String>,
        part: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            part: part.into(),
            reason: reason.into(),
        }
    }
}

/// More than one controller-level attribute claims a route prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("controller '{controller}' declares multiple route prefixes: {}", .prefixes.join(", "))]
pub struct AmbiguousPrefixError {
    /// Fully qualified name of the controller type
    pub controller: String,
    /// Every prefix claimed on the controller, in declaration order
    pub prefixes: Vec<String>,
}

/// Loading a routing configuration document failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode JSON config '{path}'")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode YAML config '{path}'")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config contains {} invalid template(s):\n{}", .0.len(), format_template_errors(.0))]
    InvalidTemplates(Vec<TemplateParseError>),
}

fn format_template_errors(errors: &[TemplateParseError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Loading a metadata dump failed.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode JSON metadata '{path}'")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode YAML metadata '{path}'")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// File discovery failed.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search root '{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Failure of a full module analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    AmbiguousPrefix(#[from] AmbiguousPrefixError),
}

/// Writing a report failed.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report")]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON report")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode YAML report")]
    Yaml(#[from] serde_yaml::Error),
}
