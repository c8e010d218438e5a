//! # Framework Version Policy
//!
//! The two supported runtime generations build their route tables with
//! slightly different rules. Every switch that depends on the generation is
//! collected in [`FrameworkPolicy`], computed once per module and passed
//! explicitly to each pipeline stage.
//!
//! | Switch                         | Legacy | Modern | Unknown |
//! |--------------------------------|--------|--------|---------|
//! | controller `Route` is a prefix | no     | yes    | yes     |
//! | `[controller]` placeholders    | no     | yes    | yes     |
//! | infer verb from method name    | yes    | no     | no      |
//! | template kind affinity         | yes    | no     | no      |
//! | API marker forbids conventions | no     | yes    | yes     |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime generation a module was compiled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkVersion {
    /// The classic, `System.Web`-based framework
    Legacy,
    /// The cross-platform `Microsoft.AspNetCore` framework
    Modern,
    /// Detection was inconclusive
    Unknown,
}

impl FrameworkVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkVersion::Legacy => "legacy",
            FrameworkVersion::Modern => "modern",
            FrameworkVersion::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavioral switches selected by [`FrameworkVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkPolicy {
    /// The version these switches were derived from
    pub version: FrameworkVersion,
    /// A controller-level `Route` prefixes every action. When false it is a
    /// standalone route for actions that declare no route of their own.
    pub controller_route_is_prefix: bool,
    /// `[controller]`/`{action}` tokens in attribute routes are substituted
    pub placeholders: bool,
    /// API controllers without verb attributes take their verb from the
    /// method name prefix
    pub infer_verb_from_name: bool,
    /// Conventional templates tagged with a controller kind only match that kind
    pub enforce_kind_affinity: bool,
    /// The API marker attribute makes attribute routing mandatory
    pub api_marker_disables_conventions: bool,
}

impl FrameworkPolicy {
    #[must_use]
    pub fn for_version(version: FrameworkVersion) -> Self {
        match version {
            FrameworkVersion::Legacy => Self {
                version,
                controller_route_is_prefix: false,
                placeholders: false,
                infer_verb_from_name: true,
                enforce_kind_affinity: true,
                api_marker_disables_conventions: false,
            },
            FrameworkVersion::Modern | FrameworkVersion::Unknown => Self {
                version,
                controller_route_is_prefix: true,
                placeholders: true,
                infer_verb_from_name: false,
                enforce_kind_affinity: false,
                api_marker_disables_conventions: true,
            },
        }
    }

    #[must_use]
    pub fn legacy() -> Self {
        Self::for_version(FrameworkVersion::Legacy)
    }

    #[must_use]
    pub fn modern() -> Self {
        Self::for_version(FrameworkVersion::Modern)
    }
}

impl From<FrameworkVersion> for FrameworkPolicy {
    fn from(version: FrameworkVersion) -> Self {
        Self::for_version(version)
    }
}
