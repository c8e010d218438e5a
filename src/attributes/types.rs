use crate::policy::FrameworkPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// HTTP verbs a route can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

/// Ordered set of verbs. "All verbs" is the full set, never empty.
pub type VerbSet = BTreeSet<HttpVerb>;

impl HttpVerb {
    pub const ALL: [HttpVerb; 7] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Delete,
        HttpVerb::Patch,
        HttpVerb::Head,
        HttpVerb::Options,
    ];

    pub fn all() -> VerbSet {
        Self::ALL.into_iter().collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Head => "HEAD",
            HttpVerb::Options => "OPTIONS",
        }
    }

    /// Case-insensitive verb name lookup. Names `http` accepts but this
    /// enumeration lacks (`TRACE`, `CONNECT`, extensions) yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let method = http::Method::from_bytes(name.trim().to_ascii_uppercase().as_bytes()).ok()?;
        HttpVerb::try_from(&method).ok()
    }

    /// Bit value in the legacy `HttpVerbs` flag enumeration
    pub fn flag(&self) -> i64 {
        match self {
            HttpVerb::Get => 1,
            HttpVerb::Post => 2,
            HttpVerb::Put => 4,
            HttpVerb::Delete => 8,
            HttpVerb::Head => 16,
            HttpVerb::Patch => 32,
            HttpVerb::Options => 64,
        }
    }

    /// Decode a legacy `HttpVerbs` flag value
    pub fn from_flags(flags: i64) -> Vec<HttpVerb> {
        Self::ALL
            .into_iter()
            .filter(|v| flags & v.flag() != 0)
            .collect()
    }

    pub fn to_method(&self) -> http::Method {
        match self {
            HttpVerb::Get => http::Method::GET,
            HttpVerb::Post => http::Method::POST,
            HttpVerb::Put => http::Method::PUT,
            HttpVerb::Delete => http::Method::DELETE,
            HttpVerb::Patch => http::Method::PATCH,
            HttpVerb::Head => http::Method::HEAD,
            HttpVerb::Options => http::Method::OPTIONS,
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&http::Method> for HttpVerb {
    type Error = ();

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|v| v.to_method() == *method)
            .ok_or(())
    }
}

/// How a controller-level route fragment reaches the controller's actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Propagation {
    None,
    /// Prefixes every route of every action
    PropagateAlways,
    /// Prefixes only route candidates that carry their own fragment
    PropagateToRoutedOnly,
    /// Stands in for actions whose route candidates carry no fragment
    PropagateToUnroutedOnly,
}

/// A recognised routing annotation.
///
/// Every query takes the active [`FrameworkPolicy`] and is a pure function of
/// the variant data and that policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutingAttribute {
    Route { path: Option<String> },
    RoutePrefix { prefix: Option<String> },
    Http { verb: HttpVerb, path: Option<String> },
    AcceptVerbs { verbs: Option<Vec<HttpVerb>>, path: Option<String> },
    ApiMarker,
    NonAction,
    ActionNameOverride { name: Option<String> },
    Area { name: Option<String> },
}

impl RoutingAttribute {
    /// Canonical annotation name used in exported metadata
    pub fn name(&self) -> String {
        match self {
            RoutingAttribute::Route { .. } => "Route".to_string(),
            RoutingAttribute::RoutePrefix { .. } => "RoutePrefix".to_string(),
            RoutingAttribute::Http { verb, .. } => {
                let lower = verb.as_str().to_ascii_lowercase();
                let mut chars = lower.chars();
                let title: String = chars
                    .next()
                    .map(|c| c.to_ascii_uppercase())
                    .into_iter()
                    .chain(chars)
                    .collect();
                format!("Http{title}")
            }
            RoutingAttribute::AcceptVerbs { .. } => "AcceptVerbs".to_string(),
            RoutingAttribute::ApiMarker => "ApiController".to_string(),
            RoutingAttribute::NonAction => "NonAction".to_string(),
            RoutingAttribute::ActionNameOverride { .. } => "ActionName".to_string(),
            RoutingAttribute::Area { .. } => "Area".to_string(),
        }
    }

    /// The attribute's own route template, if any
    pub fn route(&self) -> Option<&str> {
        match self {
            RoutingAttribute::Route { path }
            | RoutingAttribute::Http { path, .. }
            | RoutingAttribute::AcceptVerbs { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    pub fn route_prefix(&self) -> Option<&str> {
        match self {
            RoutingAttribute::RoutePrefix { prefix } => prefix.as_deref(),
            _ => None,
        }
    }

    /// The fragment handed to actions when this attribute propagates
    pub fn fragment(&self) -> Option<&str> {
        self.route().or_else(|| self.route_prefix())
    }

    pub fn propagation(&self, policy: &FrameworkPolicy) -> Propagation {
        match self {
            RoutingAttribute::Route { .. } if policy.controller_route_is_prefix => {
                Propagation::PropagateAlways
            }
            RoutingAttribute::Route { .. } => Propagation::PropagateToUnroutedOnly,
            RoutingAttribute::RoutePrefix { .. } => Propagation::PropagateToRoutedOnly,
            _ => Propagation::None,
        }
    }

    /// Whether this attribute is a route candidate on an action
    pub fn can_generate_route(&self) -> bool {
        matches!(
            self,
            RoutingAttribute::Route { .. }
                | RoutingAttribute::Http { .. }
                | RoutingAttribute::AcceptVerbs { .. }
        )
    }

    /// Whether this attribute alone makes its owner a controller
    pub fn enables_controller(&self) -> bool {
        matches!(self, RoutingAttribute::ApiMarker)
    }

    pub fn verb_override(&self) -> Option<Vec<HttpVerb>> {
        match self {
            RoutingAttribute::Http { verb, .. } => Some(vec![*verb]),
            RoutingAttribute::AcceptVerbs { verbs, .. } => verbs.clone(),
            _ => None,
        }
    }

    pub fn disables_conventional_routes(&self, policy: &FrameworkPolicy) -> bool {
        match self {
            RoutingAttribute::NonAction => true,
            RoutingAttribute::ApiMarker => policy.api_marker_disables_conventions,
            _ => false,
        }
    }

    pub fn action_name(&self) -> Option<&str> {
        match self {
            RoutingAttribute::ActionNameOverride { name } => name.as_deref(),
            _ => None,
        }
    }

    pub fn area(&self) -> Option<&str> {
        match self {
            RoutingAttribute::Area { name } => name.as_deref(),
            _ => None,
        }
    }

    pub fn is_route_prefix(&self) -> bool {
        matches!(self, RoutingAttribute::RoutePrefix { .. })
    }
}
