use crate::attributes::{HttpVerb, VerbSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete route: absolute path plus the verbs it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub verbs: VerbSet,
}

impl Route {
    pub fn new(path: impl Into<String>, verbs: impl IntoIterator<Item = HttpVerb>) -> Self {
        Self {
            path: path.into(),
            verbs: verbs.into_iter().collect(),
        }
    }

    pub fn allows_all_verbs(&self) -> bool {
        self.verbs.len() == HttpVerb::ALL.len()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.allows_all_verbs() {
            return write!(f, "ALL {}", self.path);
        }
        let verbs: Vec<&str> = self.verbs.iter().map(HttpVerb::as_str).collect();
        write!(f, "{} {}", verbs.join(","), self.path)
    }
}

/// Join a prefix and a suffix with exactly one `/`.
///
/// Surrounding slashes are trimmed from both sides. The result is absolute
/// with no trailing slash, or empty when both sides are empty.
pub fn join(prefix: Option<&str>, suffix: Option<&str>) -> String {
    let prefix = prefix.unwrap_or_default().trim_matches('/');
    let suffix = suffix.unwrap_or_default().trim_matches('/');
    match (prefix.is_empty(), suffix.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!("/{prefix}"),
        (true, false) => format!("/{suffix}"),
        (false, false) => format!("/{prefix}/{suffix}"),
    }
}

/// Merge routes sharing a path into one route carrying the union of their
/// verbs. Paths keep the order of their first occurrence.
pub fn coalesce(routes: impl IntoIterator<Item = Route>) -> Vec<Route> {
    let mut merged: Vec<Route> = Vec::new();
    for route in routes {
        match merged.iter_mut().find(|r| r.path == route.path) {
            Some(existing) => existing.verbs.extend(route.verbs),
            None => merged.push(route),
        }
    }
    merged
}

/// Add `route` to `routes` unless its path is already present, in which case
/// the verbs are merged into the existing entry. Returns whether a new entry
/// was appended.
pub fn merge_route(routes: &mut Vec<Route>, route: Route) -> bool {
    match routes.iter_mut().find(|r| r.path == route.path) {
        Some(existing) => {
            existing.verbs.extend(route.verbs);
            false
        }
        None => {
            routes.push(route);
            true
        }
    }
}
