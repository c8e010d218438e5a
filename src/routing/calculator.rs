use super::route::{coalesce, join, merge_route, Route};
use crate::attributes::{HttpVerb, Propagation, RoutingAttribute, VerbSet};
use crate::conventional::{ConventionalRoute, RouteTarget};
use crate::discovery::{ActionCandidate, ControllerKind, PropagatedRoute, RouteSource};
use crate::policy::FrameworkPolicy;
use tracing::debug;

/// Computes attribute-derived and convention-derived routes of actions.
#[derive(Debug, Clone, Copy)]
pub struct RouteCalculator {
    policy: FrameworkPolicy,
}

impl RouteCalculator {
    pub fn new(policy: FrameworkPolicy) -> Self {
        Self { policy }
    }

    /// Generate the attribute routes of an action from its own route
    /// attributes and the fragments propagated onto it. Must run after
    /// propagation.
    pub fn populate_routes(&self, kind: ControllerKind, action: &mut ActionCandidate) {
        let controller_propagations: Vec<&PropagatedRoute> =
            action.propagated_from(RouteSource::Controller).collect();

        let mut candidates: Vec<Option<&RoutingAttribute>> = action
            .attributes
            .iter()
            .filter(|a| a.can_generate_route())
            .map(Some)
            .collect();
        if !candidates.iter().flatten().any(|a| a.route().is_some()) {
            candidates = vec![None];
        }

        let mut generated = Vec::new();
        for candidate in candidates {
            let own = candidate.and_then(RoutingAttribute::route);
            let prefixes: Vec<&str> = controller_propagations
                .iter()
                .filter(|p| applies_to(p.mode, own.is_some()))
                .map(|p| p.fragment.as_str())
                .collect();

            if prefixes.is_empty() {
                if own.is_none() && !controller_propagations.is_empty() {
                    continue;
                }
                generated.extend(self.calculate_route(kind, action, candidate, None));
            } else {
                for prefix in prefixes {
                    generated.extend(self.calculate_route(kind, action, candidate, Some(prefix)));
                }
            }
        }

        let routes = coalesce(generated);
        debug!(
            action = %action.method_name,
            routes_count = routes.len(),
            "Attribute routes calculated"
        );
        for route in routes {
            merge_route(&mut action.routes, route);
        }
    }

    fn calculate_route(
        &self,
        kind: ControllerKind,
        action: &ActionCandidate,
        candidate: Option<&RoutingAttribute>,
        prefix: Option<&str>,
    ) -> Option<Route> {
        let suffix = candidate.and_then(|c| {
            c.route().or_else(|| {
                action
                    .propagated_from(RouteSource::Action)
                    .next()
                    .map(|p| p.fragment.as_str())
            })
        });
        let path = join(prefix, suffix);
        if path.is_empty() {
            return None;
        }
        Some(Route {
            path,
            verbs: self.allowed_verbs(kind, action, candidate),
        })
    }

    /// Match a convention template against an action and record the
    /// resulting route. Returns whether the template matched.
    pub fn populate_conventional_routes(
        &self,
        target: &RouteTarget<'_>,
        action: &mut ActionCandidate,
        template: &ConventionalRoute,
    ) -> bool {
        let Some(path) = template.match_target(target, &self.policy) else {
            return false;
        };
        let verbs = self.allowed_verbs(target.kind, action, None);
        debug!(
            controller = %target.controller,
            action = %target.action,
            template = %template.template,
            path = %path,
            "Conventional route matched"
        );
        merge_route(&mut action.conventional_routes, Route { path, verbs });
        true
    }

    /// Verb resolution: the candidate's own override wins, then the union of
    /// every override on the action, then name inference for legacy API
    /// controllers, then every verb.
    pub fn allowed_verbs(
        &self,
        kind: ControllerKind,
        action: &ActionCandidate,
        candidate: Option<&RoutingAttribute>,
    ) -> VerbSet {
        if let Some(verbs) = candidate.and_then(RoutingAttribute::verb_override) {
            if !verbs.is_empty() {
                return verbs.into_iter().collect();
            }
        }

        let union: VerbSet = action
            .attributes
            .iter()
            .filter_map(RoutingAttribute::verb_override)
            .flatten()
            .collect();
        if !union.is_empty() {
            return union;
        }

        if self.policy.infer_verb_from_name && kind == ControllerKind::Api {
            return std::iter::once(infer_verb(&action.method_name)).collect();
        }

        HttpVerb::all()
    }
}

/// Whether a controller propagation prefixes a route candidate.
fn applies_to(mode: Propagation, candidate_has_route: bool) -> bool {
    match mode {
        Propagation::PropagateAlways => true,
        Propagation::PropagateToRoutedOnly => candidate_has_route,
        Propagation::PropagateToUnroutedOnly => !candidate_has_route,
        Propagation::None => false,
    }
}

/// Verb named by the method's prefix (`GetOrders` is GET), POST otherwise.
pub fn infer_verb(method_name: &str) -> HttpVerb {
    HttpVerb::ALL
        .into_iter()
        .find(|verb| {
            let name = verb.as_str();
            method_name.len() >= name.len()
                && method_name.is_char_boundary(name.len())
                && method_name[..name.len()].eq_ignore_ascii_case(name)
        })
        .unwrap_or(HttpVerb::Post)
}
