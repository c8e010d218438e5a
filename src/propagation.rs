//! Hands controller-level route fragments down to actions.

use crate::attributes::{Propagation, RoutingAttribute};
use crate::discovery::{ControllerCandidate, PropagatedRoute, RouteSource};
use crate::error::AmbiguousPrefixError;
use crate::policy::FrameworkPolicy;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct AttributePropagator {
    policy: FrameworkPolicy,
}

impl AttributePropagator {
    pub fn new(policy: FrameworkPolicy) -> Self {
        Self { policy }
    }

    /// Fill every action's propagated route list: controller-sourced
    /// fragments first, then the action's own, each in declaration order.
    ///
    /// A controller declaring more than one route prefix is rejected and left
    /// untouched.
    pub fn propagate(&self, controller: &mut ControllerCandidate) -> Result<(), AmbiguousPrefixError> {
        let prefixes: Vec<String> = controller
            .attributes
            .iter()
            .filter_map(RoutingAttribute::route_prefix)
            .map(str::to_string)
            .collect();
        if prefixes.len() > 1 {
            return Err(AmbiguousPrefixError {
                controller: controller.full_name(),
                prefixes,
            });
        }

        let from_controller: Vec<PropagatedRoute> = controller
            .attributes
            .iter()
            .filter_map(|a| self.to_propagated(a, RouteSource::Controller))
            .collect();

        for action in &mut controller.actions {
            let from_action = action
                .attributes
                .iter()
                .filter_map(|a| self.to_propagated(a, RouteSource::Action));
            action.propagated = from_controller.iter().cloned().chain(from_action).collect();
            debug!(
                controller = %controller.name,
                action = %action.method_name,
                propagated_count = action.propagated.len(),
                "Propagated route fragments"
            );
        }
        Ok(())
    }

    fn to_propagated(&self, attribute: &RoutingAttribute, source: RouteSource) -> Option<PropagatedRoute> {
        let mode = attribute.propagation(&self.policy);
        if mode == Propagation::None {
            return None;
        }
        Some(PropagatedRoute {
            fragment: attribute.fragment()?.to_string(),
            mode,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::discovery::{ActionCandidate, ControllerKind};
    use crate::metadata::{MethodHandle, TypeHandle};

    fn controller(attributes: Vec<RoutingAttribute>, actions: Vec<Vec<RoutingAttribute>>) -> ControllerCandidate {
        let ty = TypeHandle { module: 0, index: 0 };
        ControllerCandidate {
            ty,
            name: "OrdersController".into(),
            namespace: "Shop".into(),
            kind: ControllerKind::Core,
            raw_attributes: Vec::new(),
            attributes,
            actions: actions
                .into_iter()
                .enumerate()
                .map(|(index, attributes)| ActionCandidate {
                    method: MethodHandle { ty, index },
                    method_name: format!("Action{index}"),
                    raw_attributes: Vec::new(),
                    attributes,
                    propagated: Vec::new(),
                    routes: Vec::new(),
                    conventional_routes: Vec::new(),
                })
                .collect(),
        }
    }

    fn route(path: &str) -> RoutingAttribute {
        RoutingAttribute::Route {
            path: Some(path.into()),
        }
    }

    #[test]
    fn test_controller_fragments_come_first() {
        let mut c = controller(vec![route("orders")], vec![vec![route("list")]]);
        AttributePropagator::new(FrameworkPolicy::modern())
            .propagate(&mut c)
            .unwrap();
        let propagated = &c.actions[0].propagated;
        assert_eq!(propagated.len(), 2);
        assert_eq!(propagated[0].fragment, "orders");
        assert_eq!(propagated[0].source, RouteSource::Controller);
        assert_eq!(propagated[0].mode, Propagation::PropagateAlways);
        assert_eq!(propagated[1].source, RouteSource::Action);
    }

    #[test]
    fn test_legacy_controller_route_is_unrouted_only() {
        let mut c = controller(vec![route("orders")], vec![vec![]]);
        AttributePropagator::new(FrameworkPolicy::legacy())
            .propagate(&mut c)
            .unwrap();
        assert_eq!(
            c.actions[0].propagated[0].mode,
            Propagation::PropagateToUnroutedOnly
        );
    }

    #[test]
    fn test_fragmentless_and_non_propagating_attributes_are_ignored() {
        let mut c = controller(
            vec![
                RoutingAttribute::Route { path: None },
                RoutingAttribute::Area {
                    name: Some("Admin".into()),
                },
            ],
            vec![vec![RoutingAttribute::NonAction]],
        );
        AttributePropagator::new(FrameworkPolicy::modern())
            .propagate(&mut c)
            .unwrap();
        assert!(c.actions[0].propagated.is_empty());
    }

    #[test]
    fn test_multiple_prefixes_are_ambiguous() {
        let prefix = |p: &str| RoutingAttribute::RoutePrefix {
            prefix: Some(p.into()),
        };
        let mut c = controller(vec![prefix("a"), prefix("b")], vec![vec![]]);
        let err = AttributePropagator::new(FrameworkPolicy::legacy())
            .propagate(&mut c)
            .unwrap_err();
        assert_eq!(err.controller, "Shop.OrdersController");
        assert_eq!(err.prefixes, vec!["a".to_string(), "b".to_string()]);
        assert!(c.actions[0].propagated.is_empty());
    }
}
