use crate::attributes::{Propagation, RoutingAttribute};
use crate::metadata::{full_name, MethodHandle, RawAttribute, TypeHandle};
use crate::routing::{coalesce, Route};
use serde::{Deserialize, Serialize};
use std::fmt;

const CONTROLLER_SUFFIX: &str = "Controller";

/// Which discovery branch accepted a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    /// Legacy MVC controller (`System.Web.Mvc`)
    #[serde(alias = "MVC")]
    Mvc,
    /// Legacy Web API controller (`System.Web.Http`)
    #[serde(alias = "API")]
    Api,
    /// Modern controller, by base type or by an enabling attribute
    #[serde(alias = "CORE")]
    Core,
}

impl ControllerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerKind::Mvc => "mvc",
            ControllerKind::Api => "api",
            ControllerKind::Core => "core",
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a propagated fragment came from the controller or the action itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Controller,
    Action,
}

/// A route fragment inherited by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagatedRoute {
    pub fragment: String,
    pub mode: Propagation,
    pub source: RouteSource,
}

/// A type accepted as a controller, together with its discovered actions.
#[derive(Debug, Clone)]
pub struct ControllerCandidate {
    pub ty: TypeHandle,
    pub name: String,
    pub namespace: String,
    pub kind: ControllerKind,
    /// Every annotation on the type, routing or not
    pub raw_attributes: Vec<RawAttribute>,
    pub attributes: Vec<RoutingAttribute>,
    pub actions: Vec<ActionCandidate>,
}

impl ControllerCandidate {
    /// Type name with the conventional `Controller` suffix removed
    pub fn bare_name(&self) -> &str {
        match self.name.strip_suffix(CONTROLLER_SUFFIX) {
            Some(bare) if !bare.is_empty() => bare,
            _ => &self.name,
        }
    }

    pub fn full_name(&self) -> String {
        full_name(&self.namespace, &self.name)
    }

    /// First area declared on the controller
    pub fn area(&self) -> Option<&str> {
        self.attributes.iter().find_map(RoutingAttribute::area)
    }

    /// Active routes of every action, coalesced by path
    pub fn route_table(&self) -> Vec<Route> {
        coalesce(
            self.actions
                .iter()
                .flat_map(|a| a.active_routes().iter().cloned()),
        )
    }
}

/// A method accepted as an action.
#[derive(Debug, Clone)]
pub struct ActionCandidate {
    pub method: MethodHandle,
    pub method_name: String,
    pub raw_attributes: Vec<RawAttribute>,
    pub attributes: Vec<RoutingAttribute>,
    pub propagated: Vec<PropagatedRoute>,
    /// Attribute-derived routes
    pub routes: Vec<Route>,
    /// Convention-derived routes
    pub conventional_routes: Vec<Route>,
}

impl ActionCandidate {
    /// Effective action name: the first name override, else the method name
    pub fn action_name(&self) -> &str {
        self.attributes
            .iter()
            .find_map(RoutingAttribute::action_name)
            .unwrap_or(&self.method_name)
    }

    /// Conventional routes are active only when no attribute route exists
    pub fn is_conventional(&self) -> bool {
        self.routes.is_empty() && !self.conventional_routes.is_empty()
    }

    pub fn active_routes(&self) -> &[Route] {
        if self.is_conventional() {
            &self.conventional_routes
        } else {
            &self.routes
        }
    }

    pub(crate) fn propagated_from(
        &self,
        source: RouteSource,
    ) -> impl Iterator<Item = &PropagatedRoute> {
        self.propagated.iter().filter(move |p| p.source == source)
    }
}
