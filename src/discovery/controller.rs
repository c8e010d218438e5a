use super::candidate::{ControllerCandidate, ControllerKind};
use crate::attributes::{classify_all, RoutingAttribute};
use crate::metadata::{MetadataAccessor, TypeHandle};
use crate::policy::FrameworkPolicy;
use tracing::debug;

const LEGACY_MVC_NAMESPACE: &str = "System.Web.Mvc";
const LEGACY_API_NAMESPACE: &str = "System.Web.Http";
const MODERN_NAMESPACE: &str = "Microsoft.AspNetCore.Mvc";

const MVC_BASES: [&str; 2] = ["Controller", "ControllerBase"];
const API_BASES: [&str; 1] = ["ApiController"];

/// Upper bound on inheritance depth, guarding against cyclic base references
/// in malformed metadata.
const MAX_INHERITANCE_DEPTH: usize = 64;

/// Finds the controller types of a module.
#[derive(Debug, Clone, Copy)]
pub struct ControllerFinder {
    policy: FrameworkPolicy,
}

impl ControllerFinder {
    pub fn new(policy: FrameworkPolicy) -> Self {
        Self { policy }
    }

    pub fn find_controllers<A: MetadataAccessor>(&self, meta: &A) -> Vec<ControllerCandidate> {
        let mut controllers = Vec::new();
        for ty in meta.types() {
            let raw = meta.custom_attributes(ty.into());
            let attributes = classify_all(raw);
            let Some(kind) = self.controller_kind(meta, ty, &attributes) else {
                continue;
            };
            let candidate = ControllerCandidate {
                ty,
                name: meta.type_name(ty).to_string(),
                namespace: meta.type_namespace(ty).to_string(),
                kind,
                raw_attributes: raw.to_vec(),
                attributes,
                actions: Vec::new(),
            };
            debug!(
                controller = %candidate.full_name(),
                kind = %kind,
                version = %self.policy.version,
                "Controller discovered"
            );
            controllers.push(candidate);
        }
        controllers
    }

    /// Classify a type as a controller, or `None` if it is not one.
    pub fn controller_kind<A: MetadataAccessor>(
        &self,
        meta: &A,
        ty: TypeHandle,
        attributes: &[RoutingAttribute],
    ) -> Option<ControllerKind> {
        if meta.is_abstract(ty) {
            return None;
        }
        let has_suffix = meta.type_name(ty).ends_with("Controller");

        if has_suffix && inherits_from(meta, ty, &MVC_BASES, LEGACY_MVC_NAMESPACE) {
            Some(ControllerKind::Mvc)
        } else if has_suffix && inherits_from(meta, ty, &API_BASES, LEGACY_API_NAMESPACE) {
            Some(ControllerKind::Api)
        } else if inherits_from(meta, ty, &MVC_BASES, MODERN_NAMESPACE)
            || attributes.iter().any(RoutingAttribute::enables_controller)
        {
            Some(ControllerKind::Core)
        } else {
            None
        }
    }
}

/// Walk the base type chain looking for one of `bases` declared in a
/// namespace starting with `namespace_prefix`. An ancestor declared outside
/// the loaded modules ends the walk as a non-match.
fn inherits_from<A: MetadataAccessor>(
    meta: &A,
    ty: TypeHandle,
    bases: &[&str],
    namespace_prefix: &str,
) -> bool {
    let mut current = ty;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        let Some(base) = meta.base_type(current) else {
            return false;
        };
        if bases.contains(&base.name) && base.namespace.starts_with(namespace_prefix) {
            return true;
        }
        match base.definition {
            Some(next) => current = next,
            None => return false,
        }
    }
    debug!(
        ty = %meta.type_name(ty),
        "Inheritance chain exceeds depth limit, treating as non-controller"
    );
    false
}
