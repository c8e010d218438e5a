use super::candidate::{ActionCandidate, ControllerCandidate};
use crate::attributes::classify_all;
use crate::metadata::MetadataAccessor;
use crate::policy::FrameworkPolicy;
use tracing::debug;

/// Enumerates the action methods of a controller.
#[derive(Debug, Clone, Copy)]
pub struct ActionFinder {
    policy: FrameworkPolicy,
}

impl ActionFinder {
    pub fn new(policy: FrameworkPolicy) -> Self {
        Self { policy }
    }

    /// Append the routable actions of `controller`. Methods carrying an
    /// attribute that disables conventional routing (`NonAction`, or the API
    /// marker where the policy says so) are left out of both routing paths.
    pub fn populate_actions<A: MetadataAccessor>(&self, meta: &A, controller: &mut ControllerCandidate) {
        let actions = self.find_action_candidates(meta, controller);
        controller.actions.extend(actions);
    }

    fn find_action_candidates<A: MetadataAccessor>(
        &self,
        meta: &A,
        controller: &ControllerCandidate,
    ) -> Vec<ActionCandidate> {
        let mut actions = Vec::new();
        for method in meta.methods(controller.ty) {
            let flags = meta.method_flags(method);
            if flags.is_constructor
                || flags.is_accessor
                || flags.is_static
                || flags.is_abstract
                || !flags.is_public
            {
                continue;
            }

            let raw = meta.custom_attributes(method.into());
            let attributes = classify_all(raw);
            let method_name = meta.method_name(method);
            if attributes
                .iter()
                .any(|a| a.disables_conventional_routes(&self.policy))
            {
                debug!(
                    controller = %controller.name,
                    method = %method_name,
                    "Method excluded from routing"
                );
                continue;
            }

            actions.push(ActionCandidate {
                method,
                method_name: method_name.to_string(),
                raw_attributes: raw.to_vec(),
                attributes,
                propagated: Vec::new(),
                routes: Vec::new(),
                conventional_routes: Vec::new(),
            });
        }
        actions
    }
}
