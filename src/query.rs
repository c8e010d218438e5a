//! # Assembly Query
//!
//! Drives the full route reconstruction pipeline over one module:
//!
//! 1. controller discovery
//! 2. action discovery
//! 3. attribute propagation
//! 4. attribute route calculation
//! 5. conventional template matching
//! 6. placeholder inlining, once over every controller
//!
//! Each stage consumes what the previous one wrote, so the order is fixed.

use crate::attributes::RoutingAttribute;
use crate::config::RoutingConfig;
use crate::conventional::RouteTarget;
use crate::discovery::{ActionFinder, ControllerCandidate, ControllerFinder};
use crate::error::AnalysisError;
use crate::inliner::PlaceholderInliner;
use crate::metadata::MetadataAccessor;
use crate::policy::{FrameworkPolicy, FrameworkVersion};
use crate::propagation::AttributePropagator;
use crate::routing::RouteCalculator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What to do with a controller that declares more than one route prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguousPrefixPolicy {
    /// Log a warning and leave the controller out of the result
    #[default]
    Skip,
    /// Fail the whole analysis
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub on_ambiguous_prefix: AmbiguousPrefixPolicy,
    /// Overrides the detected framework version when set
    pub framework: Option<FrameworkVersion>,
}

/// Route table query over one module.
pub struct AssemblyQuery<'a, A: MetadataAccessor> {
    meta: &'a A,
    config: Option<&'a RoutingConfig>,
    options: AnalysisOptions,
    policy: FrameworkPolicy,
}

impl<'a, A: MetadataAccessor> AssemblyQuery<'a, A> {
    pub fn new(meta: &'a A, config: Option<&'a RoutingConfig>, options: AnalysisOptions) -> Self {
        let version = options
            .framework
            .unwrap_or_else(|| meta.framework_version());
        Self {
            meta,
            config,
            options,
            policy: FrameworkPolicy::for_version(version),
        }
    }

    pub fn policy(&self) -> FrameworkPolicy {
        self.policy
    }

    /// Every controller of the module with its actions and their routes.
    pub fn find_all_controllers(&self) -> Result<Vec<ControllerCandidate>, AnalysisError> {
        let finder = ControllerFinder::new(self.policy);
        let actions = ActionFinder::new(self.policy);
        let propagator = AttributePropagator::new(self.policy);
        let calculator = RouteCalculator::new(self.policy);

        let mut controllers = Vec::new();
        for mut controller in finder.find_controllers(self.meta) {
            actions.populate_actions(self.meta, &mut controller);

            if let Err(e) = propagator.propagate(&mut controller) {
                match self.options.on_ambiguous_prefix {
                    AmbiguousPrefixPolicy::Abort => return Err(e.into()),
                    AmbiguousPrefixPolicy::Skip => {
                        warn!(
                            controller = %e.controller,
                            prefixes = ?e.prefixes,
                            "Skipping controller with ambiguous route prefix"
                        );
                        continue;
                    }
                }
            }

            for action in &mut controller.actions {
                calculator.populate_routes(controller.kind, action);
            }
            self.populate_conventional_routes(&calculator, &mut controller);
            controllers.push(controller);
        }

        PlaceholderInliner::new(self.policy).inline_placeholders(&mut controllers);

        info!(
            module = %self.meta.module_name(),
            version = %self.policy.version,
            controllers_count = controllers.len(),
            "Route table reconstructed"
        );
        Ok(controllers)
    }

    fn populate_conventional_routes(
        &self,
        calculator: &RouteCalculator,
        controller: &mut ControllerCandidate,
    ) {
        let Some(config) = self.config.filter(|c| !c.is_empty()) else {
            return;
        };
        if controller
            .attributes
            .iter()
            .any(|a| self.disables_conventions(a))
        {
            debug!(
                controller = %controller.name,
                "Conventional routing disabled for controller"
            );
            return;
        }

        let bare_name = controller.bare_name().to_string();
        let area = controller.area().map(str::to_string);
        let kind = controller.kind;
        for action in &mut controller.actions {
            let action_name = action.action_name().to_string();
            let target = RouteTarget {
                controller: &bare_name,
                action: &action_name,
                area: area.as_deref(),
                kind,
            };
            for template in &config.conventional_routes {
                calculator.populate_conventional_routes(&target, action, template);
            }
        }
    }

    fn disables_conventions(&self, attribute: &RoutingAttribute) -> bool {
        attribute.disables_conventional_routes(&self.policy)
    }
}
