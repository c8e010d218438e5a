//! Export shapes for reconstructed route tables and their writers.

use crate::attributes::{HttpVerb, SerializedAttribute};
use crate::config::RoutingConfig;
use crate::discovery::{ActionCandidate, ControllerCandidate};
use crate::error::{AnalysisError, ReportError};
use crate::metadata::{MetadataAccessor, RawAttribute};
use crate::policy::FrameworkVersion;
use crate::query::{AnalysisOptions, AssemblyQuery};
use crate::routing::Route;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One analyzed module.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedModule {
    pub name: String,
    pub path: Option<PathBuf>,
    pub framework_version: FrameworkVersion,
    pub controllers: Vec<Controller>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Controller {
    pub name: String,
    pub bare_name: String,
    pub namespace: String,
    pub routing_attributes: Vec<SerializedAttribute>,
    /// Non-routing annotations
    pub attributes: Vec<SerializedAttribute>,
    pub actions: Vec<Action>,
    /// Routes of every action, one entry per distinct path
    pub routes: Vec<ReportRoute>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Action {
    pub method_name: String,
    /// Effective action name after any name override
    pub name: String,
    pub is_conventional: bool,
    pub routing_attributes: Vec<SerializedAttribute>,
    pub attributes: Vec<SerializedAttribute>,
    pub routes: Vec<ReportRoute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRoute {
    pub path: String,
    pub verbs: Vec<HttpVerb>,
}

fn non_routing(raw: &[RawAttribute]) -> Vec<SerializedAttribute> {
    raw.iter().filter_map(SerializedAttribute::from_raw).collect()
}

impl From<&Route> for ReportRoute {
    fn from(route: &Route) -> Self {
        Self {
            path: route.path.clone(),
            verbs: route.verbs.iter().copied().collect(),
        }
    }
}

impl From<&ActionCandidate> for Action {
    fn from(action: &ActionCandidate) -> Self {
        Self {
            method_name: action.method_name.clone(),
            name: action.action_name().to_string(),
            is_conventional: action.is_conventional(),
            routing_attributes: action
                .attributes
                .iter()
                .map(SerializedAttribute::from_routing)
                .collect(),
            attributes: non_routing(&action.raw_attributes),
            routes: action.active_routes().iter().map(ReportRoute::from).collect(),
        }
    }
}

impl From<&ControllerCandidate> for Controller {
    fn from(controller: &ControllerCandidate) -> Self {
        Self {
            name: controller.name.clone(),
            bare_name: controller.bare_name().to_string(),
            namespace: controller.namespace.clone(),
            routing_attributes: controller
                .attributes
                .iter()
                .map(SerializedAttribute::from_routing)
                .collect(),
            attributes: non_routing(&controller.raw_attributes),
            actions: controller.actions.iter().map(Action::from).collect(),
            routes: controller.route_table().iter().map(ReportRoute::from).collect(),
        }
    }
}

/// Run the whole pipeline over one module and convert the result.
pub fn analyze_module<A: MetadataAccessor>(
    meta: &A,
    path: Option<&Path>,
    config: Option<&RoutingConfig>,
    options: AnalysisOptions,
) -> Result<AnalyzedModule, AnalysisError> {
    let query = AssemblyQuery::new(meta, config, options);
    let controllers = query.find_all_controllers()?;
    Ok(AnalyzedModule {
        name: meta.module_name().to_string(),
        path: path.map(Path::to_path_buf),
        framework_version: query.policy().version,
        controllers: controllers.iter().map(Controller::from).collect(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

pub fn write_report<W: Write>(
    modules: &[AnalyzedModule],
    format: OutputFormat,
    writer: &mut W,
) -> Result<(), ReportError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, modules)?;
            writeln!(writer)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *writer, modules)?,
        OutputFormat::Text => write_text(modules, writer)?,
    }
    Ok(())
}

fn write_text<W: Write>(modules: &[AnalyzedModule], writer: &mut W) -> std::io::Result<()> {
    for module in modules {
        writeln!(writer, "{} ({})", module.name, module.framework_version)?;
        for controller in &module.controllers {
            writeln!(writer, "  {}.{}", controller.namespace, controller.name)?;
            for action in &controller.actions {
                let marker = if action.is_conventional {
                    " [conventional]"
                } else {
                    ""
                };
                writeln!(writer, "    {}{marker}", action.name)?;
                if action.routes.is_empty() {
                    writeln!(writer, "      (no routes)")?;
                }
                for route in &action.routes {
                    writeln!(writer, "      {} {}", verb_label(&route.verbs), route.path)?;
                }
            }
        }
    }
    Ok(())
}

fn verb_label(verbs: &[HttpVerb]) -> String {
    if verbs.len() == HttpVerb::ALL.len() {
        return "ALL".to_string();
    }
    verbs
        .iter()
        .map(HttpVerb::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
