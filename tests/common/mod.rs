#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared metadata fixtures for integration tests.

use routelens::{
    AnalysisOptions, AssemblyQuery, ControllerCandidate, HttpVerb, ModuleMetadata, ModuleSet,
    RoutingConfig,
};
use routelens::metadata::{MethodDef, RawAttribute, TypeDef};

pub const NAMESPACE: &str = "Shop.Web.Controllers";

pub fn modern_module() -> ModuleMetadata {
    ModuleMetadata::new("Shop.Web").with_target_framework(".NETCoreApp,Version=v8.0")
}

pub fn legacy_module() -> ModuleMetadata {
    ModuleMetadata::new("Shop.Legacy").with_target_framework(".NETFramework,Version=v4.8")
}

/// ASP.NET Core controller type
pub fn core_controller(name: &str) -> TypeDef {
    TypeDef::new(NAMESPACE, name).with_base("Microsoft.AspNetCore.Mvc", "ControllerBase")
}

/// Legacy MVC controller type
pub fn mvc_controller(name: &str) -> TypeDef {
    TypeDef::new(NAMESPACE, name).with_base("System.Web.Mvc", "Controller")
}

/// Legacy Web API controller type
pub fn api_controller(name: &str) -> TypeDef {
    TypeDef::new(NAMESPACE, name).with_base("System.Web.Http", "ApiController")
}

pub fn attr(name: &str) -> RawAttribute {
    RawAttribute::new(name)
}

pub fn method(name: &str, attributes: Vec<RawAttribute>) -> MethodDef {
    attributes
        .into_iter()
        .fold(MethodDef::new(name), MethodDef::with_attribute)
}

pub fn analyze(
    module: ModuleMetadata,
    config: Option<&RoutingConfig>,
    options: AnalysisOptions,
) -> Vec<ControllerCandidate> {
    let set = ModuleSet::new(vec![module]);
    let view = set.view(0).expect("module view");
    AssemblyQuery::new(&view, config, options)
        .find_all_controllers()
        .expect("analysis succeeds")
}

/// Active routes of one action as `(path, verbs)` pairs
pub fn routes_of(
    controllers: &[ControllerCandidate],
    controller: &str,
    method_name: &str,
) -> Vec<(String, Vec<HttpVerb>)> {
    let controller = controllers
        .iter()
        .find(|c| c.name == controller)
        .unwrap_or_else(|| panic!("controller {controller} not found"));
    let action = controller
        .actions
        .iter()
        .find(|a| a.method_name == method_name)
        .unwrap_or_else(|| panic!("action {method_name} not found"));
    action
        .active_routes()
        .iter()
        .map(|r| (r.path.clone(), r.verbs.iter().copied().collect()))
        .collect()
}

pub fn all_verbs() -> Vec<HttpVerb> {
    HttpVerb::ALL.to_vec()
}
