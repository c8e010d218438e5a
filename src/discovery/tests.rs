#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::metadata::{MethodDef, MethodFlags, ModuleMetadata, ModuleSet, RawAttribute, TypeDef};
use crate::policy::FrameworkPolicy;

const APP: &str = "Shop.Web";

fn find(module: ModuleMetadata) -> Vec<ControllerCandidate> {
    let set = ModuleSet::new(vec![module]);
    let view = set.view(0).unwrap();
    ControllerFinder::new(FrameworkPolicy::modern()).find_controllers(&view)
}

fn kinds(module: ModuleMetadata) -> Vec<(String, ControllerKind)> {
    find(module)
        .into_iter()
        .map(|c| (c.name, c.kind))
        .collect()
}

#[test]
fn test_controller_kinds_by_base_type() {
    let module = ModuleMetadata::new(APP)
        .with_type(TypeDef::new(APP, "HomeController").with_base("System.Web.Mvc", "Controller"))
        .with_type(
            TypeDef::new(APP, "ValuesController").with_base("System.Web.Http", "ApiController"),
        )
        .with_type(
            TypeDef::new(APP, "OrdersController")
                .with_base("Microsoft.AspNetCore.Mvc", "ControllerBase"),
        );

    assert_eq!(
        kinds(module),
        vec![
            ("HomeController".to_string(), ControllerKind::Mvc),
            ("ValuesController".to_string(), ControllerKind::Api),
            ("OrdersController".to_string(), ControllerKind::Core),
        ]
    );
}

#[test]
fn test_legacy_kinds_require_controller_suffix() {
    let module = ModuleMetadata::new(APP)
        .with_type(TypeDef::new(APP, "Home").with_base("System.Web.Mvc", "Controller"))
        .with_type(TypeDef::new(APP, "Values").with_base("System.Web.Http", "ApiController"))
        .with_type(TypeDef::new(APP, "Orders").with_base("Microsoft.AspNetCore.Mvc", "Controller"));

    assert_eq!(kinds(module), vec![("Orders".to_string(), ControllerKind::Core)]);
}

#[test]
fn test_api_marker_enables_controller() {
    let module = ModuleMetadata::new(APP)
        .with_type(
            TypeDef::new(APP, "Health").with_attribute(RawAttribute::new("ApiControllerAttribute")),
        )
        .with_type(TypeDef::new(APP, "PlainController"));

    assert_eq!(kinds(module), vec![("Health".to_string(), ControllerKind::Core)]);
}

#[test]
fn test_abstract_types_are_rejected() {
    let module = ModuleMetadata::new(APP).with_type(
        TypeDef::new(APP, "BaseController")
            .with_base("Microsoft.AspNetCore.Mvc", "Controller")
            .abstract_type(),
    );
    assert!(find(module).is_empty());
}

#[test]
fn test_inherited_through_local_base() {
    let module = ModuleMetadata::new(APP)
        .with_type(
            TypeDef::new(APP, "ShopControllerBase")
                .with_base("System.Web.Mvc", "Controller")
                .abstract_type(),
        )
        .with_type(TypeDef::new(APP, "CartController").with_base(APP, "ShopControllerBase"));

    assert_eq!(kinds(module), vec![("CartController".to_string(), ControllerKind::Mvc)]);
}

#[test]
fn test_unresolved_base_is_not_a_controller() {
    let module = ModuleMetadata::new(APP)
        .with_type(TypeDef::new(APP, "CartController").with_base("Vendor.Lib", "MissingBase"));
    assert!(find(module).is_empty());
}

#[test]
fn test_base_in_another_module() {
    let shared = ModuleMetadata::new("Shop.Shared").with_type(
        TypeDef::new("Shop.Shared", "ApiBase")
            .with_base("System.Web.Http", "ApiController")
            .abstract_type(),
    );
    let app = ModuleMetadata::new(APP)
        .with_type(TypeDef::new(APP, "ValuesController").with_base("Shop.Shared", "ApiBase"));
    let set = ModuleSet::new(vec![shared, app]);
    let view = set.view(1).unwrap();

    let controllers = ControllerFinder::new(FrameworkPolicy::legacy()).find_controllers(&view);
    assert_eq!(controllers.len(), 1);
    assert_eq!(controllers[0].kind, ControllerKind::Api);
    assert_eq!(controllers[0].full_name(), "Shop.Web.ValuesController");
}

#[test]
fn test_cyclic_base_chain_terminates() {
    let module = ModuleMetadata::new(APP)
        .with_type(TypeDef::new(APP, "AController").with_base(APP, "BController"))
        .with_type(TypeDef::new(APP, "BController").with_base(APP, "AController"));
    assert!(find(module).is_empty());
}

#[test]
fn test_bare_name() {
    let module = ModuleMetadata::new(APP)
        .with_type(TypeDef::new(APP, "OrdersController").with_base("Microsoft.AspNetCore.Mvc", "Controller"))
        .with_type(TypeDef::new(APP, "Controller").with_base("Microsoft.AspNetCore.Mvc", "Controller"))
        .with_type(TypeDef::new(APP, "Status").with_attribute(RawAttribute::new("ApiController")));

    let controllers = find(module);
    let bare: Vec<&str> = controllers.iter().map(ControllerCandidate::bare_name).collect();
    assert_eq!(bare, vec!["Orders", "Controller", "Status"]);
}

fn flagged(name: &str, edit: impl FnOnce(&mut MethodFlags)) -> MethodDef {
    let mut flags = MethodFlags::default();
    edit(&mut flags);
    MethodDef::new(name).with_flags(flags)
}

fn action_module() -> ModuleMetadata {
    ModuleMetadata::new(APP).with_type(
        TypeDef::new(APP, "OrdersController")
            .with_base("Microsoft.AspNetCore.Mvc", "Controller")
            .with_method(flagged(".ctor", |f| f.is_constructor = true))
            .with_method(flagged("get_Context", |f| f.is_accessor = true))
            .with_method(flagged("Create", |f| f.is_static = true))
            .with_method(flagged("Template", |f| f.is_abstract = true))
            .with_method(flagged("Helper", |f| f.is_public = false))
            .with_method(MethodDef::new("List"))
            .with_method(
                MethodDef::new("Details").with_attribute(RawAttribute::new("ActionName").arg("Show")),
            )
            .with_method(MethodDef::new("Audit").with_attribute(RawAttribute::new("NonAction"))),
    )
}

fn method_names(controller: &ControllerCandidate) -> Vec<&str> {
    controller
        .actions
        .iter()
        .map(|a| a.method_name.as_str())
        .collect()
}

#[test]
fn test_action_filtering() {
    let set = ModuleSet::new(vec![action_module()]);
    let view = set.view(0).unwrap();
    let policy = FrameworkPolicy::modern();
    let mut controllers = ControllerFinder::new(policy).find_controllers(&view);
    let controller = &mut controllers[0];

    ActionFinder::new(policy).populate_actions(&view, controller);
    assert_eq!(method_names(controller), vec!["List", "Details"]);
}

#[test]
fn test_action_name_override() {
    let set = ModuleSet::new(vec![action_module()]);
    let view = set.view(0).unwrap();
    let policy = FrameworkPolicy::modern();
    let mut controllers = ControllerFinder::new(policy).find_controllers(&view);
    ActionFinder::new(policy).populate_actions(&view, &mut controllers[0]);

    let names: Vec<&str> = controllers[0]
        .actions
        .iter()
        .map(ActionCandidate::action_name)
        .collect();
    assert_eq!(names, vec!["List", "Show"]);
}

#[test]
fn test_actions_exclude_api_marked_methods() {
    let module = ModuleMetadata::new(APP).with_type(
        TypeDef::new(APP, "HomeController")
            .with_base("Microsoft.AspNetCore.Mvc", "Controller")
            .with_method(MethodDef::new("Index"))
            .with_method(MethodDef::new("Ping").with_attribute(RawAttribute::new("ApiController"))),
    );
    let set = ModuleSet::new(vec![module]);
    let view = set.view(0).unwrap();
    let policy = FrameworkPolicy::modern();
    let mut controllers = ControllerFinder::new(policy).find_controllers(&view);
    ActionFinder::new(policy).populate_actions(&view, &mut controllers[0]);

    assert_eq!(method_names(&controllers[0]), vec!["Index"]);
}

#[test]
fn test_non_action_excluded_for_every_version() {
    let module = ModuleMetadata::new(APP).with_type(
        TypeDef::new(APP, "HomeController")
            .with_base("System.Web.Mvc", "Controller")
            .with_method(MethodDef::new("Index"))
            .with_method(MethodDef::new("Audit").with_attribute(RawAttribute::new("NonActionAttribute")))
            .with_method(MethodDef::new("Ping").with_attribute(RawAttribute::new("ApiController"))),
    );
    let set = ModuleSet::new(vec![module]);
    let view = set.view(0).unwrap();

    let legacy = FrameworkPolicy::legacy();
    let mut controllers = ControllerFinder::new(legacy).find_controllers(&view);
    ActionFinder::new(legacy).populate_actions(&view, &mut controllers[0]);
    // The API marker only forbids conventions under the modern rules.
    assert_eq!(method_names(&controllers[0]), vec!["Index", "Ping"]);

    let modern = FrameworkPolicy::modern();
    let mut controllers = ControllerFinder::new(modern).find_controllers(&view);
    ActionFinder::new(modern).populate_actions(&view, &mut controllers[0]);
    assert_eq!(method_names(&controllers[0]), vec!["Index"]);
}

#[test]
fn test_new_actions_start_without_routes() {
    let set = ModuleSet::new(vec![action_module()]);
    let view = set.view(0).unwrap();
    let policy = FrameworkPolicy::modern();
    let mut controllers = ControllerFinder::new(policy).find_controllers(&view);
    ActionFinder::new(policy).populate_actions(&view, &mut controllers[0]);

    for action in &controllers[0].actions {
        assert!(action.routes.is_empty());
        assert!(action.conventional_routes.is_empty());
        assert!(action.propagated.is_empty());
        assert!(!action.is_conventional());
    }
    assert!(controllers[0].route_table().is_empty());
}
