#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use clap::Parser;
use common::*;
use routelens::cli::{run, Cli};
use routelens::ModuleMetadata;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_module(dir: &Path, relative: &str, module: &ModuleMetadata) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(module).unwrap()).unwrap();
}

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn shop_module() -> ModuleMetadata {
    modern_module().with_type(
        core_controller("OrdersController")
            .with_attribute(attr("Route").arg("api/[controller]"))
            .with_attribute(attr("Authorize").named_arg("Policy", "Staff"))
            .with_method(method("List", vec![attr("HttpGet")]))
            .with_method(method("Create", vec![attr("HttpPost").arg("new")])),
    )
}

#[test]
fn test_analyze_text_report() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "bin/Shop.Web.json", &shop_module());

    let root = dir.path().to_str().unwrap();
    let out = run_args(&["routelens", "analyze", "bin/*.json", "-d", root, "-f", "text"]).unwrap();

    assert!(out.contains("Shop.Web (modern)"));
    assert!(out.contains("Shop.Web.Controllers.OrdersController"));
    assert!(out.contains("GET /api/Orders"));
    assert!(out.contains("POST /api/Orders/new"));
}

#[test]
fn test_analyze_json_report() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "Shop.Web.json", &shop_module());

    let root = dir.path().to_str().unwrap();
    let out = run_args(&["routelens", "analyze", "*.json", "--dir", root]).unwrap();
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();

    let module = &report[0];
    assert_eq!(module["framework_version"], "modern");
    let controller = &module["controllers"][0];
    assert_eq!(controller["bare_name"], "Orders");
    assert_eq!(controller["attributes"][0]["name"], "Authorize");
    assert_eq!(controller["attributes"][0]["properties"]["Policy"], "Staff");
    assert_eq!(controller["routing_attributes"][0]["properties"]["Route"], "api/[controller]");

    let list = &controller["actions"][0];
    assert_eq!(list["name"], "List");
    assert_eq!(list["is_conventional"], false);
    assert_eq!(list["routes"][0]["path"], "/api/Orders");
    assert_eq!(list["routes"][0]["verbs"], serde_json::json!(["GET"]));

    let table = controller["routes"].as_array().unwrap();
    let paths: Vec<&str> = table.iter().map(|r| r["path"].as_str().unwrap()).collect();
    assert_eq!(paths, vec!["/api/Orders", "/api/Orders/new"]);
    assert_eq!(table[1]["verbs"], serde_json::json!(["POST"]));
}

#[test]
fn test_config_discovered_in_search_root() {
    let dir = TempDir::new().unwrap();
    let module = modern_module()
        .with_type(core_controller("HomeController").with_method(method("Index", vec![])));
    write_module(dir.path(), "Shop.Web.json", &module);
    fs::write(
        dir.path().join("routelens.json"),
        r#"{ "ConventionalRoutes": [ { "Template": "{controller}/{action}" } ] }"#,
    )
    .unwrap();

    // The config document also matches the glob and must not be read as metadata.
    let root = dir.path().to_str().unwrap();
    let out = run_args(&["routelens", "analyze", "*.json", "-d", root, "-f", "text"]).unwrap();
    assert!(out.contains("Index [conventional]"));
    assert!(out.contains("ALL /Home/Index"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    write_module(dir.path(), "Shop.Web.json", &shop_module());
    let config = dir.path().join("routes.yaml");
    fs::write(&config, "conventionalRoutes:\n  - template: \"{id=1?}\"\n").unwrap();

    let root = dir.path().to_str().unwrap();
    let err = run_args(&[
        "routelens",
        "analyze",
        "*.json",
        "-d",
        root,
        "-c",
        config.to_str().unwrap(),
    ])
    .unwrap_err();
    assert!(format!("{err:#}").contains("invalid template"));
}

#[test]
fn test_no_matching_files_fails() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_str().unwrap();
    let err = run_args(&["routelens", "analyze", "*.json", "-d", root]).unwrap_err();
    assert!(err.to_string().contains("No metadata files"));
}

#[test]
fn test_abort_on_ambiguous_prefix() {
    let dir = TempDir::new().unwrap();
    let module = legacy_module().with_type(
        api_controller("ValuesController")
            .with_attribute(attr("RoutePrefix").arg("a"))
            .with_attribute(attr("RoutePrefix").arg("b")),
    );
    write_module(dir.path(), "Shop.Legacy.json", &module);
    let root = dir.path().to_str().unwrap();

    let out = run_args(&["routelens", "analyze", "*.json", "-d", root, "-f", "yaml"]).unwrap();
    assert!(out.contains("controllers: []"));

    let err = run_args(&[
        "routelens",
        "analyze",
        "*.json",
        "-d",
        root,
        "--on-ambiguous-prefix",
        "abort",
    ])
    .unwrap_err();
    assert!(format!("{err:#}").contains("multiple route prefixes"));
}

#[test]
fn test_cross_module_base_types() {
    let dir = TempDir::new().unwrap();
    let shared = ModuleMetadata::new("Shop.Shared").with_type(
        routelens::metadata::TypeDef::new("Shop.Shared", "ShopController")
            .with_base("Microsoft.AspNetCore.Mvc", "Controller")
            .abstract_type(),
    );
    let app = modern_module().with_type(
        routelens::metadata::TypeDef::new(NAMESPACE, "CartController")
            .with_base("Shop.Shared", "ShopController")
            .with_method(method("Show", vec![attr("HttpGet").arg("cart")])),
    );
    write_module(dir.path(), "a/Shop.Shared.json", &shared);
    write_module(dir.path(), "b/Shop.Web.json", &app);

    let root = dir.path().to_str().unwrap();
    let out = run_args(&["routelens", "analyze", "**/*.json", "-d", root, "-f", "text"]).unwrap();
    assert!(out.contains("GET /cart"));
}
