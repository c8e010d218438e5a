//! # routelens
//!
//! **routelens** statically reconstructs the HTTP route table of an ASP.NET
//! application from the metadata of its compiled modules, without running the
//! application.
//!
//! ## Overview
//!
//! The route table of a running application is built from declarative
//! annotations on controller types and action methods, plus optional
//! convention templates such as `{controller=Home}/{action=Index}/{id?}`.
//! routelens replays that construction for both runtime generations, the
//! `System.Web` based framework and ASP.NET Core, whose rules differ in
//! propagation, verb defaults and placeholder support.
//!
//! ## Architecture
//!
//! Pipeline, leaves first:
//!
//! - **[`metadata`]** - In-memory module metadata and the [`MetadataAccessor`] trait
//! - **[`attributes`]** - Classification of raw annotations into [`RoutingAttribute`]s
//! - **[`policy`]** - Per-framework-version behavioral switches
//! - **[`discovery`]** - Controller and action candidate discovery
//! - **[`propagation`]** - Controller-level route fragments handed down to actions
//! - **[`routing`]** - Attribute route calculation, verb resolution and coalescing
//! - **[`conventional`]** - Convention template parsing, matching and instantiation
//! - **[`inliner`]** - `[controller]`/`{action}` placeholder substitution
//! - **[`query`]** - Runs the stages above over one module in order
//!
//! Around the core:
//!
//! - **[`config`]** - Routing configuration document lookup and loading
//! - **[`report`]** - Export shapes and JSON/YAML/text writers
//! - **[`search`]** - Glob-based metadata file discovery
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//! - **[`cli`]** - The `routelens` command line
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use routelens::{analyze_module, load_config, load_module, AnalysisOptions, ModuleSet};
//!
//! let set = ModuleSet::new(vec![load_module("bin/Shop.Web.json")?]);
//! let config = load_config("routelens.json")?;
//! for view in set.views() {
//!     let module = analyze_module(&view, None, Some(&config), AnalysisOptions::default())?;
//!     for controller in &module.controllers {
//!         for action in &controller.actions {
//!             println!("{} {:?}", action.name, action.routes);
//!         }
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The library only emits `tracing` events; see [`logging`] for the
//! environment variables the binary reads.

pub mod attributes;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod discovery;
pub mod error;
pub mod inliner;
pub mod logging;
pub mod metadata;
pub mod policy;
pub mod propagation;
pub mod query;
pub mod report;
pub mod routing;
pub mod search;

pub use attributes::{classify, HttpVerb, Propagation, RoutingAttribute, SerializedAttribute};
pub use config::{load_config, resolve_config, RoutingConfig};
pub use conventional::{ConventionalRoute, RouteTarget};
pub use discovery::{ActionCandidate, ControllerCandidate, ControllerKind};
pub use error::{
    AmbiguousPrefixError, AnalysisError, ConfigError, MetadataError, ReportError, SearchError,
    TemplateParseError,
};
pub use metadata::{load_module, MetadataAccessor, ModuleMetadata, ModuleSet, ModuleView};
pub use policy::{FrameworkPolicy, FrameworkVersion};
pub use query::{AmbiguousPrefixPolicy, AnalysisOptions, AssemblyQuery};
pub use report::{analyze_module, write_report, AnalyzedModule, OutputFormat};
pub use routing::Route;
