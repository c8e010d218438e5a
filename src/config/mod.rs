//! # Configuration Module
//!
//! Loads the routing configuration document that lists conventional route
//! templates.
//!
//! ## Document format
//!
//! ```json
//! {
//!   "conventionalRoutes": [
//!     { "template": "{controller=Home}/{action=Index}/{id?}", "kind": "mvc" },
//!     { "template": "api/{controller}/{id?}", "defaults": {}, "kind": "api" }
//!   ]
//! }
//! ```
//!
//! PascalCase keys (`ConventionalRoutes`, `Template`, `Defaults`, `Type`) are
//! accepted as well. YAML documents use the same shape.
//!
//! ## Lookup order
//!
//! 1. an explicit path
//! 2. `routelens.json` (or `.yaml`/`.yml`) in the search root
//! 3. the nearest ancestor directory of the metadata file holding one
//!
//! No document means no conventional routing.

mod document;
mod lookup;

pub use document::{load_config, ConfigDocument, RoutingConfig, TemplateEntry};
pub use lookup::{find_config_in, find_nearest_config, resolve_config, CONFIG_FILE_NAMES};
