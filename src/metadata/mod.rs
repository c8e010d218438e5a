//! # Metadata Module
//!
//! In-memory model of compiled module metadata and the [`MetadataAccessor`]
//! trait the analysis pipeline reads it through.
//!
//! ## Overview
//!
//! Reading raw bytes of a binary module is the job of an external reader,
//! which emits one JSON or YAML dump per module. A dump lists the module's
//! declared types with their base type reference, methods with their flags,
//! and the raw custom attributes attached to each.
//!
//! [`ModuleSet`] holds every dump of a run and resolves base type references
//! across modules. [`ModuleView`] exposes one module through
//! [`MetadataAccessor`].

mod accessor;
mod detect;
mod load;
mod types;

pub use accessor::*;
pub use detect::detect_framework_version;
pub use load::load_module;
pub(crate) use load::is_yaml;
pub(crate) use types::full_name;
pub use types::*;
