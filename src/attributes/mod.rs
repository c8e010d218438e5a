//! # Attributes Module
//!
//! Turns raw custom annotations into the closed set of routing attributes the
//! route engine understands.
//!
//! ## Overview
//!
//! - [`classify`] maps a [`RawAttribute`](crate::metadata::RawAttribute) to a
//!   [`RoutingAttribute`] or `None`. Names match with or without the
//!   `Attribute` suffix and regardless of namespace.
//! - [`RoutingAttribute`] answers every routing question (own route,
//!   propagation mode, verb override, ...) as a pure function of its data and
//!   the active [`FrameworkPolicy`](crate::policy::FrameworkPolicy).
//! - [`SerializedAttribute`] is the export shape for both routing and
//!   non-routing annotations.

mod classify;
mod serialized;
mod types;

pub use classify::{classify, classify_all, is_routing_attribute, ROUTING_ATTRIBUTE_NAMES};
pub use serialized::SerializedAttribute;
pub use types::*;

#[cfg(test)]
mod tests;
