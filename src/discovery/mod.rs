//! # Discovery Module
//!
//! Finds controller types in a module and enumerates their action methods.
//!
//! A type is a controller when it is concrete and either inherits from one of
//! the framework controller base classes or carries an attribute that enables
//! controller behavior. The branch that matched decides the
//! [`ControllerKind`], which later selects verb defaults and gates
//! kind-specific conventional templates.

mod action;
mod candidate;
mod controller;

pub use action::ActionFinder;
pub use candidate::*;
pub use controller::ControllerFinder;

#[cfg(test)]
mod tests;
