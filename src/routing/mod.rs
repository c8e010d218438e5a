//! # Routing Module
//!
//! Turns an action's routing attributes and propagated fragments into
//! concrete [`Route`]s.
//!
//! ## Overview
//!
//! For every pair of applicable controller prefix and route candidate the
//! calculator joins prefix and suffix into an absolute path, resolves the
//! allowed verbs and finally coalesces routes that share a path into one
//! entry carrying the union of their verbs.
//!
//! Verb resolution, in order of precedence:
//!
//! 1. the route candidate's own verb override
//! 2. the union of every verb override on the action
//! 3. legacy API controllers only: the verb named by the method's prefix,
//!    POST when none matches
//! 4. every verb

mod calculator;
mod route;

pub use calculator::{infer_verb, RouteCalculator};
pub use route::{coalesce, join, merge_route, Route};
