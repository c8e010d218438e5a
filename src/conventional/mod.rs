//! # Conventional Routing Module
//!
//! Parses convention templates such as `{controller}/{action}/{id?}` and
//! matches them against controller/action pairs.
//!
//! ## Template syntax
//!
//! - Text outside `{...}` is a literal part. `{{` and `}}` are literal braces.
//! - `{name}` is a parameter. It may carry `:constraint` tokens, a trailing
//!   `?` (optional) or `=value` (default), but not both. A leading `*` or
//!   `**` marks a catch-all.
//!
//! Constraints are informational only and are preserved when a parameter is
//! rendered back into a path.

mod template;

pub use template::*;
