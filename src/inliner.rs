//! # Placeholder Inliner
//!
//! Substitutes `[controller]`, `[action]`, `{controller}` and `{action}`
//! tokens in computed attribute routes with the concrete controller and
//! action names.
//!
//! Optional forms (`{controller?}`, `{action:alpha?}`) may be omitted by a
//! request, so a route containing them fans out into several paths:
//!
//! - every placeholder filled
//! - every optional placeholder elided, when that leaves the path before the
//!   first mandatory placeholder unchanged
//! - the earlier optional placeholder filled and later ones elided
//!
//! Doubled brackets and braces are literal text and never match.

use crate::discovery::{ActionCandidate, ControllerCandidate};
use crate::policy::FrameworkPolicy;
use crate::routing::{merge_route, Route};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const ESCAPES: [(&str, char); 4] = [
    ("{{", '\u{E000}'),
    ("}}", '\u{E001}'),
    ("[[", '\u{E002}'),
    ("]]", '\u{E003}'),
];

static MANDATORY_CONTROLLER: Lazy<Regex> = Lazy::new(|| mandatory_pattern("controller"));
static MANDATORY_ACTION: Lazy<Regex> = Lazy::new(|| mandatory_pattern("action"));
static OPTIONAL_CONTROLLER: Lazy<Regex> = Lazy::new(|| optional_pattern("controller"));
static OPTIONAL_ACTION: Lazy<Regex> = Lazy::new(|| optional_pattern("action"));
static PLACEHOLDER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\[(?:controller|action)\]|\{(?:controller|action)(?::[^{}?=]*)?(?:=[^{}?]*)?\??\}",
    )
    .expect("placeholder token regex should be valid")
});

fn mandatory_pattern(name: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)\[{name}\]|\{{{name}(?::[^{{}}?=]*)?(?:=[^{{}}?]*)?\}}"
    ))
    .expect("mandatory placeholder regex should be valid")
}

fn optional_pattern(name: &str) -> Regex {
    Regex::new(&format!(r"(?i)\{{{name}(?::[^{{}}?=]*)?\?\}}"))
        .expect("optional placeholder regex should be valid")
}

#[derive(Debug, Clone, Copy)]
pub struct PlaceholderInliner {
    policy: FrameworkPolicy,
}

impl PlaceholderInliner {
    pub fn new(policy: FrameworkPolicy) -> Self {
        Self { policy }
    }

    pub fn inline_placeholders(&self, controllers: &mut [ControllerCandidate]) {
        if !self.policy.placeholders {
            return;
        }
        for controller in controllers {
            let controller_name = controller.bare_name().to_string();
            for action in &mut controller.actions {
                inline_action(&controller_name, action);
            }
        }
    }
}

/// Rebuild an action's attribute routes with placeholders substituted.
fn inline_action(controller: &str, action: &mut ActionCandidate) {
    let action_name = action.action_name().to_string();
    let original = std::mem::take(&mut action.routes);
    let mut rebuilt: Vec<Route> = Vec::with_capacity(original.len());

    for route in original {
        if !route.path.contains(['{', '[']) {
            merge_route(&mut rebuilt, route);
            continue;
        }
        let variants = inline_path(&route.path, controller, &action_name);
        if variants.len() > 1 || variants.first() != Some(&route.path) {
            debug!(
                controller,
                action = %action_name,
                path = %route.path,
                variants = ?variants,
                "Inlined route placeholders"
            );
        }
        for path in variants {
            merge_route(
                &mut rebuilt,
                Route {
                    path,
                    verbs: route.verbs.clone(),
                },
            );
        }
    }
    action.routes = rebuilt;
}

/// Every concrete path a placeholder route expands to. The fully filled
/// variant always comes first.
pub fn inline_path(path: &str, controller: &str, action: &str) -> Vec<String> {
    let escaped = escape(path);
    let fill = |s: &str| fill_mandatory(s, controller, action);

    let optionals = optional_matches(&escaped);
    if optionals.is_empty() {
        return vec![unescape(&normalize(&fill(&escaped)))];
    }

    let mut variants: Vec<String> = Vec::new();
    let mut push = |candidate: String| {
        let candidate = unescape(&normalize(&candidate));
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    };

    push(fill(&rewrite_optionals(&escaped, &optionals, |_| true, controller, action)));

    if elision_keeps_prefix(&escaped, controller, action) {
        push(fill(&rewrite_optionals(&escaped, &optionals, |_| false, controller, action)));
    }

    if optionals.len() > 1 {
        push(fill(&rewrite_optionals(
            &escaped,
            &optionals,
            |i| i == 0,
            controller,
            action,
        )));
    }

    variants
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Controller,
    Action,
}

#[derive(Debug, Clone, Copy)]
struct OptionalMatch {
    start: usize,
    end: usize,
    placeholder: Placeholder,
}

fn optional_matches(path: &str) -> Vec<OptionalMatch> {
    let controllers = OPTIONAL_CONTROLLER.find_iter(path).map(|m| OptionalMatch {
        start: m.start(),
        end: m.end(),
        placeholder: Placeholder::Controller,
    });
    let actions = OPTIONAL_ACTION.find_iter(path).map(|m| OptionalMatch {
        start: m.start(),
        end: m.end(),
        placeholder: Placeholder::Action,
    });
    let mut matches: Vec<OptionalMatch> = controllers.chain(actions).collect();
    matches.sort_by_key(|m| m.start);
    matches
}

/// Replace each optional placeholder with its value when `keep(i)` holds for
/// its position, or drop it otherwise.
fn rewrite_optionals(
    path: &str,
    optionals: &[OptionalMatch],
    keep: impl Fn(usize) -> bool,
    controller: &str,
    action: &str,
) -> String {
    let mut out = String::with_capacity(path.len());
    let mut cursor = 0;
    for (i, m) in optionals.iter().enumerate() {
        out.push_str(&path[cursor..m.start]);
        if keep(i) {
            out.push_str(match m.placeholder {
                Placeholder::Controller => controller,
                Placeholder::Action => action,
            });
        }
        cursor = m.end;
    }
    out.push_str(&path[cursor..]);
    out
}

fn fill_mandatory(path: &str, controller: &str, action: &str) -> String {
    let filled = MANDATORY_CONTROLLER.replace_all(path, regex::NoExpand(controller));
    MANDATORY_ACTION
        .replace_all(&filled, regex::NoExpand(action))
        .into_owned()
}

/// Whether dropping the optional placeholders leaves the path before the
/// first mandatory placeholder unchanged. Without a mandatory placeholder
/// elision is always allowed.
fn elision_keeps_prefix(path: &str, controller: &str, action: &str) -> bool {
    let first_mandatory = [&*MANDATORY_CONTROLLER, &*MANDATORY_ACTION]
        .into_iter()
        .filter_map(|re| re.find(path))
        .map(|m| m.start())
        .min();
    let Some(end) = first_mandatory else {
        return true;
    };
    let head = &path[..end];
    let optionals = optional_matches(head);
    let filled = rewrite_optionals(head, &optionals, |_| true, controller, action);
    let elided = rewrite_optionals(head, &optionals, |_| false, controller, action);
    normalize(&filled) == normalize(&elided)
}

/// Collapse repeated slashes, make the path absolute and drop a trailing
/// slash unless the path is the root.
fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Swap doubled brackets and braces for private-use characters. A complete
/// placeholder span is copied as is, so `{{{controller}}}` keeps its token.
fn escape(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut pos = 0;
    while pos < path.len() {
        if let Some(token) = PLACEHOLDER_TOKEN
            .find_at(path, pos)
            .filter(|m| m.start() == pos)
        {
            out.push_str(token.as_str());
            pos = token.end();
            continue;
        }
        let rest = &path[pos..];
        if let Some((seq, c)) = ESCAPES.iter().find(|(seq, _)| rest.starts_with(*seq)) {
            out.push(*c);
            pos += seq.len();
            continue;
        }
        let Some(c) = rest.chars().next() else {
            break;
        };
        out.push(c);
        pos += c.len_utf8();
    }
    out
}

fn unescape(path: &str) -> String {
    ESCAPES
        .iter()
        .fold(path.to_string(), |acc, (seq, c)| acc.replace(*c, seq))
}
