use crate::discovery::ControllerKind;
use crate::error::TemplateParseError;
use crate::policy::FrameworkPolicy;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// Escaped braces are swapped for private-use characters while splitting so
// that `{{` and `}}` never start or end a parameter span.
const ESCAPED_OPEN: char = '\u{E000}';
const ESCAPED_CLOSE: char = '\u{E001}';

static PARAMETER_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^{}]*\}").expect("parameter span regex should be valid"));

pub const CONTROLLER_PART: &str = "controller";
pub const ACTION_PART: &str = "action";
pub const AREA_PART: &str = "area";
pub const ID_PART: &str = "id";

/// Catch-all marker of a parameter (`{*rest}` or `{**rest}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatchAll {
    #[default]
    None,
    /// `*`: slashes in the captured value are encoded
    Single,
    /// `**`: slashes in the captured value are kept
    Double,
}

impl CatchAll {
    fn marker(&self) -> &'static str {
        match self {
            CatchAll::None => "",
            CatchAll::Single => "*",
            CatchAll::Double => "**",
        }
    }
}

/// A `{name:constraint=default}` parameter of a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParameter {
    pub name: String,
    pub catch_all: CatchAll,
    pub optional: bool,
    pub default: Option<String>,
    /// Constraint tokens, kept for display only
    pub constraints: Vec<String>,
}

impl TemplateParameter {
    fn parse(template: &str, span: &str) -> Result<Self, TemplateParseError> {
        let fail = |reason: &str| TemplateParseError::new(template, span, reason);

        let mut inner = span
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| fail("parameter must be enclosed in braces"))?;

        let catch_all = if let Some(rest) = inner.strip_prefix("**") {
            inner = rest;
            CatchAll::Double
        } else if let Some(rest) = inner.strip_prefix('*') {
            inner = rest;
            CatchAll::Single
        } else {
            CatchAll::None
        };

        let optional = match inner.strip_suffix('?') {
            Some(rest) => {
                inner = rest;
                true
            }
            None => false,
        };

        let default = match find_top_level(inner, '=') {
            Some(index) => {
                let value = inner[index + 1..].to_string();
                inner = &inner[..index];
                Some(value)
            }
            None => None,
        };

        if optional && default.is_some() {
            return Err(fail("a parameter cannot be both optional and have a default value"));
        }

        let mut tokens = split_top_level(inner, ':').into_iter();
        let name = tokens.next().unwrap_or_default();
        if name.is_empty() {
            return Err(fail("parameter name is empty"));
        }
        if name.contains(['{', '}', '?', '*', '/']) {
            return Err(fail("parameter name contains a reserved character"));
        }

        Ok(Self {
            name: name.to_string(),
            catch_all,
            optional,
            default,
            constraints: tokens.map(str::to_string).collect(),
        })
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for TemplateParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}{}", self.catch_all.marker(), self.name)?;
        for constraint in &self.constraints {
            write!(f, ":{constraint}")?;
        }
        if let Some(default) = &self.default {
            write!(f, "={default}")?;
        }
        if self.optional {
            f.write_str("?")?;
        }
        f.write_str("}")
    }
}

/// Index of the first `needle` outside any parentheses.
fn find_top_level(s: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == needle && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_top_level(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s;
    while let Some(index) = find_top_level(rest, separator) {
        parts.push(&rest[..index]);
        rest = &rest[index + separator.len_utf8()..];
    }
    parts.push(rest);
    parts
}

/// One segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Parameter(TemplateParameter),
}

impl TemplatePart {
    pub fn parameter(&self) -> Option<&TemplateParameter> {
        match self {
            TemplatePart::Parameter(p) => Some(p),
            TemplatePart::Literal(_) => None,
        }
    }
}

impl fmt::Display for TemplatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplatePart::Literal(text) => f.write_str(text),
            TemplatePart::Parameter(p) => write!(f, "{p}"),
        }
    }
}

impl FromStr for TemplatePart {
    type Err = TemplateParseError;

    /// Parse a string holding exactly one literal or one parameter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = parse_parts(s)?;
        match (parts.pop(), parts.is_empty()) {
            (Some(part), true) => Ok(part),
            (None, _) => Ok(TemplatePart::Literal(String::new())),
            (Some(_), false) => Err(TemplateParseError::new(
                s,
                s,
                "expected a single template part",
            )),
        }
    }
}

fn escape(s: &str) -> String {
    s.replace("{{", &ESCAPED_OPEN.to_string())
        .replace("}}", &ESCAPED_CLOSE.to_string())
}

fn unescape(s: &str) -> String {
    s.replace(ESCAPED_OPEN, "{{").replace(ESCAPED_CLOSE, "}}")
}

fn parse_parts(template: &str) -> Result<Vec<TemplatePart>, TemplateParseError> {
    let escaped = escape(template);
    let mut parts = Vec::new();
    let mut cursor = 0;

    for span in PARAMETER_SPAN.find_iter(&escaped) {
        push_literal(template, &mut parts, &escaped[cursor..span.start()])?;
        let parameter = TemplateParameter::parse(template, &unescape(span.as_str()))?;
        parts.push(TemplatePart::Parameter(parameter));
        cursor = span.end();
    }
    push_literal(template, &mut parts, &escaped[cursor..])?;
    Ok(parts)
}

/// Text between parameter spans. Any brace left here is unbalanced.
fn push_literal(
    template: &str,
    parts: &mut Vec<TemplatePart>,
    text: &str,
) -> Result<(), TemplateParseError> {
    if text.is_empty() {
        return Ok(());
    }
    if text.contains(['{', '}']) {
        return Err(TemplateParseError::new(
            template,
            unescape(text),
            "unbalanced brace",
        ));
    }
    parts.push(TemplatePart::Literal(unescape(text)));
    Ok(())
}

/// The controller/action pair a conventional template is matched against.
#[derive(Debug, Clone, Copy)]
pub struct RouteTarget<'a> {
    pub controller: &'a str,
    pub action: &'a str,
    pub area: Option<&'a str>,
    pub kind: ControllerKind,
}

/// A parsed conventional route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalRoute {
    pub template: String,
    pub parts: Vec<TemplatePart>,
    pub defaults: BTreeMap<String, String>,
    /// Restricts the template to one controller kind under the legacy policy
    pub kind: Option<ControllerKind>,
}

impl ConventionalRoute {
    pub fn parse(
        template: &str,
        defaults: BTreeMap<String, String>,
        kind: Option<ControllerKind>,
    ) -> Result<Self, TemplateParseError> {
        Ok(Self {
            template: template.to_string(),
            parts: parse_parts(template)?,
            defaults,
            kind,
        })
    }

    pub fn part(&self, name: &str) -> Option<&TemplateParameter> {
        self.parts
            .iter()
            .filter_map(TemplatePart::parameter)
            .find(|p| p.is_named(name))
    }

    pub fn controller_part(&self) -> Option<&TemplateParameter> {
        self.part(CONTROLLER_PART)
    }

    pub fn action_part(&self) -> Option<&TemplateParameter> {
        self.part(ACTION_PART)
    }

    pub fn area_part(&self) -> Option<&TemplateParameter> {
        self.part(AREA_PART)
    }

    pub fn id_part(&self) -> Option<&TemplateParameter> {
        self.part(ID_PART)
    }

    /// Static default for a route value, keys compared case-insensitively
    pub fn default_for(&self, name: &str) -> Option<&str> {
        self.defaults
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Match the template against a controller/action pair and return the
    /// instantiated path, or `None` when the template does not apply.
    pub fn match_target(&self, target: &RouteTarget<'_>, policy: &FrameworkPolicy) -> Option<String> {
        if policy.enforce_kind_affinity && self.kind.is_some_and(|k| k != target.kind) {
            return None;
        }

        let controller = match self.controller_part() {
            Some(_) => Some(target.controller),
            None => self.default_for(CONTROLLER_PART),
        };
        if controller != Some(target.controller) {
            return None;
        }

        let action = match self.action_part() {
            Some(_) => Some(target.action),
            None => self.default_for(ACTION_PART),
        };
        if action != Some(target.action) {
            return None;
        }

        let area = match self.area_part() {
            Some(_) => Some(target.area?),
            None => {
                if self.default_for(AREA_PART) != target.area {
                    return None;
                }
                None
            }
        };

        Some(self.instantiate(Some(target.controller), Some(target.action), area))
    }

    /// Render the template with concrete controller/action/area values.
    /// Unresolved parameters keep their canonical form.
    pub fn instantiate(
        &self,
        controller: Option<&str>,
        action: Option<&str>,
        area: Option<&str>,
    ) -> String {
        let mut path = String::new();
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => path.push_str(text),
                TemplatePart::Parameter(p) => {
                    let value = if p.is_named(CONTROLLER_PART) {
                        controller
                    } else if p.is_named(ACTION_PART) {
                        action
                    } else if p.is_named(AREA_PART) {
                        area
                    } else {
                        None
                    };
                    match value {
                        Some(value) => path.push_str(value),
                        None => path.push_str(&p.to_string()),
                    }
                }
            }
        }
        format!("/{}", path.trim_matches('/'))
    }
}

impl fmt::Display for ConventionalRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{part}")?;
        }
        Ok(())
    }
}
