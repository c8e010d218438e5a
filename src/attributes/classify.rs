use super::types::{HttpVerb, RoutingAttribute};
use crate::metadata::{AttributeValue, RawAttribute};
use tracing::debug;

/// Short names of every annotation the classifier recognises.
pub const ROUTING_ATTRIBUTE_NAMES: [&str; 15] = [
    "Route",
    "RoutePrefix",
    "ApiController",
    "NonAction",
    "ActionName",
    "Area",
    "AcceptVerbs",
    "HttpGet",
    "HttpPost",
    "HttpPut",
    "HttpDelete",
    "HttpPatch",
    "HttpHead",
    "HttpOptions",
    "RouteArea",
];

pub fn is_routing_attribute(raw: &RawAttribute) -> bool {
    ROUTING_ATTRIBUTE_NAMES.contains(&raw.short_name())
}

/// Classify a raw annotation into a [`RoutingAttribute`].
///
/// Unknown annotations yield `None`. Arguments that are missing or have an
/// unexpected shape are treated as unset.
pub fn classify(raw: &RawAttribute) -> Option<RoutingAttribute> {
    let attribute = match raw.short_name() {
        "Route" => RoutingAttribute::Route {
            path: string_arg(raw, "Template", Some(0)),
        },
        "RoutePrefix" => RoutingAttribute::RoutePrefix {
            prefix: string_arg(raw, "Prefix", Some(0)),
        },
        "ApiController" => RoutingAttribute::ApiMarker,
        "NonAction" => RoutingAttribute::NonAction,
        "ActionName" => RoutingAttribute::ActionNameOverride {
            name: string_arg(raw, "Name", Some(0)),
        },
        "Area" | "RouteArea" => RoutingAttribute::Area {
            name: string_arg(raw, "AreaName", Some(0)),
        },
        "AcceptVerbs" => RoutingAttribute::AcceptVerbs {
            verbs: accept_verbs(raw),
            path: string_arg(raw, "Route", None).or_else(|| string_arg(raw, "Template", None)),
        },
        name => {
            let verb = name.strip_prefix("Http").and_then(HttpVerb::parse)?;
            RoutingAttribute::Http {
                verb,
                path: string_arg(raw, "Template", Some(0)),
            }
        }
    };
    Some(attribute)
}

/// Classify every annotation of an owner, dropping non-routing ones.
pub fn classify_all(raw: &[RawAttribute]) -> Vec<RoutingAttribute> {
    raw.iter().filter_map(classify).collect()
}

fn string_arg(raw: &RawAttribute, name: &str, position: Option<usize>) -> Option<String> {
    let value = raw.argument(name, position)?;
    if value.is_null() {
        return None;
    }
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    debug!(
        attribute = %raw.name,
        argument = name,
        found = value.kind(),
        "Attribute argument is not a string, treating as unset"
    );
    None
}

/// `AcceptVerbs` takes either a verb name list, one or more verb name
/// constructor arguments, or a legacy `HttpVerbs` flag value.
fn accept_verbs(raw: &RawAttribute) -> Option<Vec<HttpVerb>> {
    let value = raw.argument("Verbs", Some(0))?;
    let verbs = match value {
        AttributeValue::List(items) => parse_verb_names(raw, items.iter()),
        AttributeValue::String(_) if raw.named.contains_key("Verbs") => {
            parse_verb_names(raw, std::iter::once(value))
        }
        AttributeValue::String(_) => parse_verb_names(raw, raw.positional.iter()),
        AttributeValue::Int(flags) => HttpVerb::from_flags(*flags),
        AttributeValue::Null => return None,
        other => {
            debug!(
                attribute = %raw.name,
                found = other.kind(),
                "AcceptVerbs argument has an unexpected shape, treating as unset"
            );
            return None;
        }
    };
    Some(verbs)
}

fn parse_verb_names<'a>(
    raw: &RawAttribute,
    values: impl Iterator<Item = &'a AttributeValue>,
) -> Vec<HttpVerb> {
    let mut verbs = Vec::new();
    for value in values {
        if let Some(flags) = value.as_i64() {
            for verb in HttpVerb::from_flags(flags) {
                if !verbs.contains(&verb) {
                    verbs.push(verb);
                }
            }
            continue;
        }
        let parsed = value.as_str().and_then(HttpVerb::parse);
        match parsed {
            Some(verb) if !verbs.contains(&verb) => verbs.push(verb),
            Some(_) => {}
            None => debug!(attribute = %raw.name, value = %value, "Ignoring unrecognised verb"),
        }
    }
    verbs
}
