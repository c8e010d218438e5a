use super::classify::is_routing_attribute;
use super::types::RoutingAttribute;
use crate::metadata::{AttributeValue, RawAttribute};
use serde::{Serialize, Serializer};

/// An annotation exported alongside the route table.
///
/// Properties keep insertion order: constructor arguments keyed `"0"`,
/// `"1"`, ... come first, then named arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedAttribute {
    pub name: String,
    #[serde(serialize_with = "serialize_properties")]
    pub properties: Vec<(String, AttributeValue)>,
}

impl SerializedAttribute {
    /// Export a non-routing annotation. Routing annotations yield `None`.
    pub fn from_raw(raw: &RawAttribute) -> Option<Self> {
        if is_routing_attribute(raw) {
            return None;
        }
        let positional = raw
            .positional
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.clone()));
        let named = raw.named.iter().map(|(k, v)| (k.clone(), v.clone()));
        Some(Self {
            name: raw.short_name().to_string(),
            properties: positional.chain(named).collect(),
        })
    }

    /// Export a classified routing attribute, omitting unset properties.
    pub fn from_routing(attribute: &RoutingAttribute) -> Self {
        let mut properties = Vec::new();
        if let Some(route) = attribute.route() {
            properties.push(("Route".to_string(), AttributeValue::from(route)));
        }
        if let Some(prefix) = attribute.route_prefix() {
            properties.push(("Prefix".to_string(), AttributeValue::from(prefix)));
        }
        if let Some(verbs) = attribute.verb_override() {
            let names: Vec<&str> = verbs.iter().map(|v| v.as_str()).collect();
            properties.push(("HttpMethod".to_string(), AttributeValue::from(names)));
        }
        if let Some(area) = attribute.area() {
            properties.push(("Area".to_string(), AttributeValue::from(area)));
        }
        if let Some(name) = attribute.action_name() {
            properties.push(("ActionName".to_string(), AttributeValue::from(name)));
        }
        Self {
            name: attribute.name(),
            properties,
        }
    }

    #[cfg(test)]
    pub(crate) fn property(&self, key: &str) -> Option<&AttributeValue> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

fn serialize_properties<S>(
    properties: &[(String, AttributeValue)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(properties.iter().map(|(k, v)| (k, v)))
}
