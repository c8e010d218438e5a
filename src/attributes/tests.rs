#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::metadata::{AttributeValue, RawAttribute};
use crate::policy::FrameworkPolicy;

#[test]
fn test_classify_route_positional_and_named() {
    let positional = classify(&RawAttribute::new("RouteAttribute").arg("orders")).unwrap();
    assert_eq!(positional.route(), Some("orders"));

    let named = classify(
        &RawAttribute::new("Microsoft.AspNetCore.Mvc.Route").named_arg("Template", "api/orders"),
    )
    .unwrap();
    assert_eq!(named.route(), Some("api/orders"));
}

#[test]
fn test_classify_http_verbs() {
    let get = classify(&RawAttribute::new("HttpGetAttribute").arg("items/{id}")).unwrap();
    assert_eq!(
        get,
        RoutingAttribute::Http {
            verb: HttpVerb::Get,
            path: Some("items/{id}".into())
        }
    );
    assert_eq!(get.name(), "HttpGet");
    assert_eq!(get.verb_override(), Some(vec![HttpVerb::Get]));

    let options = classify(&RawAttribute::new("HttpOptions")).unwrap();
    assert_eq!(options.route(), None);
    assert!(options.can_generate_route());
    assert_eq!(options.name(), "HttpOptions");
}

#[test]
fn test_unknown_attributes_are_not_routing() {
    assert!(classify(&RawAttribute::new("AuthorizeAttribute")).is_none());
    assert!(classify(&RawAttribute::new("HttpResponseCache")).is_none());
    assert!(!is_routing_attribute(&RawAttribute::new("Produces")));
}

#[test]
fn test_wrong_argument_shape_is_unset() {
    let attr = classify(&RawAttribute::new("Route").arg(42i64)).unwrap();
    assert_eq!(attr, RoutingAttribute::Route { path: None });

    let null_named = classify(
        &RawAttribute::new("Route")
            .arg("ignored")
            .named_arg("Template", AttributeValue::Null),
    )
    .unwrap();
    assert_eq!(null_named.route(), None);
}

#[test]
fn test_accept_verbs_shapes() {
    let list = classify(
        &RawAttribute::new("AcceptVerbs")
            .arg(vec!["get", "POST"])
            .named_arg("Route", "search"),
    )
    .unwrap();
    assert_eq!(list.verb_override(), Some(vec![HttpVerb::Get, HttpVerb::Post]));
    assert_eq!(list.route(), Some("search"));

    let params = classify(&RawAttribute::new("AcceptVerbs").arg("PUT").arg("delete")).unwrap();
    assert_eq!(params.verb_override(), Some(vec![HttpVerb::Put, HttpVerb::Delete]));

    let flags = classify(&RawAttribute::new("AcceptVerbsAttribute").arg(1i64 | 2 | 64)).unwrap();
    assert_eq!(
        flags.verb_override(),
        Some(vec![HttpVerb::Get, HttpVerb::Post, HttpVerb::Options])
    );

    let mixed = classify(
        &RawAttribute::new("AcceptVerbs")
            .arg("put")
            .arg(2i64 | 4)
            .arg("POST"),
    )
    .unwrap();
    assert_eq!(mixed.verb_override(), Some(vec![HttpVerb::Put, HttpVerb::Post]));

    let none = classify(&RawAttribute::new("AcceptVerbs")).unwrap();
    assert_eq!(none.verb_override(), None);
    assert!(none.can_generate_route());
}

#[test]
fn test_propagation_depends_on_policy() {
    let route = RoutingAttribute::Route {
        path: Some("x".into()),
    };
    let prefix = RoutingAttribute::RoutePrefix {
        prefix: Some("p".into()),
    };
    let legacy = FrameworkPolicy::legacy();
    let modern = FrameworkPolicy::modern();

    assert_eq!(route.propagation(&modern), Propagation::PropagateAlways);
    assert_eq!(route.propagation(&legacy), Propagation::PropagateToUnroutedOnly);
    assert_eq!(prefix.propagation(&legacy), Propagation::PropagateToRoutedOnly);
    assert_eq!(prefix.propagation(&modern), Propagation::PropagateToRoutedOnly);
    assert_eq!(RoutingAttribute::NonAction.propagation(&modern), Propagation::None);

    assert!(!prefix.can_generate_route());
    assert_eq!(prefix.fragment(), Some("p"));
    assert_eq!(prefix.route(), None);
}

#[test]
fn test_api_marker_behaviour() {
    let marker = classify(&RawAttribute::new("ApiControllerAttribute")).unwrap();
    assert!(marker.enables_controller());
    assert!(marker.disables_conventional_routes(&FrameworkPolicy::modern()));
    assert!(!marker.disables_conventional_routes(&FrameworkPolicy::legacy()));
    assert!(RoutingAttribute::NonAction.disables_conventional_routes(&FrameworkPolicy::legacy()));
}

#[test]
fn test_action_name_and_area() {
    let name = classify(&RawAttribute::new("ActionName").arg("list-all")).unwrap();
    assert_eq!(name.action_name(), Some("list-all"));
    let area = classify(&RawAttribute::new("Area").arg("Admin")).unwrap();
    assert_eq!(area.area(), Some("Admin"));
    let legacy_area = classify(&RawAttribute::new("RouteArea").named_arg("AreaName", "Ops")).unwrap();
    assert_eq!(legacy_area.area(), Some("Ops"));
}

#[test]
fn test_serialize_non_routing_attribute() {
    let raw = RawAttribute::new("System.Web.Mvc.OutputCacheAttribute")
        .arg(30i64)
        .arg("public")
        .named_arg("VaryByParam", "none");
    let serialized = SerializedAttribute::from_raw(&raw).unwrap();
    assert_eq!(serialized.name, "OutputCache");
    let keys: Vec<&str> = serialized.properties.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["0", "1", "VaryByParam"]);

    let json = serde_json::to_string(&serialized).unwrap();
    assert_eq!(
        json,
        r#"{"name":"OutputCache","properties":{"0":30,"1":"public","VaryByParam":"none"}}"#
    );

    assert!(SerializedAttribute::from_raw(&RawAttribute::new("HttpGet")).is_none());
}

#[test]
fn test_serialize_routing_attribute_omits_unset() {
    let attr = RoutingAttribute::Http {
        verb: HttpVerb::Delete,
        path: None,
    };
    let serialized = SerializedAttribute::from_routing(&attr);
    assert_eq!(serialized.name, "HttpDelete");
    assert!(serialized.property("Route").is_none());
    assert_eq!(
        serialized.property("HttpMethod"),
        Some(&AttributeValue::List(vec![AttributeValue::String("DELETE".into())]))
    );
}

#[test]
fn test_verb_helpers() {
    assert_eq!(HttpVerb::parse(" patch "), Some(HttpVerb::Patch));
    assert_eq!(HttpVerb::parse("TRACE"), None);
    assert_eq!(HttpVerb::parse("get"), Some(HttpVerb::Get));
    assert_eq!(HttpVerb::parse(""), None);
    assert_eq!(HttpVerb::parse("not a verb"), None);
    assert_eq!(HttpVerb::all().len(), 7);
    assert_eq!(HttpVerb::Head.to_method(), http::Method::HEAD);
    assert_eq!(HttpVerb::try_from(&http::Method::PUT), Ok(HttpVerb::Put));
}
