//! Subscription instances and life-cycle ordering.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::net::SocketAddr;

use common::{client, MockTransport};
use wbem_client::config::SubscriptionSection;
use wbem_client::subscription::{
    clean_subscriptions, subscribe, unsubscribe, SubscriptionParams, DESTINATION_CLASS,
    FILTER_CLASS, SUBSCRIPTION_CLASS,
};
use wbem_core::model::{CimProperty, KeyBindingValue, ValueReference};

fn params() -> SubscriptionParams {
    let dest: SocketAddr = "10.0.0.5:59988".parse().unwrap();
    SubscriptionParams::from_config(&SubscriptionSection::default(), "mgmt01", dest)
}

#[test]
fn filter_carries_query_and_keys() {
    let f = params().filter_instance();
    assert_eq!(f.class_name, FILTER_CLASS);
    let names: Vec<&str> = f.properties.iter().map(CimProperty::name).collect();
    assert_eq!(
        names,
        [
            "QueryLanguage",
            "Query",
            "SourceNamespace",
            "Name",
            "CreationClassName",
            "SystemName",
            "SystemCreationClassName"
        ]
    );
    assert_eq!(f.value("Query"), Some("SELECT * FROM CIM_AlertIndication"));
    assert_eq!(f.value("SourceNamespace"), Some("root/cimv2"));
    assert_eq!(f.value("Name"), Some("wbem-rs:DefaultFilter"));
    assert_eq!(f.value("SystemName"), Some("mgmt01"));
}

#[test]
fn destination_points_back_at_listener() {
    let p = params();
    let d = p.destination_instance();
    assert_eq!(d.class_name, DESTINATION_CLASS);
    assert_eq!(d.value("Destination"), Some("http://10.0.0.5:59988"));
    assert_eq!(d.value("Name"), Some("wbem-rs:10.0.0.5"));
    assert_eq!(d.value("SystemCreationClassName"), Some("CIM_ComputerSystem"));
}

#[test]
fn subscription_references_filter_and_handler() {
    let s = params().subscription_instance("root/interop");

    let Some(CimProperty::Reference(handler)) = s.property("Handler") else {
        panic!("Handler must be a reference property");
    };
    assert_eq!(handler.reference_class.as_deref(), Some(DESTINATION_CLASS));
    let Some(ValueReference::LocalInstancePath(path)) = &handler.value else {
        panic!("Handler must reference a local instance path");
    };
    assert_eq!(path.namespace.segments, ["root", "interop"]);
    assert_eq!(path.instance_name.class_name, DESTINATION_CLASS);
    assert!(matches!(
        path.instance_name.key("Name"),
        Some(KeyBindingValue::Value(kv)) if kv.value == "wbem-rs:10.0.0.5"
    ));

    let Some(CimProperty::Reference(filter)) = s.property("Filter") else {
        panic!("Filter must be a reference property");
    };
    let Some(ValueReference::LocalInstancePath(path)) = &filter.value else {
        panic!("Filter must reference a local instance path");
    };
    assert!(matches!(
        path.instance_name.key("CreationClassName"),
        Some(KeyBindingValue::Value(kv)) if kv.value == FILTER_CLASS
    ));
}

#[tokio::test]
async fn subscribe_creates_in_order_and_tolerates_existing() {
    let mock = MockTransport::replying(&[
        "create_instance_rsp.xml",
        "already_exists_rsp.xml",
        "create_instance_rsp.xml",
    ]);
    let c = client(&mock).with_namespace("root/interop");
    subscribe(&c, &params()).await.unwrap();

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 3);
    assert!(reqs.iter().all(|r| r.method == "CreateInstance"));
    assert!(mock.body(0).contains("<INSTANCE CLASSNAME=\"CIM_IndicationFilter\">"));
    assert!(mock.body(1).contains("<INSTANCE CLASSNAME=\"CIM_ListenerDestinationCIMXML\">"));
    let sub = mock.body(2);
    assert!(sub.contains("<INSTANCE CLASSNAME=\"CIM_IndicationSubscription\">"));
    assert!(sub.contains(
        "<PROPERTY.REFERENCE NAME=\"Handler\" REFERENCECLASS=\"CIM_ListenerDestinationCIMXML\">"
    ));
    assert!(sub.contains("<NAMESPACE NAME=\"interop\"/>"));
}

#[tokio::test]
async fn subscribe_stops_on_other_errors() {
    let mock = MockTransport::replying(&["error_not_found_rsp.xml"]);
    let err = subscribe(&client(&mock), &params()).await.unwrap_err();
    assert_eq!(err.cim_error().unwrap().code(), 6);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn clean_deletes_subscriptions_then_destinations_then_filters() {
    let mock = MockTransport::replying(&[
        "empty_ireturn_rsp.xml",
        "destination_names_rsp.xml",
        "no_ireturn_rsp.xml",
        "no_ireturn_rsp.xml",
    ]);
    let deleted = clean_subscriptions(&client(&mock)).await.unwrap();
    assert_eq!(deleted, 1);

    let methods: Vec<String> = mock.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(
        methods,
        [
            "EnumerateInstanceNames",
            "EnumerateInstanceNames",
            "DeleteInstance",
            "EnumerateInstanceNames"
        ]
    );
    assert!(mock.body(0).contains("CIM_IndicationSubscription"));
    assert!(mock.body(1).contains("CIM_ListenerDestinationCIMXML"));
    assert!(mock.body(2).contains("wbem-rs:10.0.0.5"));
    assert!(mock.body(3).contains("CIM_IndicationFilter"));
}

#[test]
fn subscription_name_keys_match_its_references() {
    let p = params();
    let name = p.subscription_path("root/interop");
    let instance = p.subscription_instance("root/interop");
    assert_eq!(name.class_name, SUBSCRIPTION_CLASS);

    for key in ["Filter", "Handler"] {
        let Some(CimProperty::Reference(prop)) = instance.property(key) else {
            panic!("{key} must be a reference property");
        };
        let Some(KeyBindingValue::Reference(bound)) = name.key(key) else {
            panic!("{key} must be a reference key");
        };
        assert_eq!(Some(bound.as_ref()), prop.value.as_ref());
    }
    assert_eq!(p.filter_path().class_name, FILTER_CLASS);
    assert!(matches!(
        p.destination_path().key("Name"),
        Some(KeyBindingValue::Value(kv)) if kv.value == "wbem-rs:10.0.0.5"
    ));
}

#[tokio::test]
async fn unsubscribe_deletes_own_instances_in_order_and_skips_missing() {
    let mock = MockTransport::replying(&[
        "error_not_found_rsp.xml",
        "no_ireturn_rsp.xml",
        "error_not_found_rsp.xml",
    ]);
    let c = client(&mock).with_namespace("root/interop");
    let deleted = unsubscribe(&c, &params()).await.unwrap();
    assert_eq!(deleted, 1);

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 3);
    assert!(reqs.iter().all(|r| r.method == "DeleteInstance"));
    assert!(reqs.iter().all(|r| r.object == "root/interop"));

    let sub = mock.body(0);
    assert!(sub.contains(
        "<INSTANCENAME CLASSNAME=\"CIM_IndicationSubscription\"><KEYBINDING NAME=\"Filter\"><VALUE.REFERENCE><LOCALINSTANCEPATH>"
    ));
    assert!(sub.contains("<KEYBINDING NAME=\"Handler\">"));
    assert!(sub.contains("<NAMESPACE NAME=\"interop\"/>"));

    let dest = mock.body(1);
    assert!(dest.contains("<INSTANCENAME CLASSNAME=\"CIM_ListenerDestinationCIMXML\">"));
    assert!(dest.contains("wbem-rs:10.0.0.5"));
    assert!(dest.contains("mgmt01"));

    let filter = mock.body(2);
    assert!(filter.contains("<INSTANCENAME CLASSNAME=\"CIM_IndicationFilter\">"));
    assert!(filter.contains("wbem-rs:DefaultFilter"));
}

#[tokio::test]
async fn unsubscribe_stops_on_other_errors() {
    let mock = MockTransport::replying(&["already_exists_rsp.xml"]);
    let err = unsubscribe(&client(&mock), &params()).await.unwrap_err();
    assert_eq!(err.cim_error().unwrap().code(), 11);
    assert_eq!(mock.requests().len(), 1);
}
