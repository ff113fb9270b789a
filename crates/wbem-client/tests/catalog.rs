//! Operation catalog against canned server responses.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use common::{client, MockTransport};
use wbem_client::operations::{
    AssociatorsOptions, EnumerateClassesOptions, EnumerateInstancesOptions, GetClassOptions,
    GetInstanceOptions, ModifyInstanceOptions, PropertyValue, QueryObject, ReferenceNamesOptions,
    ReferencesOptions,
};
use wbem_client::CimResponse;
use wbem_core::error::{ErrorClass, WbemError};
use wbem_core::model::{
    ArrayEntry, CimProperty, Class, ClassName, Flavor, Instance, InstanceName, KeyBindingValue,
    ObjectName, ObjectPath, ParamValue, ParamValueData, Property, QualifierDeclaration, Scope,
    Value, ValueNamedInstance, ValueObjectWithLocalPath, ValueObjectWithPath,
};

fn foo_instance() -> InstanceName {
    InstanceName::new("CIM_Foo")
        .with_key("SystemName", "host1")
        .with_key("CreationClassName", "CIM_Bar")
}

#[tokio::test]
async fn get_class_with_defaults_sends_only_class_name() {
    let mock = MockTransport::replying(&["get_class_rsp.xml"]);
    let class = client(&mock)
        .get_class("CIM_Foo", GetClassOptions::default())
        .await
        .unwrap()
        .expect("class returned");

    assert_eq!(class.name, "CIM_Foo");
    assert_eq!(class.superclass.as_deref(), Some("CIM_ManagedElement"));
    assert_eq!(class.properties.len(), 4);
    assert_eq!(class.method("reset").unwrap().parameters.len(), 4);

    let req = &mock.requests()[0];
    assert_eq!(req.method, "GetClass");
    assert_eq!(req.object, "root/cimv2");
    let body = mock.body(0);
    assert!(body.contains("<IPARAMVALUE NAME=\"ClassName\"><CLASSNAME NAME=\"CIM_Foo\"/>"));
    assert!(!body.contains("LocalOnly"));
    assert!(!body.contains("IncludeQualifiers"));
    assert!(!body.contains("IncludeClassOrigin"));
}

#[tokio::test]
async fn get_class_non_default_flags_are_explicit() {
    let mock = MockTransport::replying(&["get_class_rsp.xml"]);
    let opts = GetClassOptions {
        local_only: false,
        include_class_origin: true,
        ..GetClassOptions::default()
    };
    client(&mock).get_class("CIM_Foo", opts).await.unwrap();

    let body = mock.body(0);
    assert!(body.contains("<IPARAMVALUE NAME=\"LocalOnly\"><VALUE>false</VALUE></IPARAMVALUE>"));
    // IncludeClassOrigin follows its own argument; IncludeQualifiers stays default.
    assert!(
        body.contains("<IPARAMVALUE NAME=\"IncludeClassOrigin\"><VALUE>true</VALUE></IPARAMVALUE>")
    );
    assert!(!body.contains("IncludeQualifiers"));
}

#[tokio::test]
async fn enumerate_instances_decodes_named_instances() {
    let mock = MockTransport::replying(&["enum_instances_rsp.xml"]);
    let items = client(&mock)
        .enumerate_instances("CIM_Foo", EnumerateInstancesOptions::default())
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].instance.value("SystemName"), Some("host1"));
    assert!(matches!(
        items[1].instance_name.key("SystemName"),
        Some(KeyBindingValue::Value(kv)) if kv.value == "host2"
    ));
    let body = mock.body(0);
    assert!(!body.contains("DeepInheritance"));
    assert!(!body.contains("LocalOnly"));
}

#[tokio::test]
async fn enumerate_classes_deep_is_explicit() {
    let mock = MockTransport::replying(&["no_ireturn_rsp.xml"]);
    let opts = EnumerateClassesOptions {
        deep_inheritance: true,
        ..EnumerateClassesOptions::default()
    };
    let classes = client(&mock).enumerate_classes(None, opts).await.unwrap();

    assert!(classes.is_empty());
    let body = mock.body(0);
    assert!(body.contains("<IPARAMVALUE NAME=\"DeepInheritance\"><VALUE>true</VALUE>"));
    assert!(!body.contains("ClassName"));
}

#[tokio::test]
async fn enumerate_class_names_uses_its_own_method_name() {
    let mock = MockTransport::replying(&["class_names_rsp.xml"]);
    let names = client(&mock)
        .enumerate_class_names(Some("CIM_ManagedElement"), false)
        .await
        .unwrap();

    assert_eq!(
        names,
        vec![ClassName::new("CIM_ManagedElement"), ClassName::new("CIM_Foo")]
    );
    assert_eq!(mock.requests()[0].method, "EnumerateClassNames");
    assert!(mock.body(0).contains("<IMETHODCALL NAME=\"EnumerateClassNames\">"));
}

#[tokio::test]
async fn error_element_becomes_protocol_failure() {
    let mock = MockTransport::replying(&["error_not_found_rsp.xml"]);
    let err = client(&mock)
        .get_instance(&foo_instance(), GetInstanceOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::Protocol);
    let WbemError::Cim {
        error,
        server_description,
    } = &err
    else {
        panic!("expected protocol error, got {err:?}");
    };
    assert_eq!(error.code(), 6);
    assert_eq!(error.name(), "CIM_ERR_NOT_FOUND");
    assert_eq!(server_description.as_deref(), Some("no such thing on this box"));
    assert_eq!(err.to_string(), error.to_string());
}

#[tokio::test]
async fn undefined_error_code_collapses_to_failed() {
    let mock = MockTransport::replying(&["undefined_code_rsp.xml"]);
    let err = client(&mock)
        .get_class("CIM_Foo", GetClassOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.cim_error().unwrap().code(), 1);
    assert_eq!(err.cim_error().unwrap().name(), "CIM_ERR_FAILED");
}

#[tokio::test]
async fn absent_and_empty_return_values_are_empty_results() {
    let mock = MockTransport::replying(&["no_ireturn_rsp.xml", "empty_ireturn_rsp.xml"]);
    let c = client(&mock);

    assert!(c.enumerate_instance_names("CIM_Foo").await.unwrap().is_empty());
    assert!(c.enumerate_instance_names("CIM_Foo").await.unwrap().is_empty());
    assert_eq!(mock.requests().len(), 2);
}

#[tokio::test]
async fn get_instance_without_return_value_is_none() {
    let mock = MockTransport::replying(&["no_ireturn_rsp.xml"]);
    let got = client(&mock)
        .get_instance(&foo_instance(), GetInstanceOptions::default())
        .await
        .unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn missing_arguments_fail_without_round_trip() {
    let mock = MockTransport::replying(&[]);
    let c = client(&mock);

    let err = c.get_class("", GetClassOptions::default()).await.unwrap_err();
    assert!(matches!(err, WbemError::MissingArgument("ClassName")));
    assert_eq!(err.class(), ErrorClass::Validation);
    assert_eq!(err.cim_error().unwrap().code(), 1);

    assert!(c.delete_instance(&InstanceName::new("")).await.is_err());
    assert!(c.create_instance(&Instance::new(" ")).await.is_err());
    assert!(c.exec_query("WQL", "").await.is_err());
    assert!(c
        .invoke_method(&ObjectName::Class(ClassName::new("CIM_Foo")), "", Vec::new())
        .await
        .is_err());
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn invoke_method_on_instance_path() {
    let mock = MockTransport::replying(&["invoke_method_rsp.xml"]);
    let target = ObjectName::Instance(foo_instance());
    let (code, out) = client(&mock)
        .invoke_method(
            &target,
            "RequestStateChange",
            vec![ParamValue::new("RequestedState", "3").with_type("uint16")],
        )
        .await
        .unwrap();

    assert_eq!(code, 4096);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].name, "Job");
    assert!(matches!(out[0].value, Some(ParamValueData::Reference(_))));

    let req = &mock.requests()[0];
    assert_eq!(req.method, "RequestStateChange");
    assert_eq!(
        req.object,
        "root/cimv2:CIM_Foo.SystemName=\"host1\",CreationClassName=\"CIM_Bar\""
    );
    let body = mock.body(0);
    assert!(body.contains("<METHODCALL NAME=\"RequestStateChange\"><LOCALINSTANCEPATH>"));
    assert!(body.contains(
        "<PARAMVALUE NAME=\"RequestedState\" PARAMTYPE=\"uint16\"><VALUE>3</VALUE></PARAMVALUE>"
    ));
}

#[tokio::test]
async fn invoke_method_without_return_value_fails() {
    let mock = MockTransport::replying(&["method_no_return_rsp.xml"]);
    let err = client(&mock)
        .invoke_method(&ObjectName::Class(ClassName::new("CIM_Foo")), "Reset", Vec::new())
        .await
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::Structural);
    assert_eq!(err.cim_error().unwrap().code(), 1);
    assert_eq!(mock.requests()[0].object, "root/cimv2:CIM_Foo");
}

#[tokio::test]
async fn reference_names_sends_result_class() {
    let mock = MockTransport::replying(&["no_ireturn_rsp.xml"]);
    let opts = ReferenceNamesOptions {
        result_class: Some(ClassName::new("CIM_Dependency")),
        role: Some("Antecedent".into()),
    };
    let paths = client(&mock)
        .reference_names(&ObjectName::Instance(foo_instance()), opts)
        .await
        .unwrap();

    assert!(paths.is_empty());
    let body = mock.body(0);
    assert!(body.contains(
        "<IPARAMVALUE NAME=\"ResultClass\"><CLASSNAME NAME=\"CIM_Dependency\"/></IPARAMVALUE>"
    ));
    assert!(!body.contains("AssocClass"));
    assert!(body.contains("<IPARAMVALUE NAME=\"ObjectName\"><INSTANCENAME CLASSNAME=\"CIM_Foo\">"));
}

#[tokio::test]
async fn associator_names_yield_object_paths() {
    let mock = MockTransport::replying(&["associator_names_rsp.xml"]);
    let paths = client(&mock)
        .associator_names(
            &ObjectName::Instance(foo_instance()),
            Default::default(),
        )
        .await
        .unwrap();

    assert_eq!(paths.len(), 1);
    let ObjectPath::Instance(p) = &paths[0] else {
        panic!("expected instance path");
    };
    assert_eq!(p.namespace.host, "host1");
    assert_eq!(p.instance_name.class_name, "CIM_Fan");
}

#[tokio::test]
async fn exec_query_passes_query_through() {
    let mock = MockTransport::replying(&["exec_query_rsp.xml"]);
    let rows = client(&mock)
        .exec_query("WQL", "SELECT * FROM CIM_Fan WHERE HealthState > 5")
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    let QueryObject::WithLocalPath(ValueObjectWithLocalPath::Instance { instance, .. }) = &rows[0]
    else {
        panic!("expected instance with local path");
    };
    assert_eq!(instance.value("HealthState"), Some("25"));
    assert!(mock
        .body(0)
        .contains("<VALUE>SELECT * FROM CIM_Fan WHERE HealthState &gt; 5</VALUE>"));
}

#[tokio::test]
async fn get_property_returns_array_with_null() {
    let mock = MockTransport::replying(&["get_property_rsp.xml"]);
    let v = client(&mock)
        .get_property(&foo_instance(), "Tags")
        .await
        .unwrap();

    let Some(PropertyValue::Array(a)) = v else {
        panic!("expected array value");
    };
    assert_eq!(a.entries, vec![ArrayEntry::Value("a".into()), ArrayEntry::Null]);
}

#[tokio::test]
async fn create_instance_returns_assigned_name() {
    let mock = MockTransport::replying(&["create_instance_rsp.xml"]);
    let name = client(&mock)
        .create_instance(&Instance::new("CIM_IndicationFilter").with_string("Name", "x"))
        .await
        .unwrap()
        .expect("name returned");
    assert!(matches!(
        name.key("Name"),
        Some(KeyBindingValue::Value(kv)) if kv.value == "wbem-rs:DefaultFilter"
    ));
    assert!(mock.body(0).contains("<IPARAMVALUE NAME=\"NewInstance\"><INSTANCE CLASSNAME=\"CIM_IndicationFilter\">"));
}

#[tokio::test]
async fn enumerate_qualifiers_decodes_declarations() {
    let mock = MockTransport::replying(&["qualifiers_rsp.xml"]);
    let decls = client(&mock).enumerate_qualifiers().await.unwrap();

    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].name, "Key");
    assert_eq!(decls[0].flavor.overridable, Some(false));
    assert!(decls[0].scope.unwrap().property);
    assert_eq!(decls[1].flavor.translatable, Some(true));
}

#[tokio::test]
async fn unexpected_return_kind_is_structural() {
    let mock = MockTransport::replying(&["wrong_kind_rsp.xml"]);
    let err = client(&mock)
        .get_class("CIM_Foo", GetClassOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::Structural);
}

#[tokio::test]
async fn http_status_is_transport_failure() {
    let mock = MockTransport::replying(&[]);
    mock.push(CimResponse {
        status: 400,
        reason: "Bad Request".into(),
        cim_error: Some("request-not-valid".into()),
        body: Default::default(),
    });
    let err = client(&mock).enumerate_qualifiers().await.unwrap_err();

    assert_eq!(err.class(), ErrorClass::Transport);
    assert!(err.cim_error().is_none());
    let WbemError::Http { status, message } = err else {
        panic!("expected http error");
    };
    assert_eq!(status, 400);
    assert_eq!(message, "Bad Request (request-not-valid)");
}

#[tokio::test]
async fn unparseable_body_keeps_raw_text() {
    let mock = MockTransport::replying(&[]);
    mock.push(CimResponse::ok("<html>gateway error</html>"));
    let err = client(&mock).enumerate_qualifiers().await.unwrap_err();

    let WbemError::Malformed { body, .. } = err else {
        panic!("expected malformed error, got {err:?}");
    };
    assert_eq!(body.as_deref(), Some("<html>gateway error</html>"));
}

#[tokio::test]
async fn with_namespace_retargets_requests() {
    let mock = MockTransport::replying(&["no_ireturn_rsp.xml"]);
    let c = client(&mock).with_namespace("root/interop");
    assert_eq!(c.namespace(), "root/interop");

    c.delete_class("CIM_Foo").await.unwrap();
    assert_eq!(mock.requests()[0].object, "root/interop");
    assert!(mock.body(0).contains(
        "<LOCALNAMESPACEPATH><NAMESPACE NAME=\"root\"/><NAMESPACE NAME=\"interop\"/></LOCALNAMESPACEPATH>"
    ));
}

#[tokio::test]
async fn blank_namespace_falls_back_to_default() {
    let mock = MockTransport::replying(&["no_ireturn_rsp.xml"]);
    let c = client(&mock).with_namespace("");
    assert_eq!(c.namespace(), "root/cimv2");
    assert_eq!(client(&mock).with_namespace("/root/interop/").namespace(), "root/interop");

    c.delete_class("CIM_Foo").await.unwrap();
    assert_eq!(mock.requests()[0].object, "root/cimv2");
    assert!(mock.body(0).contains(
        "<LOCALNAMESPACEPATH><NAMESPACE NAME=\"root\"/><NAMESPACE NAME=\"cimv2\"/></LOCALNAMESPACEPATH>"
    ));
}

#[tokio::test]
async fn get_instance_returns_instance() {
    let mock = MockTransport::replying(&["get_instance_rsp.xml"]);
    let opts = GetInstanceOptions {
        include_qualifiers: true,
        ..GetInstanceOptions::default()
    };
    let inst = client(&mock)
        .get_instance(&foo_instance(), opts)
        .await
        .unwrap()
        .expect("instance returned");

    assert_eq!(inst.class_name, "CIM_Foo");
    assert_eq!(inst.qualifiers.len(), 1);
    assert_eq!(inst.value("ElementName"), Some("front panel"));

    let body = mock.body(0);
    assert!(body.contains(
        "<IPARAMVALUE NAME=\"InstanceName\"><INSTANCENAME CLASSNAME=\"CIM_Foo\"><KEYBINDING NAME=\"SystemName\">"
    ));
    assert!(
        body.contains("<IPARAMVALUE NAME=\"IncludeQualifiers\"><VALUE>true</VALUE></IPARAMVALUE>")
    );
    assert!(!body.contains("LocalOnly"));
    assert!(!body.contains("IncludeClassOrigin"));
}

#[tokio::test]
async fn associators_decode_objects_with_path() {
    let mock = MockTransport::replying(&["associators_rsp.xml"]);
    let opts = AssociatorsOptions {
        assoc_class: Some(ClassName::new("CIM_AssociatedCooling")),
        include_qualifiers: true,
        property_list: Some(vec!["DesiredSpeed".into()]),
        ..AssociatorsOptions::default()
    };
    let items = client(&mock)
        .associators(&ObjectName::Instance(foo_instance()), opts)
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    let ValueObjectWithPath::Instance { path, instance } = &items[0] else {
        panic!("expected an instance with path");
    };
    assert_eq!(path.namespace.host, "host1");
    assert_eq!(path.instance_name.class_name, "CIM_Fan");
    assert_eq!(instance.value("DesiredSpeed"), Some("3000"));

    assert_eq!(mock.requests()[0].method, "Associators");
    let body = mock.body(0);
    assert!(body.contains("<IPARAMVALUE NAME=\"ObjectName\"><INSTANCENAME CLASSNAME=\"CIM_Foo\">"));
    assert!(body.contains(
        "<IPARAMVALUE NAME=\"AssocClass\"><CLASSNAME NAME=\"CIM_AssociatedCooling\"/></IPARAMVALUE>"
    ));
    assert!(
        body.contains("<IPARAMVALUE NAME=\"IncludeQualifiers\"><VALUE>true</VALUE></IPARAMVALUE>")
    );
    assert!(body.contains(
        "<IPARAMVALUE NAME=\"PropertyList\"><VALUE.ARRAY><VALUE>DesiredSpeed</VALUE></VALUE.ARRAY>"
    ));
    assert!(!body.contains("ResultClass"));
    assert!(!body.contains("IncludeClassOrigin"));
}

#[tokio::test]
async fn references_on_class_send_role() {
    let mock = MockTransport::replying(&["associators_rsp.xml"]);
    let opts = ReferencesOptions {
        role: Some("Antecedent".into()),
        ..ReferencesOptions::default()
    };
    let items = client(&mock)
        .references(&ObjectName::Class(ClassName::new("CIM_Fan")), opts)
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(mock.requests()[0].method, "References");
    let body = mock.body(0);
    assert!(body.contains("<IPARAMVALUE NAME=\"ObjectName\"><CLASSNAME NAME=\"CIM_Fan\"/>"));
    assert!(body.contains("<IPARAMVALUE NAME=\"Role\"><VALUE>Antecedent</VALUE></IPARAMVALUE>"));
    assert!(!body.contains("AssocClass"));
    assert!(!body.contains("IncludeQualifiers"));
}

#[tokio::test]
async fn class_writes_send_their_own_parameters() {
    let mock = MockTransport::replying(&[
        "no_ireturn_rsp.xml",
        "no_ireturn_rsp.xml",
        "no_ireturn_rsp.xml",
    ]);
    let class = Class {
        name: "CIM_Foo".into(),
        superclass: Some("CIM_ManagedElement".into()),
        properties: vec![CimProperty::Scalar(Property::new("Speed", "uint32", None))],
        ..Class::default()
    };
    let c = client(&mock);
    c.create_class(&class).await.unwrap();
    c.modify_class(&class).await.unwrap();
    c.delete_class("CIM_Foo").await.unwrap();

    let methods: Vec<String> = mock.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, ["CreateClass", "ModifyClass", "DeleteClass"]);
    assert!(mock.body(0).contains(
        "<IPARAMVALUE NAME=\"NewClass\"><CLASS NAME=\"CIM_Foo\" SUPERCLASS=\"CIM_ManagedElement\"><PROPERTY NAME=\"Speed\" TYPE=\"uint32\"/></CLASS></IPARAMVALUE>"
    ));
    assert!(mock
        .body(1)
        .contains("<IPARAMVALUE NAME=\"ModifiedClass\"><CLASS NAME=\"CIM_Foo\""));
    assert!(mock
        .body(2)
        .contains("<IPARAMVALUE NAME=\"ClassName\"><CLASSNAME NAME=\"CIM_Foo\"/></IPARAMVALUE>"));
}

#[tokio::test]
async fn instance_writes_send_their_own_parameters() {
    let mock = MockTransport::replying(&[
        "no_ireturn_rsp.xml",
        "no_ireturn_rsp.xml",
        "no_ireturn_rsp.xml",
    ]);
    let modified = ValueNamedInstance {
        instance_name: foo_instance(),
        instance: Instance::new("CIM_Foo").with_string("ElementName", "rack 4"),
    };
    let c = client(&mock);
    c.delete_instance(&foo_instance()).await.unwrap();
    c.modify_instance(&modified, ModifyInstanceOptions::default())
        .await
        .unwrap();
    let opts = ModifyInstanceOptions {
        include_qualifiers: false,
        property_list: Some(vec!["ElementName".into()]),
    };
    c.modify_instance(&modified, opts).await.unwrap();

    let methods: Vec<String> = mock.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, ["DeleteInstance", "ModifyInstance", "ModifyInstance"]);
    assert!(mock.body(0).contains(
        "<IPARAMVALUE NAME=\"InstanceName\"><INSTANCENAME CLASSNAME=\"CIM_Foo\"><KEYBINDING NAME=\"SystemName\"><KEYVALUE"
    ));

    let default = mock.body(1);
    assert!(default.contains(
        "<IPARAMVALUE NAME=\"ModifiedInstance\"><VALUE.NAMEDINSTANCE><INSTANCENAME CLASSNAME=\"CIM_Foo\">"
    ));
    assert!(default.contains("<VALUE>rack 4</VALUE>"));
    // IncludeQualifiers defaults to true here.
    assert!(!default.contains("IncludeQualifiers"));
    assert!(!default.contains("PropertyList"));

    let explicit = mock.body(2);
    assert!(explicit
        .contains("<IPARAMVALUE NAME=\"IncludeQualifiers\"><VALUE>false</VALUE></IPARAMVALUE>"));
    assert!(explicit.contains(
        "<IPARAMVALUE NAME=\"PropertyList\"><VALUE.ARRAY><VALUE>ElementName</VALUE></VALUE.ARRAY>"
    ));
}

#[tokio::test]
async fn set_property_omits_new_value_for_null() {
    let mock = MockTransport::replying(&["no_ireturn_rsp.xml", "no_ireturn_rsp.xml"]);
    let c = client(&mock);
    c.set_property(
        &foo_instance(),
        "ElementName",
        Some(PropertyValue::Value(Value::new("rack 4"))),
    )
    .await
    .unwrap();
    c.set_property(&foo_instance(), "ElementName", None)
        .await
        .unwrap();

    let with_value = mock.body(0);
    assert!(with_value.contains("<IMETHODCALL NAME=\"SetProperty\">"));
    assert!(with_value
        .contains("<IPARAMVALUE NAME=\"PropertyName\"><VALUE>ElementName</VALUE></IPARAMVALUE>"));
    assert!(
        with_value.contains("<IPARAMVALUE NAME=\"NewValue\"><VALUE>rack 4</VALUE></IPARAMVALUE>")
    );

    let null = mock.body(1);
    assert!(null.contains("<IPARAMVALUE NAME=\"PropertyName\">"));
    assert!(!null.contains("NewValue"));
}

#[tokio::test]
async fn qualifier_operations_round_trip() {
    let mock = MockTransport::replying(&[
        "qualifiers_rsp.xml",
        "no_ireturn_rsp.xml",
        "no_ireturn_rsp.xml",
    ]);
    let c = client(&mock);

    let key = c.get_qualifier("Key").await.unwrap().expect("declaration");
    assert_eq!(key.name, "Key");
    assert_eq!(key.flavor.overridable, Some(false));
    assert!(key.scope.unwrap().reference);

    let units = QualifierDeclaration {
        name: "Units".into(),
        cim_type: "string".into(),
        is_array: None,
        array_size: None,
        flavor: Flavor {
            translatable: Some(true),
            ..Flavor::default()
        },
        scope: Some(Scope {
            property: true,
            ..Scope::default()
        }),
        value: None,
    };
    c.set_qualifier(&units).await.unwrap();
    c.delete_qualifier("Units").await.unwrap();

    let methods: Vec<String> = mock.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, ["GetQualifier", "SetQualifier", "DeleteQualifier"]);
    assert!(mock
        .body(0)
        .contains("<IPARAMVALUE NAME=\"QualifierName\"><VALUE>Key</VALUE></IPARAMVALUE>"));
    assert!(mock.body(1).contains(
        "<IPARAMVALUE NAME=\"QualifierDeclaration\"><QUALIFIER.DECLARATION NAME=\"Units\" TYPE=\"string\" TRANSLATABLE=\"true\"><SCOPE PROPERTY=\"true\"/></QUALIFIER.DECLARATION></IPARAMVALUE>"
    ));
    assert!(mock
        .body(2)
        .contains("<IPARAMVALUE NAME=\"QualifierName\"><VALUE>Units</VALUE></IPARAMVALUE>"));
}
