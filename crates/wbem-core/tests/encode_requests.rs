//! Request encoding and object path rendering.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use wbem_core::encode::{export_response, ExtrinsicCall, IntrinsicCall};
use wbem_core::model::{
    Cim, ClassName, InstanceName, IParamValueData, KeyBinding, LocalNamespacePath, MessageKind,
    MethodTarget, ObjectName, ParamValue, RequestCall, ValueReference,
};
use wbem_core::path::{render_instance_name, render_object};

fn body(cim: &Cim) -> String {
    String::from_utf8(cim.to_bytes().unwrap()).unwrap()
}

fn intrinsic_params(cim: &Cim) -> Vec<(String, Option<IParamValueData>)> {
    let MessageKind::SimpleReq(req) = &cim.as_message().unwrap().kind else {
        panic!("expected SIMPLEREQ");
    };
    let RequestCall::Intrinsic(call) = &req.call else {
        panic!("expected IMETHODCALL");
    };
    call.params
        .iter()
        .map(|p| (p.name.clone(), p.value.clone()))
        .collect()
}

#[test]
fn default_flags_are_omitted() {
    let call = IntrinsicCall::new("GetClass", "root/cimv2")
        .param("ClassName", ClassName::new("CIM_Foo"))
        .flag("LocalOnly", true, true)
        .flag("IncludeQualifiers", true, true)
        .flag("IncludeClassOrigin", false, false)
        .build();

    assert_eq!(call.method, "GetClass");
    assert_eq!(call.object, "root/cimv2");
    let params = intrinsic_params(&call.document);
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].0, "ClassName");

    let xml = body(&call.document);
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(xml.contains(
        "<CIM CIMVERSION=\"2.0\" DTDVERSION=\"2.0\"><MESSAGE ID=\"1001\" PROTOCOLVERSION=\"1.0\">"
    ));
    assert!(xml.contains(
        "<IMETHODCALL NAME=\"GetClass\"><LOCALNAMESPACEPATH><NAMESPACE NAME=\"root\"/>\
         <NAMESPACE NAME=\"cimv2\"/></LOCALNAMESPACEPATH><IPARAMVALUE NAME=\"ClassName\">\
         <CLASSNAME NAME=\"CIM_Foo\"/></IPARAMVALUE></IMETHODCALL>"
    ));
}

#[test]
fn non_default_flag_is_explicit_lowercase() {
    let call = IntrinsicCall::new("GetClass", "root/cimv2")
        .param("ClassName", ClassName::new("CIM_Foo"))
        .flag("LocalOnly", false, true)
        .build();
    let xml = body(&call.document);
    assert!(xml.contains("<IPARAMVALUE NAME=\"LocalOnly\"><VALUE>false</VALUE></IPARAMVALUE>"));
}

#[test]
fn optional_and_array_params() {
    let call = IntrinsicCall::new("EnumerateInstances", "root/interop")
        .param("ClassName", ClassName::new("CIM_Foo"))
        .optional("ResultClass", None::<ClassName>)
        .optional("PropertyList", Some(vec!["Name".to_string(), "Id".to_string()]))
        .build();
    let xml = body(&call.document);
    assert!(!xml.contains("ResultClass"));
    assert!(xml.contains(
        "<IPARAMVALUE NAME=\"PropertyList\"><VALUE.ARRAY><VALUE>Name</VALUE><VALUE>Id</VALUE>\
         </VALUE.ARRAY></IPARAMVALUE>"
    ));
}

#[test]
fn explicit_null_param_has_no_payload() {
    let call = IntrinsicCall::new("SetProperty", "root/cimv2")
        .null("NewValue")
        .build();
    assert!(body(&call.document).contains("<IPARAMVALUE NAME=\"NewValue\"/>"));
}

#[test]
fn extrinsic_instance_target_renders_header() {
    let target = InstanceName::new("CIM_Foo")
        .with_key("SystemName", "host1")
        .with_key("CreationClassName", "CIM_Bar");
    let call = ExtrinsicCall::new("Reset", "ns1/ns2", ObjectName::Instance(target))
        .param(ParamValue::new("Force", true).with_type("boolean"))
        .build();

    assert_eq!(call.method, "Reset");
    assert_eq!(
        call.object,
        r#"ns1/ns2:CIM_Foo.SystemName="host1",CreationClassName="CIM_Bar""#
    );

    let MessageKind::SimpleReq(req) = &call.document.as_message().unwrap().kind else {
        panic!("expected SIMPLEREQ");
    };
    let RequestCall::Method(m) = &req.call else {
        panic!("expected METHODCALL");
    };
    assert!(matches!(m.target, MethodTarget::Instance(ref p) if p.namespace.segments == ["ns1", "ns2"]));

    let xml = body(&call.document);
    assert!(xml.contains("<METHODCALL NAME=\"Reset\"><LOCALINSTANCEPATH>"));
    assert!(xml.contains(
        "<PARAMVALUE NAME=\"Force\" PARAMTYPE=\"boolean\"><VALUE>true</VALUE></PARAMVALUE>"
    ));
}

#[test]
fn extrinsic_class_target_uses_local_class_path() {
    let call = ExtrinsicCall::new(
        "Create",
        "root/cimv2",
        ObjectName::Class(ClassName::new("CIM_Foo")),
    )
    .build();
    assert_eq!(call.object, "root/cimv2:CIM_Foo");
    assert!(body(&call.document).contains(
        "<LOCALCLASSPATH><LOCALNAMESPACEPATH><NAMESPACE NAME=\"root\"/><NAMESPACE NAME=\"cimv2\"/>\
         </LOCALNAMESPACEPATH><CLASSNAME NAME=\"CIM_Foo\"/></LOCALCLASSPATH>"
    ));
}

#[test]
fn namespace_split_drops_empty_segments() {
    let ns = LocalNamespacePath::parse("/root//cimv2/");
    assert_eq!(ns.segments, ["root", "cimv2"]);
    assert_eq!(ns.render(), "root/cimv2");
}

#[test]
fn key_values_are_escaped() {
    let name = InstanceName::new("CIM_Foo").with_key("Name", r#"a"b\c"#);
    assert_eq!(render_instance_name(&name), r#"CIM_Foo.Name="a\"b\\c""#);
}

#[test]
fn reference_key_renders_quoted_path() {
    let inner = InstanceName::new("CIM_Bar").with_key("Id", "1");
    let name = InstanceName::new("CIM_Assoc")
        .with_binding(KeyBinding::reference("Ref", ValueReference::InstanceName(inner)));
    let ns = LocalNamespacePath::parse("root/cimv2");
    assert_eq!(
        render_object(&ns, &ObjectName::Instance(name)),
        r#"root/cimv2:CIM_Assoc.Ref="CIM_Bar.Id=\"1\"""#
    );
}

#[test]
fn export_acknowledgement() {
    let xml = body(&export_response("ExportIndication", None));
    assert!(xml.contains(
        "<SIMPLEEXPRSP><EXPMETHODRESPONSE NAME=\"ExportIndication\"/></SIMPLEEXPRSP>"
    ));
}
