//! Textual object paths for the `CIMObject` header of extrinsic calls.
//!
//! Format: `ns1/ns2:ClassName` for classes and
//! `ns1/ns2:ClassName.Key1="v1",Key2="v2"` for instances. Key values are
//! always quoted; `"` and `\` inside a value are backslash-escaped. A
//! reference-valued key renders its target path as the quoted value.

use crate::model::{
    InstanceKeys, InstanceName, KeyBindingValue, LocalNamespacePath, ObjectName, ValueReference,
};

/// Render the header value for an extrinsic call on `target` in `namespace`.
pub fn render_object(namespace: &LocalNamespacePath, target: &ObjectName) -> String {
    let mut out = namespace.render();
    out.push(':');
    match target {
        ObjectName::Class(c) => out.push_str(&c.name),
        ObjectName::Instance(i) => out.push_str(&render_instance_name(i)),
    }
    out
}

/// `ClassName.Key="v",...` in binding order. A keyless name renders as the
/// bare class name.
pub fn render_instance_name(name: &InstanceName) -> String {
    let mut out = name.class_name.clone();
    match &name.keys {
        InstanceKeys::Bindings(bindings) => {
            for (i, b) in bindings.iter().enumerate() {
                out.push(if i == 0 { '.' } else { ',' });
                out.push_str(&b.name);
                out.push('=');
                match &b.value {
                    KeyBindingValue::Value(kv) => out.push_str(&quote(&kv.value)),
                    KeyBindingValue::Reference(r) => out.push_str(&quote(&render_reference(r))),
                }
            }
        }
        InstanceKeys::Value(kv) => {
            out.push('=');
            out.push_str(&quote(&kv.value));
        }
        InstanceKeys::Reference(r) => {
            out.push('=');
            out.push_str(&quote(&render_reference(r)));
        }
    }
    out
}

/// Untyped textual form of any reference shape.
pub fn render_reference(r: &ValueReference) -> String {
    match r {
        ValueReference::ClassPath(p) => format!(
            "//{}/{}:{}",
            p.namespace.host,
            p.namespace.local.render(),
            p.class_name.name
        ),
        ValueReference::LocalClassPath(p) => {
            format!("{}:{}", p.namespace.render(), p.class_name.name)
        }
        ValueReference::ClassName(c) => c.name.clone(),
        ValueReference::InstancePath(p) => format!(
            "//{}/{}:{}",
            p.namespace.host,
            p.namespace.local.render(),
            render_instance_name(&p.instance_name)
        ),
        ValueReference::LocalInstancePath(p) => format!(
            "{}:{}",
            p.namespace.render(),
            render_instance_name(&p.instance_name)
        ),
        ValueReference::InstanceName(i) => render_instance_name(i),
    }
}

fn quote(v: &str) -> String {
    let mut out = String::with_capacity(v.len() + 2);
    out.push('"');
    for ch in v.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

