//! Operation encoder.
//!
//! Intrinsic calls are addressed by namespace and carry `IPARAMVALUE`s;
//! extrinsic calls are addressed by a class or instance path and carry
//! `PARAMVALUE`s. Both produce an [`EncodedCall`]: the request envelope plus
//! the values for the `CIMMethod` and `CIMObject` headers.
//!
//! Argument shapes are picked by the static type of each argument through
//! the `From` impls below.

use crate::model::{
    Cim, Class, ClassName, ErrorElement, ExpMethodResponse, ExpMethodResponseBody, IMethodCall,
    IParamValue, IParamValueData, Instance, InstanceName, LocalClassPath, LocalInstancePath,
    LocalNamespacePath, MessageKind, MethodCall, MethodTarget, ObjectName, ParamValue,
    ParamValueData, QualifierDeclaration, RequestCall, SimpleExpRsp, SimpleReq, Value, ValueArray,
    ValueNamedInstance, ValueRefArray, ValueReference,
};
use crate::path::render_object;
use crate::xml::bool_str;

/// A request ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedCall {
    /// `CIMMethod` header.
    pub method: String,
    /// `CIMObject` header: the namespace for intrinsic calls, the rendered
    /// object path for extrinsic calls.
    pub object: String,
    pub document: Cim,
}

/// Builder for an `IMETHODCALL`.
#[derive(Debug, Clone)]
pub struct IntrinsicCall {
    name: String,
    namespace: LocalNamespacePath,
    params: Vec<IParamValue>,
}

impl IntrinsicCall {
    pub fn new(name: impl Into<String>, namespace: &str) -> Self {
        Self {
            name: name.into(),
            namespace: LocalNamespacePath::parse(namespace),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: &str, value: impl Into<IParamValueData>) -> Self {
        self.params.push(IParamValue {
            name: name.to_string(),
            value: Some(value.into()),
        });
        self
    }

    /// Boolean parameter, omitted entirely when it equals the operation's
    /// default.
    pub fn flag(self, name: &str, value: bool, default: bool) -> Self {
        if value == default {
            self
        } else {
            self.param(name, value)
        }
    }

    /// Omitted when `None`.
    pub fn optional<V: Into<IParamValueData>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    /// Parameter present with no value (explicit NULL).
    pub fn null(mut self, name: &str) -> Self {
        self.params.push(IParamValue {
            name: name.to_string(),
            value: None,
        });
        self
    }

    pub fn build(self) -> EncodedCall {
        let object = self.namespace.render();
        let method = self.name.clone();
        let call = IMethodCall {
            name: self.name,
            namespace: self.namespace,
            params: self.params,
        };
        EncodedCall {
            method,
            object,
            document: Cim::message(MessageKind::SimpleReq(SimpleReq {
                correlators: Vec::new(),
                call: RequestCall::Intrinsic(call),
            })),
        }
    }
}

/// Builder for a `METHODCALL`.
#[derive(Debug, Clone)]
pub struct ExtrinsicCall {
    name: String,
    namespace: LocalNamespacePath,
    target: ObjectName,
    params: Vec<ParamValue>,
}

impl ExtrinsicCall {
    pub fn new(name: impl Into<String>, namespace: &str, target: ObjectName) -> Self {
        Self {
            name: name.into(),
            namespace: LocalNamespacePath::parse(namespace),
            target,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, param: ParamValue) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = ParamValue>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn build(self) -> EncodedCall {
        let object = render_object(&self.namespace, &self.target);
        let target = match self.target {
            ObjectName::Class(class_name) => MethodTarget::Class(LocalClassPath {
                namespace: self.namespace,
                class_name,
            }),
            ObjectName::Instance(instance_name) => MethodTarget::Instance(LocalInstancePath {
                namespace: self.namespace,
                instance_name,
            }),
        };
        EncodedCall {
            method: self.name.clone(),
            object,
            document: Cim::message(MessageKind::SimpleReq(SimpleReq {
                correlators: Vec::new(),
                call: RequestCall::Method(MethodCall {
                    name: self.name,
                    target,
                    params: self.params,
                }),
            })),
        }
    }
}

/// Envelope acknowledging an export request, or rejecting it with `error`.
pub fn export_response(method: &str, error: Option<ErrorElement>) -> Cim {
    let body = match error {
        Some(e) => ExpMethodResponseBody::Error(e),
        None => ExpMethodResponseBody::Success(None),
    };
    Cim::message(MessageKind::SimpleExpRsp(SimpleExpRsp {
        response: ExpMethodResponse {
            name: method.to_string(),
            body,
        },
    }))
}

macro_rules! impl_from_data {
    ($target:ident: $($src:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$src> for $target {
                fn from(v: $src) -> Self {
                    $target::$variant(v)
                }
            }
        )*
    };
}

impl_from_data!(IParamValueData:
    Value => Value,
    ValueArray => Array,
    ValueReference => Reference,
    ClassName => ClassName,
    InstanceName => InstanceName,
    QualifierDeclaration => QualifierDeclaration,
    Class => Class,
    Instance => Instance,
    ValueNamedInstance => NamedInstance,
);

impl_from_data!(ParamValueData:
    Value => Value,
    ValueReference => Reference,
    ValueArray => Array,
    ValueRefArray => RefArray,
    ClassName => ClassName,
    InstanceName => InstanceName,
    Class => Class,
    Instance => Instance,
    ValueNamedInstance => NamedInstance,
);

macro_rules! impl_from_scalars {
    ($($target:ident),*) => {
        $(
            impl From<bool> for $target {
                fn from(v: bool) -> Self {
                    $target::Value(Value::new(bool_str(v)))
                }
            }

            impl From<&str> for $target {
                fn from(v: &str) -> Self {
                    $target::Value(Value::new(v))
                }
            }

            impl From<String> for $target {
                fn from(v: String) -> Self {
                    $target::Value(Value(v))
                }
            }

            impl From<Vec<String>> for $target {
                fn from(v: Vec<String>) -> Self {
                    $target::Array(ValueArray::from_strings(v))
                }
            }
        )*
    };
}

impl_from_scalars!(IParamValueData, ParamValueData);

impl From<ObjectName> for IParamValueData {
    fn from(v: ObjectName) -> Self {
        match v {
            ObjectName::Class(c) => IParamValueData::ClassName(c),
            ObjectName::Instance(i) => IParamValueData::InstanceName(i),
        }
    }
}
