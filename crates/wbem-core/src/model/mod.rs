//! Typed CIM-XML document model (DSP0201).
//!
//! Every grammar "choice" is a Rust enum, so a node can never carry two
//! alternatives at once. Repeated children keep insertion order. Decoders
//! ignore unknown elements and reject documents that populate more than one
//! alternative of a choice.

pub mod declaration;
pub mod message;
pub mod naming;
pub mod object;
pub mod value;

pub use declaration::{
    DeclGroup, DeclGroupKind, DeclGroupWithName, DeclGroupWithPath, DeclNamespace, Declaration,
    PathedObject,
};
pub use message::{
    Cim, CimBody, Correlator, ErrorElement, ExpMethodCall, ExpMethodResponse,
    ExpMethodResponseBody, ExpParamValue, IMethodCall, IMethodResponse, IMethodResponseBody,
    IParamValue, IParamValueData, IReturnValue, Message, MessageKind, MethodCall, MethodResponse,
    MethodResponseBody, MethodTarget, ParamValue, ParamValueData, RequestCall, ReturnData,
    ReturnValue, SimpleExpReq, SimpleExpRsp, SimpleReq, SimpleRsp,
};
pub use naming::{
    ClassName, ClassPath, InstanceKeys, InstanceName, InstancePath, KeyBinding, KeyBindingValue,
    KeyValue, KeyValueType, LocalClassPath, LocalInstancePath, LocalNamespacePath, NamespacePath,
    ObjectName, ObjectPath, ValueReference,
};
pub use object::{
    CimProperty, Class, Flavor, Instance, Method, MethodParameter, Parameter, ParameterArray,
    ParameterRefArray, ParameterReference, Property, PropertyArray, PropertyReference, Qualifier,
    QualifierDeclaration, QualifierValue, Scope,
};
pub use value::{
    ArrayEntry, RefArrayEntry, Value, ValueArray, ValueInstanceWithPath, ValueNamedInstance,
    ValueNamedObject, ValueObject, ValueObjectWithLocalPath, ValueObjectWithPath, ValueRefArray,
};

use crate::error::Result;
use crate::xml::Element;

/// Mapping between a typed node and its XML element.
pub trait CimXml: Sized {
    fn to_xml(&self) -> Element;
    fn from_xml(el: &Element) -> Result<Self>;
}

pub(crate) fn decode_children<T: CimXml>(el: &Element, tag: &str) -> Result<Vec<T>> {
    el.children_named(tag).map(T::from_xml).collect()
}

