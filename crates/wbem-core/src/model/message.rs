//! Envelope and message shapes: requests, responses and export
//! (indication delivery) messages.

use serde::Serialize;

use super::declaration::Declaration;
use super::naming::{
    ClassName, InstanceName, InstancePath, LocalClassPath, LocalInstancePath, LocalNamespacePath,
    ObjectPath, ValueReference,
};
use super::object::{Class, Instance, QualifierDeclaration};
use super::value::{
    Value, ValueArray, ValueInstanceWithPath, ValueNamedInstance, ValueObject,
    ValueObjectWithLocalPath, ValueObjectWithPath, ValueRefArray,
};
use super::{decode_children, CimXml};
use crate::cimerr::CimError;
use crate::error::{Result, WbemError};
use crate::xml::{parse_document, write_document, Element};

pub const CIM_VERSION: &str = "2.0";
pub const DTD_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "1.0";
pub const MESSAGE_ID: &str = "1001";

/// `CIM` root: exactly one of a message or a declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cim {
    pub cim_version: String,
    pub dtd_version: String,
    pub body: CimBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CimBody {
    Message(Message),
    Declaration(Declaration),
}

impl Cim {
    /// Wrap a message kind in the standard envelope.
    pub fn message(kind: MessageKind) -> Self {
        Self {
            cim_version: CIM_VERSION.into(),
            dtd_version: DTD_VERSION.into(),
            body: CimBody::Message(Message {
                id: MESSAGE_ID.into(),
                protocol_version: PROTOCOL_VERSION.into(),
                kind,
            }),
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match &self.body {
            CimBody::Message(m) => Some(m),
            CimBody::Declaration(_) => None,
        }
    }

    pub fn into_message(self) -> Option<Message> {
        match self.body {
            CimBody::Message(m) => Some(m),
            CimBody::Declaration(_) => None,
        }
    }

    /// Serialize with the XML declaration header.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        write_document(&self.to_xml())
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        let cim = parse_document(raw).and_then(|root| Self::from_xml(&root));
        if let Err(e) = &cim {
            tracing::debug!(error = %e, len = raw.len(), "CIM-XML document rejected");
        }
        cim
    }
}

impl CimXml for Cim {
    fn to_xml(&self) -> Element {
        let el = Element::new("CIM")
            .with_attr("CIMVERSION", self.cim_version.as_str())
            .with_attr("DTDVERSION", self.dtd_version.as_str());
        match &self.body {
            CimBody::Message(m) => el.with_child(m.to_xml()),
            CimBody::Declaration(d) => el.with_child(d.to_xml()),
        }
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("CIM")?;
        let c = el.required_choice(&["MESSAGE", "DECLARATION"])?;
        let body = if c.name == "MESSAGE" {
            CimBody::Message(Message::from_xml(c)?)
        } else {
            CimBody::Declaration(Declaration::from_xml(c)?)
        };
        Ok(Self {
            cim_version: el.attr("CIMVERSION").unwrap_or_default().to_string(),
            dtd_version: el.attr("DTDVERSION").unwrap_or_default().to_string(),
            body,
        })
    }
}

/// `MESSAGE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: String,
    pub protocol_version: String,
    pub kind: MessageKind,
}

/// The eight message shapes. Exactly one is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MessageKind {
    SimpleReq(SimpleReq),
    MultiReq(Vec<SimpleReq>),
    SimpleRsp(SimpleRsp),
    MultiRsp(Vec<SimpleRsp>),
    SimpleExpReq(SimpleExpReq),
    MultiExpReq(Vec<SimpleExpReq>),
    SimpleExpRsp(SimpleExpRsp),
    MultiExpRsp(Vec<SimpleExpRsp>),
}

const MESSAGE_SHAPES: [&str; 8] = [
    "SIMPLEREQ",
    "MULTIREQ",
    "SIMPLERSP",
    "MULTIRSP",
    "SIMPLEEXPREQ",
    "MULTIEXPREQ",
    "SIMPLEEXPRSP",
    "MULTIEXPRSP",
];

fn multi<T: CimXml>(tag: &str, items: &[T]) -> Element {
    Element::new(tag).with_children(items.iter().map(CimXml::to_xml))
}

impl CimXml for Message {
    fn to_xml(&self) -> Element {
        let inner = match &self.kind {
            MessageKind::SimpleReq(r) => r.to_xml(),
            MessageKind::MultiReq(r) => multi("MULTIREQ", r),
            MessageKind::SimpleRsp(r) => r.to_xml(),
            MessageKind::MultiRsp(r) => multi("MULTIRSP", r),
            MessageKind::SimpleExpReq(r) => r.to_xml(),
            MessageKind::MultiExpReq(r) => multi("MULTIEXPREQ", r),
            MessageKind::SimpleExpRsp(r) => r.to_xml(),
            MessageKind::MultiExpRsp(r) => multi("MULTIEXPRSP", r),
        };
        Element::new("MESSAGE")
            .with_attr("ID", self.id.as_str())
            .with_attr("PROTOCOLVERSION", self.protocol_version.as_str())
            .with_child(inner)
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("MESSAGE")?;
        let c = el.required_choice(&MESSAGE_SHAPES)?;
        let kind = match c.name.as_str() {
            "SIMPLEREQ" => MessageKind::SimpleReq(SimpleReq::from_xml(c)?),
            "MULTIREQ" => MessageKind::MultiReq(decode_children(c, "SIMPLEREQ")?),
            "SIMPLERSP" => MessageKind::SimpleRsp(SimpleRsp::from_xml(c)?),
            "MULTIRSP" => MessageKind::MultiRsp(decode_children(c, "SIMPLERSP")?),
            "SIMPLEEXPREQ" => MessageKind::SimpleExpReq(SimpleExpReq::from_xml(c)?),
            "MULTIEXPREQ" => MessageKind::MultiExpReq(decode_children(c, "SIMPLEEXPREQ")?),
            "SIMPLEEXPRSP" => MessageKind::SimpleExpRsp(SimpleExpRsp::from_xml(c)?),
            _ => MessageKind::MultiExpRsp(decode_children(c, "SIMPLEEXPRSP")?),
        };
        Ok(Self {
            id: el.attr("ID").unwrap_or_default().to_string(),
            protocol_version: el.attr("PROTOCOLVERSION").unwrap_or_default().to_string(),
            kind,
        })
    }
}

/// `CORRELATOR`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correlator {
    pub name: String,
    pub cim_type: String,
    pub value: Value,
}

impl CimXml for Correlator {
    fn to_xml(&self) -> Element {
        Element::new("CORRELATOR")
            .with_attr("NAME", self.name.as_str())
            .with_attr("TYPE", self.cim_type.as_str())
            .with_child(self.value.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("CORRELATOR")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            cim_type: el.attr("TYPE").unwrap_or_default().to_string(),
            value: Value::from_xml(el.required_child("VALUE")?)?,
        })
    }
}

/// `SIMPLEREQ`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleReq {
    pub correlators: Vec<Correlator>,
    pub call: RequestCall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RequestCall {
    Method(MethodCall),
    Intrinsic(IMethodCall),
}

impl CimXml for SimpleReq {
    fn to_xml(&self) -> Element {
        let call = match &self.call {
            RequestCall::Method(m) => m.to_xml(),
            RequestCall::Intrinsic(m) => m.to_xml(),
        };
        Element::new("SIMPLEREQ")
            .with_children(self.correlators.iter().map(CimXml::to_xml))
            .with_child(call)
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("SIMPLEREQ")?;
        let c = el.required_choice(&["METHODCALL", "IMETHODCALL"])?;
        let call = if c.name == "METHODCALL" {
            RequestCall::Method(MethodCall::from_xml(c)?)
        } else {
            RequestCall::Intrinsic(IMethodCall::from_xml(c)?)
        };
        Ok(Self {
            correlators: decode_children(el, "CORRELATOR")?,
            call,
        })
    }
}

/// Object an extrinsic method is invoked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MethodTarget {
    Class(LocalClassPath),
    Instance(LocalInstancePath),
}

/// `METHODCALL`: extrinsic call, always bound to an object path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCall {
    pub name: String,
    pub target: MethodTarget,
    pub params: Vec<ParamValue>,
}

impl CimXml for MethodCall {
    fn to_xml(&self) -> Element {
        let target = match &self.target {
            MethodTarget::Class(p) => p.to_xml(),
            MethodTarget::Instance(p) => p.to_xml(),
        };
        Element::new("METHODCALL")
            .with_attr("NAME", self.name.as_str())
            .with_child(target)
            .with_children(self.params.iter().map(CimXml::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("METHODCALL")?;
        let c = el.required_choice(&["LOCALCLASSPATH", "LOCALINSTANCEPATH"])?;
        let target = if c.name == "LOCALCLASSPATH" {
            MethodTarget::Class(LocalClassPath::from_xml(c)?)
        } else {
            MethodTarget::Instance(LocalInstancePath::from_xml(c)?)
        };
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            target,
            params: decode_children(el, "PARAMVALUE")?,
        })
    }
}

/// Payload shapes of a `PARAMVALUE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParamValueData {
    Value(Value),
    Reference(ValueReference),
    Array(ValueArray),
    RefArray(ValueRefArray),
    ClassName(ClassName),
    InstanceName(InstanceName),
    Class(Class),
    Instance(Instance),
    NamedInstance(ValueNamedInstance),
}

const PARAM_SHAPES: [&str; 9] = [
    "VALUE",
    "VALUE.REFERENCE",
    "VALUE.ARRAY",
    "VALUE.REFARRAY",
    "CLASSNAME",
    "INSTANCENAME",
    "CLASS",
    "INSTANCE",
    "VALUE.NAMEDINSTANCE",
];

impl ParamValueData {
    fn to_xml(&self) -> Element {
        match self {
            ParamValueData::Value(v) => v.to_xml(),
            ParamValueData::Reference(v) => v.to_xml(),
            ParamValueData::Array(v) => v.to_xml(),
            ParamValueData::RefArray(v) => v.to_xml(),
            ParamValueData::ClassName(v) => v.to_xml(),
            ParamValueData::InstanceName(v) => v.to_xml(),
            ParamValueData::Class(v) => v.to_xml(),
            ParamValueData::Instance(v) => v.to_xml(),
            ParamValueData::NamedInstance(v) => v.to_xml(),
        }
    }

    fn decode(parent: &Element) -> Result<Option<Self>> {
        let Some(c) = parent.choice(&PARAM_SHAPES)? else {
            return Ok(None);
        };
        Ok(Some(match c.name.as_str() {
            "VALUE" => ParamValueData::Value(Value::from_xml(c)?),
            "VALUE.REFERENCE" => ParamValueData::Reference(ValueReference::from_xml(c)?),
            "VALUE.ARRAY" => ParamValueData::Array(ValueArray::from_xml(c)?),
            "VALUE.REFARRAY" => ParamValueData::RefArray(ValueRefArray::from_xml(c)?),
            "CLASSNAME" => ParamValueData::ClassName(ClassName::from_xml(c)?),
            "INSTANCENAME" => ParamValueData::InstanceName(InstanceName::from_xml(c)?),
            "CLASS" => ParamValueData::Class(Class::from_xml(c)?),
            "INSTANCE" => ParamValueData::Instance(Instance::from_xml(c)?),
            _ => ParamValueData::NamedInstance(ValueNamedInstance::from_xml(c)?),
        }))
    }
}

/// `PARAMVALUE`: named argument of an extrinsic call, or an output
/// parameter of its response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamValue {
    pub name: String,
    pub param_type: Option<String>,
    pub embedded_object: Option<String>,
    pub value: Option<ParamValueData>,
}

impl ParamValue {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValueData>) -> Self {
        Self {
            name: name.into(),
            param_type: None,
            embedded_object: None,
            value: Some(value.into()),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = Some(param_type.into());
        self
    }
}

impl CimXml for ParamValue {
    fn to_xml(&self) -> Element {
        Element::new("PARAMVALUE")
            .with_attr("NAME", self.name.as_str())
            .with_opt_attr("PARAMTYPE", self.param_type.as_deref())
            .with_opt_attr("EmbeddedObject", self.embedded_object.as_deref())
            .with_opt_child(self.value.as_ref().map(ParamValueData::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("PARAMVALUE")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            param_type: el.attr("PARAMTYPE").map(str::to_string),
            embedded_object: el.attr("EmbeddedObject").map(str::to_string),
            value: ParamValueData::decode(el)?,
        })
    }
}

/// `IMETHODCALL`: intrinsic call, always bound to a namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IMethodCall {
    pub name: String,
    pub namespace: LocalNamespacePath,
    pub params: Vec<IParamValue>,
}

impl CimXml for IMethodCall {
    fn to_xml(&self) -> Element {
        Element::new("IMETHODCALL")
            .with_attr("NAME", self.name.as_str())
            .with_child(self.namespace.to_xml())
            .with_children(self.params.iter().map(CimXml::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("IMETHODCALL")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            namespace: LocalNamespacePath::from_xml(el.required_child("LOCALNAMESPACEPATH")?)?,
            params: decode_children(el, "IPARAMVALUE")?,
        })
    }
}

/// Payload shapes of an `IPARAMVALUE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IParamValueData {
    Value(Value),
    Array(ValueArray),
    Reference(ValueReference),
    ClassName(ClassName),
    InstanceName(InstanceName),
    QualifierDeclaration(QualifierDeclaration),
    Class(Class),
    Instance(Instance),
    NamedInstance(ValueNamedInstance),
}

const IPARAM_SHAPES: [&str; 9] = [
    "VALUE",
    "VALUE.ARRAY",
    "VALUE.REFERENCE",
    "CLASSNAME",
    "INSTANCENAME",
    "QUALIFIER.DECLARATION",
    "CLASS",
    "INSTANCE",
    "VALUE.NAMEDINSTANCE",
];

impl IParamValueData {
    fn to_xml(&self) -> Element {
        match self {
            IParamValueData::Value(v) => v.to_xml(),
            IParamValueData::Array(v) => v.to_xml(),
            IParamValueData::Reference(v) => v.to_xml(),
            IParamValueData::ClassName(v) => v.to_xml(),
            IParamValueData::InstanceName(v) => v.to_xml(),
            IParamValueData::QualifierDeclaration(v) => v.to_xml(),
            IParamValueData::Class(v) => v.to_xml(),
            IParamValueData::Instance(v) => v.to_xml(),
            IParamValueData::NamedInstance(v) => v.to_xml(),
        }
    }

    fn decode(parent: &Element) -> Result<Option<Self>> {
        let Some(c) = parent.choice(&IPARAM_SHAPES)? else {
            return Ok(None);
        };
        Ok(Some(match c.name.as_str() {
            "VALUE" => IParamValueData::Value(Value::from_xml(c)?),
            "VALUE.ARRAY" => IParamValueData::Array(ValueArray::from_xml(c)?),
            "VALUE.REFERENCE" => IParamValueData::Reference(ValueReference::from_xml(c)?),
            "CLASSNAME" => IParamValueData::ClassName(ClassName::from_xml(c)?),
            "INSTANCENAME" => IParamValueData::InstanceName(InstanceName::from_xml(c)?),
            "QUALIFIER.DECLARATION" => {
                IParamValueData::QualifierDeclaration(QualifierDeclaration::from_xml(c)?)
            }
            "CLASS" => IParamValueData::Class(Class::from_xml(c)?),
            "INSTANCE" => IParamValueData::Instance(Instance::from_xml(c)?),
            _ => IParamValueData::NamedInstance(ValueNamedInstance::from_xml(c)?),
        }))
    }
}

/// `IPARAMVALUE`. A `None` payload encodes an explicit NULL argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IParamValue {
    pub name: String,
    pub value: Option<IParamValueData>,
}

impl IParamValue {
    /// Scalar payload text, if any.
    pub fn scalar(&self) -> Option<&str> {
        match &self.value {
            Some(IParamValueData::Value(v)) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl CimXml for IParamValue {
    fn to_xml(&self) -> Element {
        Element::new("IPARAMVALUE")
            .with_attr("NAME", self.name.as_str())
            .with_opt_child(self.value.as_ref().map(IParamValueData::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("IPARAMVALUE")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            value: IParamValueData::decode(el)?,
        })
    }
}

/// `SIMPLERSP`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimpleRsp {
    Method(MethodResponse),
    Intrinsic(IMethodResponse),
}

impl CimXml for SimpleRsp {
    fn to_xml(&self) -> Element {
        let inner = match self {
            SimpleRsp::Method(r) => r.to_xml(),
            SimpleRsp::Intrinsic(r) => r.to_xml(),
        };
        Element::new("SIMPLERSP").with_child(inner)
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("SIMPLERSP")?;
        let c = el.required_choice(&["METHODRESPONSE", "IMETHODRESPONSE"])?;
        if c.name == "METHODRESPONSE" {
            Ok(SimpleRsp::Method(MethodResponse::from_xml(c)?))
        } else {
            Ok(SimpleRsp::Intrinsic(IMethodResponse::from_xml(c)?))
        }
    }
}

/// `ERROR`: protocol-level failure carried in place of a return value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorElement {
    pub code: String,
    pub description: Option<String>,
    pub instances: Vec<Instance>,
}

impl ErrorElement {
    pub fn new(error: CimError, description: Option<String>) -> Self {
        Self {
            code: error.code().to_string(),
            description,
            instances: Vec::new(),
        }
    }

    /// Classify the code. Unparseable codes are a general failure.
    pub fn cim_error(&self) -> CimError {
        self.code
            .trim()
            .parse::<i64>()
            .map(CimError::from_code)
            .unwrap_or_else(|_| CimError::failed())
    }
}

impl CimXml for ErrorElement {
    fn to_xml(&self) -> Element {
        Element::new("ERROR")
            .with_attr("CODE", self.code.as_str())
            .with_opt_attr("DESCRIPTION", self.description.as_deref())
            .with_children(self.instances.iter().map(CimXml::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("ERROR")?;
        Ok(Self {
            code: el.required_attr("CODE")?.to_string(),
            description: el.attr("DESCRIPTION").map(str::to_string),
            instances: decode_children(el, "INSTANCE")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReturnData {
    Value(Value),
    Reference(ValueReference),
}

/// `RETURNVALUE` of an extrinsic method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnValue {
    pub param_type: Option<String>,
    pub embedded_object: Option<String>,
    pub value: Option<ReturnData>,
}

impl ReturnValue {
    pub fn scalar(v: impl Into<String>) -> Self {
        Self {
            param_type: None,
            embedded_object: None,
            value: Some(ReturnData::Value(Value::new(v))),
        }
    }
}

impl CimXml for ReturnValue {
    fn to_xml(&self) -> Element {
        let value = self.value.as_ref().map(|v| match v {
            ReturnData::Value(v) => v.to_xml(),
            ReturnData::Reference(r) => r.to_xml(),
        });
        Element::new("RETURNVALUE")
            .with_opt_attr("PARAMTYPE", self.param_type.as_deref())
            .with_opt_attr("EmbeddedObject", self.embedded_object.as_deref())
            .with_opt_child(value)
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("RETURNVALUE")?;
        let value = match el.choice(&["VALUE", "VALUE.REFERENCE"])? {
            None => None,
            Some(c) if c.name == "VALUE" => Some(ReturnData::Value(Value::from_xml(c)?)),
            Some(c) => Some(ReturnData::Reference(ValueReference::from_xml(c)?)),
        };
        Ok(Self {
            param_type: el.attr("PARAMTYPE").map(str::to_string),
            embedded_object: el.attr("EmbeddedObject").map(str::to_string),
            value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MethodResponseBody {
    Error(ErrorElement),
    Success {
        return_value: Option<ReturnValue>,
        out_params: Vec<ParamValue>,
    },
}

/// `METHODRESPONSE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodResponse {
    pub name: String,
    pub body: MethodResponseBody,
}

impl CimXml for MethodResponse {
    fn to_xml(&self) -> Element {
        let el = Element::new("METHODRESPONSE").with_attr("NAME", self.name.as_str());
        match &self.body {
            MethodResponseBody::Error(e) => el.with_child(e.to_xml()),
            MethodResponseBody::Success {
                return_value,
                out_params,
            } => el
                .with_opt_child(return_value.as_ref().map(CimXml::to_xml))
                .with_children(out_params.iter().map(CimXml::to_xml)),
        }
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("METHODRESPONSE")?;
        let body = match el.child("ERROR") {
            Some(e) => {
                reject_mixed_error(el, &["RETURNVALUE", "PARAMVALUE"])?;
                MethodResponseBody::Error(ErrorElement::from_xml(e)?)
            }
            None => MethodResponseBody::Success {
                return_value: el.child("RETURNVALUE").map(ReturnValue::from_xml).transpose()?,
                out_params: decode_children(el, "PARAMVALUE")?,
            },
        };
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            body,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IMethodResponseBody {
    Error(ErrorElement),
    Success {
        return_value: Option<IReturnValue>,
        out_params: Vec<ParamValue>,
    },
}

/// `IMETHODRESPONSE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IMethodResponse {
    pub name: String,
    pub body: IMethodResponseBody,
}

impl CimXml for IMethodResponse {
    fn to_xml(&self) -> Element {
        let el = Element::new("IMETHODRESPONSE").with_attr("NAME", self.name.as_str());
        match &self.body {
            IMethodResponseBody::Error(e) => el.with_child(e.to_xml()),
            IMethodResponseBody::Success {
                return_value,
                out_params,
            } => el
                .with_opt_child(return_value.as_ref().map(CimXml::to_xml))
                .with_children(out_params.iter().map(CimXml::to_xml)),
        }
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("IMETHODRESPONSE")?;
        let body = match el.child("ERROR") {
            Some(e) => {
                reject_mixed_error(el, &["IRETURNVALUE", "PARAMVALUE"])?;
                IMethodResponseBody::Error(ErrorElement::from_xml(e)?)
            }
            None => IMethodResponseBody::Success {
                return_value: el
                    .child("IRETURNVALUE")
                    .map(IReturnValue::from_xml)
                    .transpose()?,
                out_params: decode_children(el, "PARAMVALUE")?,
            },
        };
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            body,
        })
    }
}

fn reject_mixed_error(el: &Element, success_tags: &[&str]) -> Result<()> {
    match el
        .children
        .iter()
        .find(|c| success_tags.contains(&c.name.as_str()))
    {
        Some(c) => Err(WbemError::malformed(format!(
            "{}: ERROR and {} are mutually exclusive",
            el.name, c.name
        ))),
        None => Ok(()),
    }
}

/// `IRETURNVALUE`: a homogeneous list whose element kind depends on the
/// operation. `Empty` is a present section with no children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IReturnValue {
    Empty,
    ClassNames(Vec<ClassName>),
    InstanceNames(Vec<InstanceName>),
    Values(Vec<Value>),
    ObjectsWithPath(Vec<ValueObjectWithPath>),
    ObjectsWithLocalPath(Vec<ValueObjectWithLocalPath>),
    Objects(Vec<ValueObject>),
    ObjectPaths(Vec<ObjectPath>),
    QualifierDeclarations(Vec<QualifierDeclaration>),
    Array(ValueArray),
    Reference(ValueReference),
    Classes(Vec<Class>),
    Instances(Vec<Instance>),
    InstancePaths(Vec<InstancePath>),
    NamedInstances(Vec<ValueNamedInstance>),
    InstancesWithPath(Vec<ValueInstanceWithPath>),
}

const IRETURN_SHAPES: [&str; 15] = [
    "CLASSNAME",
    "INSTANCENAME",
    "VALUE",
    "VALUE.OBJECTWITHPATH",
    "VALUE.OBJECTWITHLOCALPATH",
    "VALUE.OBJECT",
    "OBJECTPATH",
    "QUALIFIER.DECLARATION",
    "VALUE.ARRAY",
    "VALUE.REFERENCE",
    "CLASS",
    "INSTANCE",
    "INSTANCEPATH",
    "VALUE.NAMEDINSTANCE",
    "VALUE.INSTANCEWITHPATH",
];

impl IReturnValue {
    pub fn is_empty(&self) -> bool {
        match self {
            IReturnValue::Empty => true,
            IReturnValue::ClassNames(v) => v.is_empty(),
            IReturnValue::InstanceNames(v) => v.is_empty(),
            IReturnValue::Values(v) => v.is_empty(),
            IReturnValue::ObjectsWithPath(v) => v.is_empty(),
            IReturnValue::ObjectsWithLocalPath(v) => v.is_empty(),
            IReturnValue::Objects(v) => v.is_empty(),
            IReturnValue::ObjectPaths(v) => v.is_empty(),
            IReturnValue::QualifierDeclarations(v) => v.is_empty(),
            IReturnValue::Array(v) => v.is_empty(),
            IReturnValue::Reference(_) => false,
            IReturnValue::Classes(v) => v.is_empty(),
            IReturnValue::Instances(v) => v.is_empty(),
            IReturnValue::InstancePaths(v) => v.is_empty(),
            IReturnValue::NamedInstances(v) => v.is_empty(),
            IReturnValue::InstancesWithPath(v) => v.is_empty(),
        }
    }

    /// Kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            IReturnValue::Empty => "empty",
            IReturnValue::ClassNames(_) => "CLASSNAME",
            IReturnValue::InstanceNames(_) => "INSTANCENAME",
            IReturnValue::Values(_) => "VALUE",
            IReturnValue::ObjectsWithPath(_) => "VALUE.OBJECTWITHPATH",
            IReturnValue::ObjectsWithLocalPath(_) => "VALUE.OBJECTWITHLOCALPATH",
            IReturnValue::Objects(_) => "VALUE.OBJECT",
            IReturnValue::ObjectPaths(_) => "OBJECTPATH",
            IReturnValue::QualifierDeclarations(_) => "QUALIFIER.DECLARATION",
            IReturnValue::Array(_) => "VALUE.ARRAY",
            IReturnValue::Reference(_) => "VALUE.REFERENCE",
            IReturnValue::Classes(_) => "CLASS",
            IReturnValue::Instances(_) => "INSTANCE",
            IReturnValue::InstancePaths(_) => "INSTANCEPATH",
            IReturnValue::NamedInstances(_) => "VALUE.NAMEDINSTANCE",
            IReturnValue::InstancesWithPath(_) => "VALUE.INSTANCEWITHPATH",
        }
    }
}

fn single<'a>(items: &[&'a Element]) -> Result<&'a Element> {
    match items {
        [one] => Ok(*one),
        _ => Err(WbemError::malformed(format!(
            "IRETURNVALUE: expected one {}, found {}",
            items.first().map(|e| e.name.as_str()).unwrap_or_default(),
            items.len()
        ))),
    }
}

fn each<T: CimXml>(items: &[&Element]) -> Result<Vec<T>> {
    items.iter().map(|e| T::from_xml(e)).collect()
}

impl CimXml for IReturnValue {
    fn to_xml(&self) -> Element {
        fn all<T: CimXml>(v: &[T]) -> Vec<Element> {
            v.iter().map(CimXml::to_xml).collect()
        }
        let children = match self {
            IReturnValue::Empty => Vec::new(),
            IReturnValue::ClassNames(v) => all(v),
            IReturnValue::InstanceNames(v) => all(v),
            IReturnValue::Values(v) => all(v),
            IReturnValue::ObjectsWithPath(v) => all(v),
            IReturnValue::ObjectsWithLocalPath(v) => all(v),
            IReturnValue::Objects(v) => all(v),
            IReturnValue::ObjectPaths(v) => all(v),
            IReturnValue::QualifierDeclarations(v) => all(v),
            IReturnValue::Array(v) => vec![v.to_xml()],
            IReturnValue::Reference(v) => vec![v.to_xml()],
            IReturnValue::Classes(v) => all(v),
            IReturnValue::Instances(v) => all(v),
            IReturnValue::InstancePaths(v) => all(v),
            IReturnValue::NamedInstances(v) => all(v),
            IReturnValue::InstancesWithPath(v) => all(v),
        };
        Element::new("IRETURNVALUE").with_children(children)
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("IRETURNVALUE")?;
        let items: Vec<&Element> = el
            .children
            .iter()
            .filter(|c| IRETURN_SHAPES.contains(&c.name.as_str()))
            .collect();
        let Some(first) = items.first() else {
            return Ok(IReturnValue::Empty);
        };
        if let Some(other) = items.iter().find(|c| c.name != first.name) {
            return Err(WbemError::malformed(format!(
                "IRETURNVALUE mixes {} and {}",
                first.name, other.name
            )));
        }
        Ok(match first.name.as_str() {
            "CLASSNAME" => IReturnValue::ClassNames(each(&items)?),
            "INSTANCENAME" => IReturnValue::InstanceNames(each(&items)?),
            "VALUE" => IReturnValue::Values(each(&items)?),
            "VALUE.OBJECTWITHPATH" => IReturnValue::ObjectsWithPath(each(&items)?),
            "VALUE.OBJECTWITHLOCALPATH" => IReturnValue::ObjectsWithLocalPath(each(&items)?),
            "VALUE.OBJECT" => IReturnValue::Objects(each(&items)?),
            "OBJECTPATH" => IReturnValue::ObjectPaths(each(&items)?),
            "QUALIFIER.DECLARATION" => IReturnValue::QualifierDeclarations(each(&items)?),
            "VALUE.ARRAY" => IReturnValue::Array(ValueArray::from_xml(single(&items)?)?),
            "VALUE.REFERENCE" => {
                IReturnValue::Reference(ValueReference::from_xml(single(&items)?)?)
            }
            "CLASS" => IReturnValue::Classes(each(&items)?),
            "INSTANCE" => IReturnValue::Instances(each(&items)?),
            "INSTANCEPATH" => IReturnValue::InstancePaths(each(&items)?),
            "VALUE.NAMEDINSTANCE" => IReturnValue::NamedInstances(each(&items)?),
            _ => IReturnValue::InstancesWithPath(each(&items)?),
        })
    }
}

/// `SIMPLEEXPREQ`: an export (indication delivery) request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleExpReq {
    pub correlators: Vec<Correlator>,
    pub call: ExpMethodCall,
}

impl CimXml for SimpleExpReq {
    fn to_xml(&self) -> Element {
        Element::new("SIMPLEEXPREQ")
            .with_children(self.correlators.iter().map(CimXml::to_xml))
            .with_child(self.call.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("SIMPLEEXPREQ")?;
        Ok(Self {
            correlators: decode_children(el, "CORRELATOR")?,
            call: ExpMethodCall::from_xml(el.required_child("EXPMETHODCALL")?)?,
        })
    }
}

/// `EXPMETHODCALL`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpMethodCall {
    pub name: String,
    pub params: Vec<ExpParamValue>,
}

impl CimXml for ExpMethodCall {
    fn to_xml(&self) -> Element {
        Element::new("EXPMETHODCALL")
            .with_attr("NAME", self.name.as_str())
            .with_children(self.params.iter().map(CimXml::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("EXPMETHODCALL")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            params: decode_children(el, "EXPPARAMVALUE")?,
        })
    }
}

/// `EXPPARAMVALUE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpParamValue {
    pub name: String,
    pub instance: Option<Instance>,
}

impl CimXml for ExpParamValue {
    fn to_xml(&self) -> Element {
        Element::new("EXPPARAMVALUE")
            .with_attr("NAME", self.name.as_str())
            .with_opt_child(self.instance.as_ref().map(CimXml::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("EXPPARAMVALUE")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            instance: el.child("INSTANCE").map(Instance::from_xml).transpose()?,
        })
    }
}

/// `SIMPLEEXPRSP`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleExpRsp {
    pub response: ExpMethodResponse,
}

impl CimXml for SimpleExpRsp {
    fn to_xml(&self) -> Element {
        Element::new("SIMPLEEXPRSP").with_child(self.response.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("SIMPLEEXPRSP")?;
        Ok(Self {
            response: ExpMethodResponse::from_xml(el.required_child("EXPMETHODRESPONSE")?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExpMethodResponseBody {
    Error(ErrorElement),
    Success(Option<IReturnValue>),
}

/// `EXPMETHODRESPONSE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpMethodResponse {
    pub name: String,
    pub body: ExpMethodResponseBody,
}

impl CimXml for ExpMethodResponse {
    fn to_xml(&self) -> Element {
        let el = Element::new("EXPMETHODRESPONSE").with_attr("NAME", self.name.as_str());
        match &self.body {
            ExpMethodResponseBody::Error(e) => el.with_child(e.to_xml()),
            ExpMethodResponseBody::Success(rv) => {
                el.with_opt_child(rv.as_ref().map(CimXml::to_xml))
            }
        }
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("EXPMETHODRESPONSE")?;
        let body = match el.child("ERROR") {
            Some(e) => {
                reject_mixed_error(el, &["IRETURNVALUE"])?;
                ExpMethodResponseBody::Error(ErrorElement::from_xml(e)?)
            }
            None => ExpMethodResponseBody::Success(
                el.child("IRETURNVALUE")
                    .map(IReturnValue::from_xml)
                    .transpose()?,
            ),
        };
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            body,
        })
    }
}
