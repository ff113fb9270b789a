//! Object naming and locating elements: namespaces, class and instance
//! names, and the six reference shapes.

use serde::Serialize;

use super::{decode_children, CimXml};
use crate::error::{Result, WbemError};
use crate::xml::Element;

/// `LOCALNAMESPACEPATH`: ordered `NAMESPACE` segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalNamespacePath {
    pub segments: Vec<String>,
}

impl LocalNamespacePath {
    /// Split `root/cimv2` style paths on `/`. Empty segments are dropped.
    pub fn parse(namespace: &str) -> Self {
        Self {
            segments: namespace
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn render(&self) -> String {
        self.segments.join("/")
    }
}

impl CimXml for LocalNamespacePath {
    fn to_xml(&self) -> Element {
        Element::new("LOCALNAMESPACEPATH").with_children(
            self.segments
                .iter()
                .map(|s| Element::new("NAMESPACE").with_attr("NAME", s.as_str())),
        )
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("LOCALNAMESPACEPATH")?;
        let segments = el
            .children_named("NAMESPACE")
            .map(|ns| ns.required_attr("NAME").map(str::to_string))
            .collect::<Result<Vec<_>>>()?;
        if segments.is_empty() {
            return Err(WbemError::malformed("LOCALNAMESPACEPATH requires NAMESPACE"));
        }
        Ok(Self { segments })
    }
}

/// `NAMESPACEPATH`: host plus local namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespacePath {
    pub host: String,
    pub local: LocalNamespacePath,
}

impl CimXml for NamespacePath {
    fn to_xml(&self) -> Element {
        Element::new("NAMESPACEPATH")
            .with_child(Element::new("HOST").with_text(self.host.as_str()))
            .with_child(self.local.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("NAMESPACEPATH")?;
        Ok(Self {
            host: el.required_child("HOST")?.text.trim().to_string(),
            local: LocalNamespacePath::from_xml(el.required_child("LOCALNAMESPACEPATH")?)?,
        })
    }
}

/// `CLASSNAME`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassName {
    pub name: String,
}

impl ClassName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl CimXml for ClassName {
    fn to_xml(&self) -> Element {
        Element::new("CLASSNAME").with_attr("NAME", self.name.as_str())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("CLASSNAME")?;
        Ok(Self::new(el.required_attr("NAME")?))
    }
}

/// `CLASSPATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassPath {
    pub namespace: NamespacePath,
    pub class_name: ClassName,
}

impl CimXml for ClassPath {
    fn to_xml(&self) -> Element {
        Element::new("CLASSPATH")
            .with_child(self.namespace.to_xml())
            .with_child(self.class_name.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("CLASSPATH")?;
        Ok(Self {
            namespace: NamespacePath::from_xml(el.required_child("NAMESPACEPATH")?)?,
            class_name: ClassName::from_xml(el.required_child("CLASSNAME")?)?,
        })
    }
}

/// `LOCALCLASSPATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalClassPath {
    pub namespace: LocalNamespacePath,
    pub class_name: ClassName,
}

impl CimXml for LocalClassPath {
    fn to_xml(&self) -> Element {
        Element::new("LOCALCLASSPATH")
            .with_child(self.namespace.to_xml())
            .with_child(self.class_name.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("LOCALCLASSPATH")?;
        Ok(Self {
            namespace: LocalNamespacePath::from_xml(el.required_child("LOCALNAMESPACEPATH")?)?,
            class_name: ClassName::from_xml(el.required_child("CLASSNAME")?)?,
        })
    }
}

/// `KEYVALUE` `VALUETYPE` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyValueType {
    String,
    Boolean,
    Numeric,
}

impl KeyValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyValueType::String => "string",
            KeyValueType::Boolean => "boolean",
            KeyValueType::Numeric => "numeric",
        }
    }

    fn parse(v: &str) -> Result<Self> {
        match v {
            "string" => Ok(KeyValueType::String),
            "boolean" => Ok(KeyValueType::Boolean),
            "numeric" => Ok(KeyValueType::Numeric),
            other => Err(WbemError::malformed(format!("unknown VALUETYPE {other:?}"))),
        }
    }
}

/// `KEYVALUE`. An absent `VALUETYPE` means `string`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    pub value_type: Option<KeyValueType>,
    pub cim_type: Option<String>,
    pub value: String,
}

impl KeyValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value_type: Some(KeyValueType::String),
            cim_type: Some("string".into()),
            value: value.into(),
        }
    }
}

impl CimXml for KeyValue {
    fn to_xml(&self) -> Element {
        Element::new("KEYVALUE")
            .with_opt_attr("VALUETYPE", self.value_type.map(KeyValueType::as_str))
            .with_opt_attr("TYPE", self.cim_type.as_deref())
            .with_text(self.value.as_str())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("KEYVALUE")?;
        Ok(Self {
            value_type: el.attr("VALUETYPE").map(KeyValueType::parse).transpose()?,
            cim_type: el.attr("TYPE").map(str::to_string),
            value: el.text.clone(),
        })
    }
}

/// Value of a `KEYBINDING`: a scalar key or a nested reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum KeyBindingValue {
    Value(KeyValue),
    Reference(Box<ValueReference>),
}

/// `KEYBINDING`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyBinding {
    pub name: String,
    pub value: KeyBindingValue,
}

impl KeyBinding {
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: KeyBindingValue::Value(KeyValue::string(value)),
        }
    }

    pub fn reference(name: impl Into<String>, reference: ValueReference) -> Self {
        Self {
            name: name.into(),
            value: KeyBindingValue::Reference(Box::new(reference)),
        }
    }
}

impl CimXml for KeyBinding {
    fn to_xml(&self) -> Element {
        let el = Element::new("KEYBINDING").with_attr("NAME", self.name.as_str());
        match &self.value {
            KeyBindingValue::Value(kv) => el.with_child(kv.to_xml()),
            KeyBindingValue::Reference(r) => el.with_child(r.to_xml()),
        }
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("KEYBINDING")?;
        let picked = el.required_choice(&["KEYVALUE", "VALUE.REFERENCE"])?;
        let value = if picked.name == "KEYVALUE" {
            KeyBindingValue::Value(KeyValue::from_xml(picked)?)
        } else {
            KeyBindingValue::Reference(Box::new(ValueReference::from_xml(picked)?))
        };
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            value,
        })
    }
}

/// Keys of an `INSTANCENAME`: `(KEYBINDING* | KEYVALUE? | VALUE.REFERENCE?)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InstanceKeys {
    Bindings(Vec<KeyBinding>),
    Value(KeyValue),
    Reference(Box<ValueReference>),
}

/// `INSTANCENAME`: class name plus the keys identifying one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceName {
    pub class_name: String,
    pub keys: InstanceKeys,
}

impl InstanceName {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            keys: InstanceKeys::Bindings(Vec::new()),
        }
    }

    /// Append a string key binding. Replaces a single-key or reference key
    /// set with a binding list.
    pub fn with_key(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_binding(KeyBinding::string(name, value));
        self
    }

    pub fn with_binding(mut self, binding: KeyBinding) -> Self {
        self.push_binding(binding);
        self
    }

    fn push_binding(&mut self, binding: KeyBinding) {
        match &mut self.keys {
            InstanceKeys::Bindings(b) => b.push(binding),
            other => *other = InstanceKeys::Bindings(vec![binding]),
        }
    }

    pub fn key(&self, name: &str) -> Option<&KeyBindingValue> {
        match &self.keys {
            InstanceKeys::Bindings(b) => b.iter().find(|k| k.name == name).map(|k| &k.value),
            _ => None,
        }
    }
}

impl CimXml for InstanceName {
    fn to_xml(&self) -> Element {
        let el = Element::new("INSTANCENAME").with_attr("CLASSNAME", self.class_name.as_str());
        match &self.keys {
            InstanceKeys::Bindings(b) => el.with_children(b.iter().map(CimXml::to_xml)),
            InstanceKeys::Value(kv) => el.with_child(kv.to_xml()),
            InstanceKeys::Reference(r) => el.with_child(r.to_xml()),
        }
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("INSTANCENAME")?;
        let keys = match el.choice(&["KEYBINDING", "KEYVALUE", "VALUE.REFERENCE"])? {
            Some(c) if c.name == "KEYVALUE" => InstanceKeys::Value(KeyValue::from_xml(c)?),
            Some(c) if c.name == "VALUE.REFERENCE" => {
                InstanceKeys::Reference(Box::new(ValueReference::from_xml(c)?))
            }
            _ => InstanceKeys::Bindings(decode_children(el, "KEYBINDING")?),
        };
        Ok(Self {
            class_name: el.required_attr("CLASSNAME")?.to_string(),
            keys,
        })
    }
}

/// `INSTANCEPATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstancePath {
    pub namespace: NamespacePath,
    pub instance_name: InstanceName,
}

impl CimXml for InstancePath {
    fn to_xml(&self) -> Element {
        Element::new("INSTANCEPATH")
            .with_child(self.namespace.to_xml())
            .with_child(self.instance_name.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("INSTANCEPATH")?;
        Ok(Self {
            namespace: NamespacePath::from_xml(el.required_child("NAMESPACEPATH")?)?,
            instance_name: InstanceName::from_xml(el.required_child("INSTANCENAME")?)?,
        })
    }
}

/// `LOCALINSTANCEPATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalInstancePath {
    pub namespace: LocalNamespacePath,
    pub instance_name: InstanceName,
}

impl CimXml for LocalInstancePath {
    fn to_xml(&self) -> Element {
        Element::new("LOCALINSTANCEPATH")
            .with_child(self.namespace.to_xml())
            .with_child(self.instance_name.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("LOCALINSTANCEPATH")?;
        Ok(Self {
            namespace: LocalNamespacePath::from_xml(el.required_child("LOCALNAMESPACEPATH")?)?,
            instance_name: InstanceName::from_xml(el.required_child("INSTANCENAME")?)?,
        })
    }
}

/// `OBJECTPATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ObjectPath {
    Instance(InstancePath),
    Class(ClassPath),
}

impl CimXml for ObjectPath {
    fn to_xml(&self) -> Element {
        let inner = match self {
            ObjectPath::Instance(p) => p.to_xml(),
            ObjectPath::Class(p) => p.to_xml(),
        };
        Element::new("OBJECTPATH").with_child(inner)
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("OBJECTPATH")?;
        let c = el.required_choice(&["INSTANCEPATH", "CLASSPATH"])?;
        if c.name == "INSTANCEPATH" {
            Ok(ObjectPath::Instance(InstancePath::from_xml(c)?))
        } else {
            Ok(ObjectPath::Class(ClassPath::from_xml(c)?))
        }
    }
}

/// `VALUE.REFERENCE`: a value that is itself one of six path shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValueReference {
    ClassPath(ClassPath),
    LocalClassPath(LocalClassPath),
    ClassName(ClassName),
    InstancePath(InstancePath),
    LocalInstancePath(LocalInstancePath),
    InstanceName(InstanceName),
}

const REFERENCE_SHAPES: [&str; 6] = [
    "CLASSPATH",
    "LOCALCLASSPATH",
    "CLASSNAME",
    "INSTANCEPATH",
    "LOCALINSTANCEPATH",
    "INSTANCENAME",
];

impl CimXml for ValueReference {
    fn to_xml(&self) -> Element {
        let inner = match self {
            ValueReference::ClassPath(p) => p.to_xml(),
            ValueReference::LocalClassPath(p) => p.to_xml(),
            ValueReference::ClassName(p) => p.to_xml(),
            ValueReference::InstancePath(p) => p.to_xml(),
            ValueReference::LocalInstancePath(p) => p.to_xml(),
            ValueReference::InstanceName(p) => p.to_xml(),
        };
        Element::new("VALUE.REFERENCE").with_child(inner)
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE.REFERENCE")?;
        let c = el.required_choice(&REFERENCE_SHAPES)?;
        Ok(match c.name.as_str() {
            "CLASSPATH" => ValueReference::ClassPath(ClassPath::from_xml(c)?),
            "LOCALCLASSPATH" => ValueReference::LocalClassPath(LocalClassPath::from_xml(c)?),
            "CLASSNAME" => ValueReference::ClassName(ClassName::from_xml(c)?),
            "INSTANCEPATH" => ValueReference::InstancePath(InstancePath::from_xml(c)?),
            "LOCALINSTANCEPATH" => {
                ValueReference::LocalInstancePath(LocalInstancePath::from_xml(c)?)
            }
            _ => ValueReference::InstanceName(InstanceName::from_xml(c)?),
        })
    }
}

/// `<objectName>` argument of association and method operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ObjectName {
    Class(ClassName),
    Instance(InstanceName),
}

impl ObjectName {
    /// Class name of the target, whichever shape it is.
    pub fn class_name(&self) -> &str {
        match self {
            ObjectName::Class(c) => &c.name,
            ObjectName::Instance(i) => &i.class_name,
        }
    }
}

impl From<ClassName> for ObjectName {
    fn from(c: ClassName) -> Self {
        ObjectName::Class(c)
    }
}

impl From<InstanceName> for ObjectName {
    fn from(i: InstanceName) -> Self {
        ObjectName::Instance(i)
    }
}
