//! Value containers: scalars, arrays with explicit nulls, references, and
//! the object-with-name/path wrappers that enumeration responses carry.

use serde::Serialize;

use super::naming::{
    ClassPath, InstanceName, InstancePath, LocalClassPath, LocalInstancePath, ValueReference,
};
use super::object::{Class, Instance};
use super::CimXml;
use crate::error::Result;
use crate::xml::Element;

/// `VALUE`: a scalar in its textual wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Value(pub String);

impl Value {
    pub fn new(v: impl Into<String>) -> Self {
        Self(v.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CimXml for Value {
    fn to_xml(&self) -> Element {
        Element::new("VALUE").with_text(self.0.as_str())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE")?;
        Ok(Self(el.text.clone()))
    }
}

/// One slot of a `VALUE.ARRAY`. `Null` is a value, not an absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ArrayEntry {
    Value(String),
    Null,
}

/// `VALUE.ARRAY`: `(VALUE | VALUE.NULL)*` in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueArray {
    pub entries: Vec<ArrayEntry>,
}

impl ValueArray {
    pub fn from_strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: items
                .into_iter()
                .map(|s| ArrayEntry::Value(s.into()))
                .collect(),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(|e| match e {
            ArrayEntry::Value(v) => Some(v.as_str()),
            ArrayEntry::Null => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CimXml for ValueArray {
    fn to_xml(&self) -> Element {
        Element::new("VALUE.ARRAY").with_children(self.entries.iter().map(|e| match e {
            ArrayEntry::Value(v) => Element::new("VALUE").with_text(v.as_str()),
            ArrayEntry::Null => Element::new("VALUE.NULL"),
        }))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE.ARRAY")?;
        let entries = el
            .children
            .iter()
            .filter_map(|c| match c.name.as_str() {
                "VALUE" => Some(ArrayEntry::Value(c.text.clone())),
                "VALUE.NULL" => Some(ArrayEntry::Null),
                _ => None,
            })
            .collect();
        Ok(Self { entries })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RefArrayEntry {
    Reference(ValueReference),
    Null,
}

/// `VALUE.REFARRAY`: `(VALUE.REFERENCE | VALUE.NULL)*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueRefArray {
    pub entries: Vec<RefArrayEntry>,
}

impl CimXml for ValueRefArray {
    fn to_xml(&self) -> Element {
        Element::new("VALUE.REFARRAY").with_children(self.entries.iter().map(|e| match e {
            RefArrayEntry::Reference(r) => r.to_xml(),
            RefArrayEntry::Null => Element::new("VALUE.NULL"),
        }))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE.REFARRAY")?;
        let mut entries = Vec::new();
        for c in &el.children {
            match c.name.as_str() {
                "VALUE.REFERENCE" => {
                    entries.push(RefArrayEntry::Reference(ValueReference::from_xml(c)?))
                }
                "VALUE.NULL" => entries.push(RefArrayEntry::Null),
                _ => {}
            }
        }
        Ok(Self { entries })
    }
}

/// `VALUE.OBJECT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueObject {
    Class(Class),
    Instance(Instance),
}

impl CimXml for ValueObject {
    fn to_xml(&self) -> Element {
        let inner = match self {
            ValueObject::Class(c) => c.to_xml(),
            ValueObject::Instance(i) => i.to_xml(),
        };
        Element::new("VALUE.OBJECT").with_child(inner)
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE.OBJECT")?;
        let c = el.required_choice(&["CLASS", "INSTANCE"])?;
        if c.name == "CLASS" {
            Ok(ValueObject::Class(Class::from_xml(c)?))
        } else {
            Ok(ValueObject::Instance(Instance::from_xml(c)?))
        }
    }
}

/// `VALUE.NAMEDINSTANCE`: an instance with its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueNamedInstance {
    pub instance_name: InstanceName,
    pub instance: Instance,
}

impl CimXml for ValueNamedInstance {
    fn to_xml(&self) -> Element {
        Element::new("VALUE.NAMEDINSTANCE")
            .with_child(self.instance_name.to_xml())
            .with_child(self.instance.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE.NAMEDINSTANCE")?;
        Ok(Self {
            instance_name: InstanceName::from_xml(el.required_child("INSTANCENAME")?)?,
            instance: Instance::from_xml(el.required_child("INSTANCE")?)?,
        })
    }
}

/// `VALUE.NAMEDOBJECT`: a class, or a named instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueNamedObject {
    Class(Class),
    Instance(ValueNamedInstance),
}

impl CimXml for ValueNamedObject {
    fn to_xml(&self) -> Element {
        let el = Element::new("VALUE.NAMEDOBJECT");
        match self {
            ValueNamedObject::Class(c) => el.with_child(c.to_xml()),
            ValueNamedObject::Instance(ni) => el
                .with_child(ni.instance_name.to_xml())
                .with_child(ni.instance.to_xml()),
        }
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE.NAMEDOBJECT")?;
        let c = el.required_choice(&["CLASS", "INSTANCENAME"])?;
        if c.name == "CLASS" {
            return Ok(ValueNamedObject::Class(Class::from_xml(c)?));
        }
        Ok(ValueNamedObject::Instance(ValueNamedInstance {
            instance_name: InstanceName::from_xml(c)?,
            instance: Instance::from_xml(el.required_child("INSTANCE")?)?,
        }))
    }
}

/// `VALUE.OBJECTWITHPATH`: a class or instance with its full path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueObjectWithPath {
    Class { path: ClassPath, class: Class },
    Instance { path: InstancePath, instance: Instance },
}

impl CimXml for ValueObjectWithPath {
    fn to_xml(&self) -> Element {
        let el = Element::new("VALUE.OBJECTWITHPATH");
        match self {
            ValueObjectWithPath::Class { path, class } => {
                el.with_child(path.to_xml()).with_child(class.to_xml())
            }
            ValueObjectWithPath::Instance { path, instance } => {
                el.with_child(path.to_xml()).with_child(instance.to_xml())
            }
        }
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE.OBJECTWITHPATH")?;
        let c = el.required_choice(&["CLASSPATH", "INSTANCEPATH"])?;
        if c.name == "CLASSPATH" {
            Ok(ValueObjectWithPath::Class {
                path: ClassPath::from_xml(c)?,
                class: Class::from_xml(el.required_child("CLASS")?)?,
            })
        } else {
            Ok(ValueObjectWithPath::Instance {
                path: InstancePath::from_xml(c)?,
                instance: Instance::from_xml(el.required_child("INSTANCE")?)?,
            })
        }
    }
}

/// `VALUE.OBJECTWITHLOCALPATH`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueObjectWithLocalPath {
    Class { path: LocalClassPath, class: Class },
    Instance { path: LocalInstancePath, instance: Instance },
}

impl CimXml for ValueObjectWithLocalPath {
    fn to_xml(&self) -> Element {
        let el = Element::new("VALUE.OBJECTWITHLOCALPATH");
        match self {
            ValueObjectWithLocalPath::Class { path, class } => {
                el.with_child(path.to_xml()).with_child(class.to_xml())
            }
            ValueObjectWithLocalPath::Instance { path, instance } => {
                el.with_child(path.to_xml()).with_child(instance.to_xml())
            }
        }
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE.OBJECTWITHLOCALPATH")?;
        let c = el.required_choice(&["LOCALCLASSPATH", "LOCALINSTANCEPATH"])?;
        if c.name == "LOCALCLASSPATH" {
            Ok(ValueObjectWithLocalPath::Class {
                path: LocalClassPath::from_xml(c)?,
                class: Class::from_xml(el.required_child("CLASS")?)?,
            })
        } else {
            Ok(ValueObjectWithLocalPath::Instance {
                path: LocalInstancePath::from_xml(c)?,
                instance: Instance::from_xml(el.required_child("INSTANCE")?)?,
            })
        }
    }
}

/// `VALUE.INSTANCEWITHPATH`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueInstanceWithPath {
    pub path: InstancePath,
    pub instance: Instance,
}

impl CimXml for ValueInstanceWithPath {
    fn to_xml(&self) -> Element {
        Element::new("VALUE.INSTANCEWITHPATH")
            .with_child(self.path.to_xml())
            .with_child(self.instance.to_xml())
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("VALUE.INSTANCEWITHPATH")?;
        Ok(Self {
            path: InstancePath::from_xml(el.required_child("INSTANCEPATH")?)?,
            instance: Instance::from_xml(el.required_child("INSTANCE")?)?,
        })
    }
}
