//! Schema objects: qualifiers, properties, methods, classes and instances.

use serde::Serialize;

use super::naming::ValueReference;
use super::value::{Value, ValueArray};
use super::{decode_children, CimXml};
use crate::error::Result;
use crate::xml::{bool_str, parse_bool, Element};

/// Qualifier flavor attributes. `None` means "not stated" and falls back to
/// the DTD default on the server side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Flavor {
    pub overridable: Option<bool>,
    pub to_subclass: Option<bool>,
    pub to_instance: Option<bool>,
    pub translatable: Option<bool>,
}

impl Flavor {
    fn write(&self, el: Element) -> Element {
        el.with_bool_attr("OVERRIDABLE", self.overridable)
            .with_bool_attr("TOSUBCLASS", self.to_subclass)
            .with_bool_attr("TOINSTANCE", self.to_instance)
            .with_bool_attr("TRANSLATABLE", self.translatable)
    }

    fn read(el: &Element) -> Result<Self> {
        Ok(Self {
            overridable: el.bool_attr("OVERRIDABLE")?,
            to_subclass: el.bool_attr("TOSUBCLASS")?,
            to_instance: el.bool_attr("TOINSTANCE")?,
            translatable: el.bool_attr("TRANSLATABLE")?,
        })
    }
}

/// `(VALUE | VALUE.ARRAY)` payload of qualifiers and qualifier declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QualifierValue {
    Scalar(Value),
    Array(ValueArray),
}

impl QualifierValue {
    fn to_xml(&self) -> Element {
        match self {
            QualifierValue::Scalar(v) => v.to_xml(),
            QualifierValue::Array(a) => a.to_xml(),
        }
    }

    fn decode(parent: &Element) -> Result<Option<Self>> {
        match parent.choice(&["VALUE", "VALUE.ARRAY"])? {
            None => Ok(None),
            Some(c) if c.name == "VALUE" => Ok(Some(QualifierValue::Scalar(Value::from_xml(c)?))),
            Some(c) => Ok(Some(QualifierValue::Array(ValueArray::from_xml(c)?))),
        }
    }
}

/// `QUALIFIER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Qualifier {
    pub name: String,
    pub cim_type: String,
    pub propagated: Option<bool>,
    pub flavor: Flavor,
    pub value: Option<QualifierValue>,
}

impl CimXml for Qualifier {
    fn to_xml(&self) -> Element {
        let el = Element::new("QUALIFIER")
            .with_attr("NAME", self.name.as_str())
            .with_attr("TYPE", self.cim_type.as_str())
            .with_bool_attr("PROPAGATED", self.propagated);
        self.flavor
            .write(el)
            .with_opt_child(self.value.as_ref().map(QualifierValue::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("QUALIFIER")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            cim_type: el.attr("TYPE").unwrap_or_default().to_string(),
            propagated: el.bool_attr("PROPAGATED")?,
            flavor: Flavor::read(el)?,
            value: QualifierValue::decode(el)?,
        })
    }
}

/// `SCOPE`: which element kinds a qualifier may annotate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub class: bool,
    pub association: bool,
    pub reference: bool,
    pub property: bool,
    pub method: bool,
    pub parameter: bool,
    pub indication: bool,
}

impl Scope {
    fn flags(&self) -> [(&'static str, bool); 7] {
        [
            ("CLASS", self.class),
            ("ASSOCIATION", self.association),
            ("REFERENCE", self.reference),
            ("PROPERTY", self.property),
            ("METHOD", self.method),
            ("PARAMETER", self.parameter),
            ("INDICATION", self.indication),
        ]
    }
}

impl CimXml for Scope {
    fn to_xml(&self) -> Element {
        self.flags()
            .into_iter()
            .filter(|(_, on)| *on)
            .fold(Element::new("SCOPE"), |el, (k, _)| {
                el.with_attr(k, bool_str(true))
            })
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("SCOPE")?;
        let on = |k: &str| el.attr(k).and_then(parse_bool).unwrap_or(false);
        Ok(Self {
            class: on("CLASS"),
            association: on("ASSOCIATION"),
            reference: on("REFERENCE"),
            property: on("PROPERTY"),
            method: on("METHOD"),
            parameter: on("PARAMETER"),
            indication: on("INDICATION"),
        })
    }
}

/// `QUALIFIER.DECLARATION`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualifierDeclaration {
    pub name: String,
    pub cim_type: String,
    pub is_array: Option<bool>,
    pub array_size: Option<u32>,
    pub flavor: Flavor,
    pub scope: Option<Scope>,
    pub value: Option<QualifierValue>,
}

impl CimXml for QualifierDeclaration {
    fn to_xml(&self) -> Element {
        let el = Element::new("QUALIFIER.DECLARATION")
            .with_attr("NAME", self.name.as_str())
            .with_attr("TYPE", self.cim_type.as_str())
            .with_bool_attr("ISARRAY", self.is_array)
            .with_opt_attr("ARRAYSIZE", self.array_size.map(|n| n.to_string()).as_deref());
        self.flavor
            .write(el)
            .with_opt_child(self.scope.as_ref().map(Scope::to_xml))
            .with_opt_child(self.value.as_ref().map(QualifierValue::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("QUALIFIER.DECLARATION")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            cim_type: el.attr("TYPE").unwrap_or_default().to_string(),
            is_array: el.bool_attr("ISARRAY")?,
            array_size: el.u32_attr("ARRAYSIZE")?,
            flavor: Flavor::read(el)?,
            scope: el.child("SCOPE").map(Scope::from_xml).transpose()?,
            value: QualifierValue::decode(el)?,
        })
    }
}

/// `PROPERTY`: scalar-valued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub cim_type: String,
    pub class_origin: Option<String>,
    pub propagated: Option<bool>,
    pub embedded_object: Option<String>,
    pub qualifiers: Vec<Qualifier>,
    pub value: Option<Value>,
}

impl Property {
    pub fn new(name: impl Into<String>, cim_type: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            cim_type: cim_type.into(),
            value: value.map(Value),
            ..Self::default()
        }
    }
}

impl CimXml for Property {
    fn to_xml(&self) -> Element {
        Element::new("PROPERTY")
            .with_attr("NAME", self.name.as_str())
            .with_attr("TYPE", self.cim_type.as_str())
            .with_opt_attr("CLASSORIGIN", self.class_origin.as_deref())
            .with_bool_attr("PROPAGATED", self.propagated)
            .with_opt_attr("EmbeddedObject", self.embedded_object.as_deref())
            .with_children(self.qualifiers.iter().map(CimXml::to_xml))
            .with_opt_child(self.value.as_ref().map(Value::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("PROPERTY")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            cim_type: el.attr("TYPE").unwrap_or_default().to_string(),
            class_origin: el.attr("CLASSORIGIN").map(str::to_string),
            propagated: el.bool_attr("PROPAGATED")?,
            embedded_object: el.attr("EmbeddedObject").map(str::to_string),
            qualifiers: decode_children(el, "QUALIFIER")?,
            value: el.child("VALUE").map(Value::from_xml).transpose()?,
        })
    }
}

/// `PROPERTY.ARRAY`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyArray {
    pub name: String,
    pub cim_type: String,
    pub array_size: Option<u32>,
    pub class_origin: Option<String>,
    pub propagated: Option<bool>,
    pub embedded_object: Option<String>,
    pub qualifiers: Vec<Qualifier>,
    pub value: Option<ValueArray>,
}

impl CimXml for PropertyArray {
    fn to_xml(&self) -> Element {
        Element::new("PROPERTY.ARRAY")
            .with_attr("NAME", self.name.as_str())
            .with_attr("TYPE", self.cim_type.as_str())
            .with_opt_attr("ARRAYSIZE", self.array_size.map(|n| n.to_string()).as_deref())
            .with_opt_attr("CLASSORIGIN", self.class_origin.as_deref())
            .with_bool_attr("PROPAGATED", self.propagated)
            .with_opt_attr("EmbeddedObject", self.embedded_object.as_deref())
            .with_children(self.qualifiers.iter().map(CimXml::to_xml))
            .with_opt_child(self.value.as_ref().map(ValueArray::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("PROPERTY.ARRAY")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            cim_type: el.attr("TYPE").unwrap_or_default().to_string(),
            array_size: el.u32_attr("ARRAYSIZE")?,
            class_origin: el.attr("CLASSORIGIN").map(str::to_string),
            propagated: el.bool_attr("PROPAGATED")?,
            embedded_object: el.attr("EmbeddedObject").map(str::to_string),
            qualifiers: decode_children(el, "QUALIFIER")?,
            value: el.child("VALUE.ARRAY").map(ValueArray::from_xml).transpose()?,
        })
    }
}

/// `PROPERTY.REFERENCE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyReference {
    pub name: String,
    pub reference_class: Option<String>,
    pub class_origin: Option<String>,
    pub propagated: Option<bool>,
    pub qualifiers: Vec<Qualifier>,
    pub value: Option<ValueReference>,
}

impl CimXml for PropertyReference {
    fn to_xml(&self) -> Element {
        Element::new("PROPERTY.REFERENCE")
            .with_attr("NAME", self.name.as_str())
            .with_opt_attr("REFERENCECLASS", self.reference_class.as_deref())
            .with_opt_attr("CLASSORIGIN", self.class_origin.as_deref())
            .with_bool_attr("PROPAGATED", self.propagated)
            .with_children(self.qualifiers.iter().map(CimXml::to_xml))
            .with_opt_child(self.value.as_ref().map(ValueReference::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("PROPERTY.REFERENCE")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            reference_class: el.attr("REFERENCECLASS").map(str::to_string),
            class_origin: el.attr("CLASSORIGIN").map(str::to_string),
            propagated: el.bool_attr("PROPAGATED")?,
            qualifiers: decode_children(el, "QUALIFIER")?,
            value: el
                .child("VALUE.REFERENCE")
                .map(ValueReference::from_xml)
                .transpose()?,
        })
    }
}

/// Any of the three property shapes, kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CimProperty {
    Scalar(Property),
    Array(PropertyArray),
    Reference(PropertyReference),
}

impl CimProperty {
    pub fn name(&self) -> &str {
        match self {
            CimProperty::Scalar(p) => &p.name,
            CimProperty::Array(p) => &p.name,
            CimProperty::Reference(p) => &p.name,
        }
    }

    /// Scalar value text, if this is a scalar property with a value.
    pub fn scalar_value(&self) -> Option<&str> {
        match self {
            CimProperty::Scalar(p) => p.value.as_ref().map(Value::as_str),
            _ => None,
        }
    }

    fn to_xml(&self) -> Element {
        match self {
            CimProperty::Scalar(p) => p.to_xml(),
            CimProperty::Array(p) => p.to_xml(),
            CimProperty::Reference(p) => p.to_xml(),
        }
    }
}

fn decode_properties(el: &Element) -> Result<Vec<CimProperty>> {
    let mut out = Vec::new();
    for c in &el.children {
        match c.name.as_str() {
            "PROPERTY" => out.push(CimProperty::Scalar(Property::from_xml(c)?)),
            "PROPERTY.ARRAY" => out.push(CimProperty::Array(PropertyArray::from_xml(c)?)),
            "PROPERTY.REFERENCE" => {
                out.push(CimProperty::Reference(PropertyReference::from_xml(c)?))
            }
            _ => {}
        }
    }
    Ok(out)
}

/// `PARAMETER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub cim_type: String,
    pub qualifiers: Vec<Qualifier>,
}

/// `PARAMETER.REFERENCE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterReference {
    pub name: String,
    pub reference_class: Option<String>,
    pub qualifiers: Vec<Qualifier>,
}

/// `PARAMETER.ARRAY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterArray {
    pub name: String,
    pub cim_type: String,
    pub array_size: Option<u32>,
    pub qualifiers: Vec<Qualifier>,
}

/// `PARAMETER.REFARRAY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterRefArray {
    pub name: String,
    pub reference_class: Option<String>,
    pub array_size: Option<u32>,
    pub qualifiers: Vec<Qualifier>,
}

/// One declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MethodParameter {
    Scalar(Parameter),
    Reference(ParameterReference),
    Array(ParameterArray),
    RefArray(ParameterRefArray),
}

impl MethodParameter {
    pub fn name(&self) -> &str {
        match self {
            MethodParameter::Scalar(p) => &p.name,
            MethodParameter::Reference(p) => &p.name,
            MethodParameter::Array(p) => &p.name,
            MethodParameter::RefArray(p) => &p.name,
        }
    }

    fn to_xml(&self) -> Element {
        let size = |n: Option<u32>| n.map(|n| n.to_string());
        match self {
            MethodParameter::Scalar(p) => Element::new("PARAMETER")
                .with_attr("NAME", p.name.as_str())
                .with_attr("TYPE", p.cim_type.as_str())
                .with_children(p.qualifiers.iter().map(CimXml::to_xml)),
            MethodParameter::Reference(p) => Element::new("PARAMETER.REFERENCE")
                .with_attr("NAME", p.name.as_str())
                .with_opt_attr("REFERENCECLASS", p.reference_class.as_deref())
                .with_children(p.qualifiers.iter().map(CimXml::to_xml)),
            MethodParameter::Array(p) => Element::new("PARAMETER.ARRAY")
                .with_attr("NAME", p.name.as_str())
                .with_attr("TYPE", p.cim_type.as_str())
                .with_opt_attr("ARRAYSIZE", size(p.array_size).as_deref())
                .with_children(p.qualifiers.iter().map(CimXml::to_xml)),
            MethodParameter::RefArray(p) => Element::new("PARAMETER.REFARRAY")
                .with_attr("NAME", p.name.as_str())
                .with_opt_attr("REFERENCECLASS", p.reference_class.as_deref())
                .with_opt_attr("ARRAYSIZE", size(p.array_size).as_deref())
                .with_children(p.qualifiers.iter().map(CimXml::to_xml)),
        }
    }

    fn decode(el: &Element) -> Result<Option<Self>> {
        let name = || el.required_attr("NAME").map(str::to_string);
        let cim_type = || el.attr("TYPE").unwrap_or_default().to_string();
        let reference_class = || el.attr("REFERENCECLASS").map(str::to_string);
        Ok(Some(match el.name.as_str() {
            "PARAMETER" => MethodParameter::Scalar(Parameter {
                name: name()?,
                cim_type: cim_type(),
                qualifiers: decode_children(el, "QUALIFIER")?,
            }),
            "PARAMETER.REFERENCE" => MethodParameter::Reference(ParameterReference {
                name: name()?,
                reference_class: reference_class(),
                qualifiers: decode_children(el, "QUALIFIER")?,
            }),
            "PARAMETER.ARRAY" => MethodParameter::Array(ParameterArray {
                name: name()?,
                cim_type: cim_type(),
                array_size: el.u32_attr("ARRAYSIZE")?,
                qualifiers: decode_children(el, "QUALIFIER")?,
            }),
            "PARAMETER.REFARRAY" => MethodParameter::RefArray(ParameterRefArray {
                name: name()?,
                reference_class: reference_class(),
                array_size: el.u32_attr("ARRAYSIZE")?,
                qualifiers: decode_children(el, "QUALIFIER")?,
            }),
            _ => return Ok(None),
        }))
    }
}

/// `METHOD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub cim_type: Option<String>,
    pub class_origin: Option<String>,
    pub propagated: Option<bool>,
    pub qualifiers: Vec<Qualifier>,
    pub parameters: Vec<MethodParameter>,
}

impl CimXml for Method {
    fn to_xml(&self) -> Element {
        Element::new("METHOD")
            .with_attr("NAME", self.name.as_str())
            .with_opt_attr("TYPE", self.cim_type.as_deref())
            .with_opt_attr("CLASSORIGIN", self.class_origin.as_deref())
            .with_bool_attr("PROPAGATED", self.propagated)
            .with_children(self.qualifiers.iter().map(CimXml::to_xml))
            .with_children(self.parameters.iter().map(MethodParameter::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("METHOD")?;
        let mut parameters = Vec::new();
        for c in &el.children {
            if let Some(p) = MethodParameter::decode(c)? {
                parameters.push(p);
            }
        }
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            cim_type: el.attr("TYPE").map(str::to_string),
            class_origin: el.attr("CLASSORIGIN").map(str::to_string),
            propagated: el.bool_attr("PROPAGATED")?,
            qualifiers: decode_children(el, "QUALIFIER")?,
            parameters,
        })
    }
}

/// `CLASS`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Class {
    pub name: String,
    pub superclass: Option<String>,
    pub qualifiers: Vec<Qualifier>,
    pub properties: Vec<CimProperty>,
    pub methods: Vec<Method>,
}

impl Class {
    pub fn qualifier(&self, name: &str) -> Option<&Qualifier> {
        self.qualifiers
            .iter()
            .find(|q| q.name.eq_ignore_ascii_case(name))
    }

    pub fn property(&self, name: &str) -> Option<&CimProperty> {
        self.properties
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

impl CimXml for Class {
    fn to_xml(&self) -> Element {
        Element::new("CLASS")
            .with_attr("NAME", self.name.as_str())
            .with_opt_attr("SUPERCLASS", self.superclass.as_deref())
            .with_children(self.qualifiers.iter().map(CimXml::to_xml))
            .with_children(self.properties.iter().map(CimProperty::to_xml))
            .with_children(self.methods.iter().map(CimXml::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("CLASS")?;
        Ok(Self {
            name: el.required_attr("NAME")?.to_string(),
            superclass: el.attr("SUPERCLASS").map(str::to_string),
            qualifiers: decode_children(el, "QUALIFIER")?,
            properties: decode_properties(el)?,
            methods: decode_children(el, "METHOD")?,
        })
    }
}

/// `INSTANCE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Instance {
    pub class_name: String,
    pub qualifiers: Vec<Qualifier>,
    pub properties: Vec<CimProperty>,
}

impl Instance {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Append a `string` property with a value.
    pub fn with_string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(CimProperty::Scalar(Property::new(
            name,
            "string",
            Some(value.into()),
        )));
        self
    }

    pub fn with_property(mut self, property: CimProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn property(&self, name: &str) -> Option<&CimProperty> {
        self.properties
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Scalar value text of the named property.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.property(name).and_then(CimProperty::scalar_value)
    }
}

impl CimXml for Instance {
    fn to_xml(&self) -> Element {
        Element::new("INSTANCE")
            .with_attr("CLASSNAME", self.class_name.as_str())
            .with_children(self.qualifiers.iter().map(CimXml::to_xml))
            .with_children(self.properties.iter().map(CimProperty::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("INSTANCE")?;
        Ok(Self {
            class_name: el.required_attr("CLASSNAME")?.to_string(),
            qualifiers: decode_children(el, "QUALIFIER")?,
            properties: decode_properties(el)?,
        })
    }
}
