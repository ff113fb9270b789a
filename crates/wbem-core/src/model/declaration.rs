//! `DECLARATION` documents: groups of schema objects as exchanged in MOF
//! compiler style bulk loads.

use serde::Serialize;

use super::naming::{LocalNamespacePath, NamespacePath};
use super::object::QualifierDeclaration;
use super::value::{ValueNamedObject, ValueObject, ValueObjectWithLocalPath, ValueObjectWithPath};
use super::{decode_children, CimXml};
use crate::error::Result;
use crate::xml::Element;

/// Optional namespace heading a declaration group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DeclNamespace {
    Local(LocalNamespacePath),
    Remote(NamespacePath),
}

impl DeclNamespace {
    fn to_xml(&self) -> Element {
        match self {
            DeclNamespace::Local(ns) => ns.to_xml(),
            DeclNamespace::Remote(ns) => ns.to_xml(),
        }
    }

    fn decode(parent: &Element) -> Result<Option<Self>> {
        match parent.choice(&["LOCALNAMESPACEPATH", "NAMESPACEPATH"])? {
            None => Ok(None),
            Some(c) if c.name == "LOCALNAMESPACEPATH" => {
                Ok(Some(DeclNamespace::Local(LocalNamespacePath::from_xml(c)?)))
            }
            Some(c) => Ok(Some(DeclNamespace::Remote(NamespacePath::from_xml(c)?))),
        }
    }
}

/// `DECLGROUP`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeclGroup {
    pub namespace: Option<DeclNamespace>,
    pub qualifier_declarations: Vec<QualifierDeclaration>,
    pub objects: Vec<ValueObject>,
}

impl CimXml for DeclGroup {
    fn to_xml(&self) -> Element {
        Element::new("DECLGROUP")
            .with_opt_child(self.namespace.as_ref().map(DeclNamespace::to_xml))
            .with_children(self.qualifier_declarations.iter().map(CimXml::to_xml))
            .with_children(self.objects.iter().map(CimXml::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("DECLGROUP")?;
        Ok(Self {
            namespace: DeclNamespace::decode(el)?,
            qualifier_declarations: decode_children(el, "QUALIFIER.DECLARATION")?,
            objects: decode_children(el, "VALUE.OBJECT")?,
        })
    }
}

/// `DECLGROUP.WITHNAME`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeclGroupWithName {
    pub namespace: Option<DeclNamespace>,
    pub qualifier_declarations: Vec<QualifierDeclaration>,
    pub objects: Vec<ValueNamedObject>,
}

impl CimXml for DeclGroupWithName {
    fn to_xml(&self) -> Element {
        Element::new("DECLGROUP.WITHNAME")
            .with_opt_child(self.namespace.as_ref().map(DeclNamespace::to_xml))
            .with_children(self.qualifier_declarations.iter().map(CimXml::to_xml))
            .with_children(self.objects.iter().map(CimXml::to_xml))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("DECLGROUP.WITHNAME")?;
        Ok(Self {
            namespace: DeclNamespace::decode(el)?,
            qualifier_declarations: decode_children(el, "QUALIFIER.DECLARATION")?,
            objects: decode_children(el, "VALUE.NAMEDOBJECT")?,
        })
    }
}

/// Member of a `DECLGROUP.WITHPATH`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PathedObject {
    Remote(ValueObjectWithPath),
    Local(ValueObjectWithLocalPath),
}

/// `DECLGROUP.WITHPATH`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeclGroupWithPath {
    pub objects: Vec<PathedObject>,
}

impl CimXml for DeclGroupWithPath {
    fn to_xml(&self) -> Element {
        Element::new("DECLGROUP.WITHPATH").with_children(self.objects.iter().map(|o| match o {
            PathedObject::Remote(v) => v.to_xml(),
            PathedObject::Local(v) => v.to_xml(),
        }))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("DECLGROUP.WITHPATH")?;
        let mut objects = Vec::new();
        for c in &el.children {
            match c.name.as_str() {
                "VALUE.OBJECTWITHPATH" => {
                    objects.push(PathedObject::Remote(ValueObjectWithPath::from_xml(c)?))
                }
                "VALUE.OBJECTWITHLOCALPATH" => {
                    objects.push(PathedObject::Local(ValueObjectWithLocalPath::from_xml(c)?))
                }
                _ => {}
            }
        }
        Ok(Self { objects })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeclGroupKind {
    Plain(DeclGroup),
    WithName(DeclGroupWithName),
    WithPath(DeclGroupWithPath),
}

/// `DECLARATION`: one or more groups, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Declaration {
    pub groups: Vec<DeclGroupKind>,
}

impl CimXml for Declaration {
    fn to_xml(&self) -> Element {
        Element::new("DECLARATION").with_children(self.groups.iter().map(|g| match g {
            DeclGroupKind::Plain(g) => g.to_xml(),
            DeclGroupKind::WithName(g) => g.to_xml(),
            DeclGroupKind::WithPath(g) => g.to_xml(),
        }))
    }

    fn from_xml(el: &Element) -> Result<Self> {
        el.expect_name("DECLARATION")?;
        let mut groups = Vec::new();
        for c in &el.children {
            match c.name.as_str() {
                "DECLGROUP" => groups.push(DeclGroupKind::Plain(DeclGroup::from_xml(c)?)),
                "DECLGROUP.WITHNAME" => {
                    groups.push(DeclGroupKind::WithName(DeclGroupWithName::from_xml(c)?))
                }
                "DECLGROUP.WITHPATH" => {
                    groups.push(DeclGroupKind::WithPath(DeclGroupWithPath::from_xml(c)?))
                }
                _ => {}
            }
        }
        Ok(Self { groups })
    }
}
