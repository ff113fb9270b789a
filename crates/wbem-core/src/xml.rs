//! Minimal element tree over `quick-xml`.
//!
//! CIM-XML has no mixed content: text only appears in leaf elements
//! (`VALUE`, `HOST`, `KEYVALUE`), so an element is a name, ordered
//! attributes, ordered children, and the concatenated text. The typed model
//! in [`crate::model`] maps to and from this tree; this module only deals
//! with bytes.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Result, WbemError};

/// One XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Absent optional attributes are not emitted.
    pub fn with_opt_attr(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with_attr(key, v),
            None => self,
        }
    }

    pub fn with_bool_attr(self, key: &str, value: Option<bool>) -> Self {
        self.with_opt_attr(key, value.map(bool_str))
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_opt_child(self, child: Option<Element>) -> Self {
        match child {
            Some(c) => self.with_child(c),
            None => self,
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn required_attr(&self, key: &str) -> Result<&str> {
        self.attr(key).ok_or_else(|| {
            WbemError::malformed(format!("{} is missing attribute {key}", self.name))
        })
    }

    pub fn bool_attr(&self, key: &str) -> Result<Option<bool>> {
        self.attr(key)
            .map(|v| {
                parse_bool(v).ok_or_else(|| {
                    WbemError::malformed(format!("{}.{key}: not a boolean: {v:?}", self.name))
                })
            })
            .transpose()
    }

    pub fn u32_attr(&self, key: &str) -> Result<Option<u32>> {
        self.attr(key)
            .map(|v| {
                v.trim().parse::<u32>().map_err(|_| {
                    WbemError::malformed(format!("{}.{key}: not an integer: {v:?}", self.name))
                })
            })
            .transpose()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn required_child(&self, name: &str) -> Result<&Element> {
        self.child(name).ok_or_else(|| {
            WbemError::malformed(format!("{} is missing child {name}", self.name))
        })
    }

    pub fn expect_name(&self, name: &str) -> Result<()> {
        if self.name == name {
            Ok(())
        } else {
            Err(WbemError::malformed(format!(
                "expected element {name}, found {}",
                self.name
            )))
        }
    }

    /// Resolve a grammar choice: returns the first child whose name is one of
    /// `names`, or `None`. Children of more than one alternative kind violate
    /// the choice and are rejected. Unlisted children are ignored.
    pub fn choice(&self, names: &[&str]) -> Result<Option<&Element>> {
        let mut picked: Option<&Element> = None;
        for c in self.children.iter().filter(|c| names.contains(&c.name.as_str())) {
            match picked {
                None => picked = Some(c),
                Some(p) if p.name == c.name => {}
                Some(p) => {
                    return Err(WbemError::malformed(format!(
                        "{}: {} and {} are mutually exclusive",
                        self.name, p.name, c.name
                    )))
                }
            }
        }
        Ok(picked)
    }

    pub fn required_choice(&self, names: &[&str]) -> Result<&Element> {
        self.choice(names)?.ok_or_else(|| {
            WbemError::malformed(format!("{} requires one of {}", self.name, names.join("|")))
        })
    }
}

/// Lowercase `"true"` / `"false"`, as the wire expects.
pub fn bool_str(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

pub fn parse_bool(v: &str) -> Option<bool> {
    let v = v.trim();
    if v.eq_ignore_ascii_case("true") {
        Some(true)
    } else if v.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse a complete document into its root element.
pub fn parse_document(raw: &[u8]) -> Result<Element> {
    let input = std::str::from_utf8(raw)
        .map_err(|e| WbemError::malformed(format!("body is not utf-8: {e}")))?;
    let mut reader = Reader::from_str(input);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(open_element(&e)?),
            Ok(Event::Empty(e)) => {
                let el = open_element(&e)?;
                close_element(&mut stack, &mut root, el)?;
            }
            Ok(Event::End(_)) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| WbemError::malformed("unbalanced end tag"))?;
                close_element(&mut stack, &mut root, el)?;
            }
            Ok(Event::Text(t)) => {
                if let Some(top) = stack.last_mut() {
                    let s = t
                        .unescape()
                        .map_err(|e| WbemError::malformed(format!("bad text: {e}")))?;
                    top.text.push_str(&s);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(WbemError::malformed(format!(
                    "xml error at {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }

    if !stack.is_empty() {
        return Err(WbemError::malformed("unexpected end of document"));
    }
    root.ok_or_else(|| WbemError::malformed("empty document"))
}

fn open_element(e: &BytesStart<'_>) -> Result<Element> {
    let mut el = Element::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes() {
        let attr = attr.map_err(|e| WbemError::malformed(format!("bad attribute: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| WbemError::malformed(format!("bad attribute value: {e}")))?
            .into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}

fn close_element(stack: &mut [Element], root: &mut Option<Element>, mut el: Element) -> Result<()> {
    if !el.children.is_empty() && el.text.trim().is_empty() {
        el.text.clear();
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(el);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(el);
            Ok(())
        }
        None => Err(WbemError::malformed("multiple root elements")),
    }
}

/// Serialize `root` with the XML declaration header.
pub fn write_document(root: &Element) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| WbemError::malformed(format!("write failed: {e}")))?;
    write_element(&mut writer, root)?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element) -> Result<()> {
    let mut start = BytesStart::new(el.name.as_str());
    for (k, v) in &el.attrs {
        start.push_attribute((k.as_str(), v.as_str()));
    }

    let io = |e: quick_xml::Error| WbemError::malformed(format!("write failed: {e}"));

    if el.children.is_empty() && el.text.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(io)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(io)?;
    if !el.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&el.text)))
            .map_err(io)?;
    }
    for child in &el.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(el.name.as_str())))
        .map_err(io)?;
    Ok(())
}
