//! Generic XML element tree built on the quick-xml event reader.
//!
//! POM documents are read into a small tree of named elements with ordered
//! children. Attributes and namespace prefixes are dropped; element text is
//! the trimmed concatenation of the element's own text, CDATA and entity
//! references.

use crate::error::{CoordsError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesRef, Event};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name, without namespace prefix.
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first direct child named `name`.
    ///
    /// Returns `None` when the child is absent or its text is empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }
}

/// Parses `content` and returns its root element.
pub fn parse_document(content: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(content);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| CoordsError::parse(format!("at byte {}: {e}", reader.error_position())))?;

        match event {
            Event::Start(ref e) => {
                stack.push(XmlElement::new(local_name(e.local_name().as_ref())));
            }
            Event::Empty(ref e) => {
                let element = XmlElement::new(local_name(e.local_name().as_ref()));
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(ref e) => {
                let mut element = stack.pop().ok_or_else(|| {
                    CoordsError::parse(format!(
                        "unexpected closing tag </{}>",
                        local_name(e.local_name().as_ref())
                    ))
                })?;
                element.text = element.text.trim().to_string();
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(ref e) => {
                let text = match e.decode() {
                    Ok(cow) => quick_xml::escape::unescape(&cow)
                        .map(|c| c.into_owned())
                        .unwrap_or_else(|_| cow.into_owned()),
                    Err(_) => String::from_utf8_lossy(e.as_ref()).into_owned(),
                };
                match stack.last_mut() {
                    Some(top) => top.text.push_str(&text),
                    None if is_blank(&text) => {}
                    None => {
                        return Err(CoordsError::parse(format!(
                            "text outside the root element: {:?}",
                            text.trim()
                        )));
                    }
                }
            }
            Event::CData(ref e) => {
                let top = stack
                    .last_mut()
                    .ok_or_else(|| CoordsError::parse("CDATA outside the root element"))?;
                top.text.push_str(&String::from_utf8_lossy(e));
            }
            Event::GeneralRef(ref e) => {
                let top = stack.last_mut().ok_or_else(|| {
                    CoordsError::parse("entity reference outside the root element")
                })?;
                top.text.push_str(&resolve_reference(e)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(CoordsError::parse(format!(
            "unexpected end of document: <{}> is not closed",
            open.name
        )));
    }

    root.ok_or_else(|| CoordsError::parse("document has no root element"))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(CoordsError::parse(format!(
            "multiple root elements: unexpected <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| CoordsError::parse(e.to_string()))?
    {
        return Ok(ch.to_string());
    }

    let name = reference
        .decode()
        .map_err(|e| CoordsError::parse(e.to_string()))?;
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| CoordsError::parse(format!("unknown entity &{name};")))
}

/// Whitespace, plus a byte order mark left in front of the prolog.
fn is_blank(text: &str) -> bool {
    text.trim_start_matches('\u{feff}').trim().is_empty()
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
