/// Navigable markup tree.
///
/// The builders never look at raw XML: they walk an [`XmlElement`] tree, which
/// can be loaded from bytes with [`XmlElement::parse`] or assembled directly by
/// a caller that already owns a parsed part.
use super::attributes::{Attributes, local_name};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A node inside an element: either a child element or character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its qualified tag name, attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Attributes,
    nodes: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            nodes: Vec::new(),
        }
    }

    /// Add an attribute (builder style).
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Append a child element (builder style).
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.nodes.push(XmlNode::Element(child));
        self
    }

    /// Append character data (builder style).
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.push_text(text.as_ref());
        self
    }

    /// Qualified tag name, e.g. `w:body`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag name without namespace prefix, e.g. `body`.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Attribute value by local name.
    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// All child nodes, text included, in document order.
    #[inline]
    pub fn nodes(&self) -> &[XmlNode] {
        &self.nodes
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.nodes.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// Child elements with the given local name.
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlElement> {
        self.children().filter(move |el| el.local_name() == name)
    }

    /// First child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children().find(|el| el.local_name() == name)
    }

    /// First element with the given local name in document order, starting
    /// with `self` itself.
    pub fn find_first(&self, name: &str) -> Option<&XmlElement> {
        let mut pending = vec![self];
        while let Some(el) = pending.pop() {
            if el.local_name() == name {
                return Some(el);
            }
            // Reverse so the leftmost child is popped first.
            pending.extend(el.children().collect::<Vec<_>>().into_iter().rev());
        }
        None
    }

    /// Concatenated character data of the direct text children.
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.nodes.last_mut() {
            Some(XmlNode::Text(prev)) => prev.push_str(text),
            _ => self.nodes.push(XmlNode::Text(text.to_string())),
        }
    }

    /// Parse XML bytes into an element tree rooted at the document element.
    ///
    /// Whitespace is preserved, since `w:t` content may consist of spaces
    /// only. Namespace declarations are not kept as attributes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::common::xml::XmlElement;
    ///
    /// let root = XmlElement::parse(br#"<w:document xmlns:w="ns"><w:body/></w:document>"#)?;
    /// assert_eq!(root.local_name(), "document");
    /// assert!(root.child("body").is_some());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    stack.push(Self::from_start(&e, &reader)?);
                },
                Ok(Event::Empty(e)) => {
                    let el = Self::from_start(&e, &reader)?;
                    attach(&mut stack, &mut root, el)?;
                },
                Ok(Event::End(e)) => {
                    let el = stack.pop().ok_or_else(|| {
                        OoxmlError::InvalidFormat(format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        ))
                    })?;
                    attach(&mut stack, &mut root, el)?;
                },
                Ok(Event::Text(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(&String::from_utf8_lossy(e.as_ref()));
                    }
                },
                Ok(Event::CData(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(&String::from_utf8_lossy(&e.into_inner()));
                    }
                },
                Ok(Event::GeneralRef(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        match resolve_reference(&e) {
                            Some(ch) => parent.push_text(ch.encode_utf8(&mut [0u8; 4])),
                            None => log::debug!(
                                "Skipping unknown entity &{};",
                                String::from_utf8_lossy(&e)
                            ),
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OoxmlError::Xml(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(OoxmlError::InvalidFormat(format!(
                "unclosed element <{}>",
                open.name
            )));
        }
        root.ok_or_else(|| OoxmlError::InvalidFormat("no root element".to_string()))
    }

    fn from_start(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Self> {
        let mut el = Self::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
        for attr in e.attributes() {
            let attr = attr?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let value = attr.decode_and_unescape_value(reader.decoder())?;
            el.attributes
                .insert(&String::from_utf8_lossy(key), value.into_owned());
        }
        Ok(el)
    }
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, el: XmlElement) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.nodes.push(XmlNode::Element(el)),
        None if root.is_none() => *root = Some(el),
        None => {
            return Err(OoxmlError::InvalidFormat(format!(
                "second root element <{}>",
                el.name
            )));
        },
    }
    Ok(())
}

/// Resolve a predefined entity or character reference (without `&` and `;`).
fn resolve_reference(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        [b'#', b'x' | b'X', hex @ ..] => std::str::from_utf8(hex)
            .ok()
            .and_then(|s| u32::from_str_radix(s, 16).ok())
            .and_then(char::from_u32),
        [b'#', dec @ ..] => std::str::from_utf8(dec)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .and_then(char::from_u32),
        _ => None,
    }
}
