//! Ordered XML element tree for OpenNebula documents.
//!
//! Templates and pool listings are element-only markup: every attribute is a
//! child element holding either text or further elements. XML attributes are
//! not part of that format and are not kept.

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::domain::error::MarkupError;

/// One element with its text and children, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Leaf element holding `text`.
    #[must_use]
    pub fn leaf(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            text: text.to_string(),
            children: Vec::new(),
        }
    }

    /// First child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first child named `name`.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    /// Parse a document into its root element.
    ///
    /// Text between child elements is layout and is dropped; leaf text is
    /// kept as written, with CDATA sections unwrapped.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError`] for malformed or empty documents.
    pub fn parse(xml: &str) -> Result<Self, MarkupError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(Element {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    ..Element::default()
                }),
                Ok(Event::Empty(e)) => {
                    let element = Element {
                        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        ..Element::default()
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|e| MarkupError(e.to_string()))?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::End(_)) => {
                    let Some(mut done) = stack.pop() else {
                        return Err(MarkupError("unbalanced closing tag".to_string()));
                    };
                    if !done.children.is_empty() {
                        done.text.clear();
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(done),
                        None => return Ok(done),
                    }
                }
                Ok(Event::Eof) => return Err(MarkupError("empty document".to_string())),
                Ok(_) => {}
                Err(e) => return Err(MarkupError(e.to_string())),
            }
        }
    }

    /// Render the element and its subtree without a declaration.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError`] if the writer fails.
    pub fn to_xml(&self) -> Result<String, MarkupError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        self.write(&mut writer)?;
        String::from_utf8(writer.into_inner().into_inner()).map_err(|e| MarkupError(e.to_string()))
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), MarkupError> {
        if self.children.is_empty() && self.text.is_empty() {
            return emit(writer, Event::Empty(BytesStart::new(self.name.as_str())));
        }
        emit(writer, Event::Start(BytesStart::new(self.name.as_str())))?;
        if self.children.is_empty() {
            emit(writer, Event::Text(BytesText::new(&self.text)))?;
        } else {
            for child in &self.children {
                child.write(writer)?;
            }
        }
        emit(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), MarkupError> {
    writer
        .write_event(event)
        .map_err(|e| MarkupError(e.to_string()))
}
