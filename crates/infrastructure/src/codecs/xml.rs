//! XML codec.
//!
//! Element trees map onto [`Document`]s with one fixed convention, used in
//! both directions:
//!
//! - The document is an object with a single key, the root tag name.
//! - An element with only text becomes a string leaf holding the unescaped
//!   text verbatim. An empty element (`<a/>`, `<a></a>`) is the empty string.
//! - An element with child elements becomes an object keyed by child tag, in
//!   document order. A repeated tag becomes an array under that key.
//! - Attributes go into a reserved `@attributes` object, placed first.
//! - Non-whitespace text of an element that also has attributes or children
//!   goes, trimmed, under the reserved `#text` key. Whitespace between child
//!   elements is ignored.
//! - CDATA counts as text. Comments, processing instructions, the XML
//!   declaration and DOCTYPE are skipped.
//!
//! XML has no scalar types, so decoding only ever produces strings. Encoding
//! writes `null` as an empty element and booleans and numbers as their text.
//!
//! Encoding rejects shapes the decoder could never produce: empty objects,
//! empty `@attributes`, `#text` that is empty, padded with whitespace or
//! alone in its object, arrays with fewer than two elements, nested arrays
//! and invalid names. Every document with string leaves that encodes
//! successfully therefore decodes back to itself.

use std::fmt;

use apitest_application::{Codec, DecodeError, EncodeError, Location};
use apitest_domain::{Document, Format, Object};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Reserved key holding an element's attributes.
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// Reserved key holding the text of an element that also has attributes or
/// children.
pub const TEXT_KEY: &str = "#text";

/// Codec for `application/xml` bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl XmlCodec {
    /// Creates a new `XmlCodec`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Codec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document, DecodeError> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<(String, Document)> = None;

        loop {
            let event = match reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(e) => return Err(malformed(reader.error_position() as u64, e)),
            };
            let position = reader.buffer_position() as u64;

            match event {
                Event::Start(start) => {
                    if open.is_empty() && root.is_some() {
                        return Err(malformed(position, "multiple root elements"));
                    }
                    open.push(Element::open(&start, position)?);
                }
                Event::Empty(start) => {
                    if open.is_empty() && root.is_some() {
                        return Err(malformed(position, "multiple root elements"));
                    }
                    let element = Element::open(&start, position)?;
                    close(element, &mut open, &mut root);
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| malformed(position, "closing tag without opening tag"))?;
                    close(element, &mut open, &mut root);
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| malformed(position, e))?;
                    append_text(&mut open, &text, position)?;
                }
                Event::CData(data) => {
                    let text = std::str::from_utf8(&data).map_err(|e| malformed(position, e))?;
                    append_text(&mut open, text, position)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(element) = open.last() {
            return Err(malformed(
                reader.buffer_position() as u64,
                format!("unclosed element <{}>", element.name),
            ));
        }
        let (name, body) = root.ok_or_else(|| malformed(0, "no root element"))?;
        let mut document = Object::new();
        document.insert(name, body);
        Ok(Document::Object(document))
    }

    fn encode(&self, document: &Document) -> Result<Vec<u8>, EncodeError> {
        let (name, body) = match document {
            Document::Object(map) if map.len() == 1 => map
                .iter()
                .next()
                .ok_or_else(|| unencodable("document has no root element"))?,
            _ => {
                return Err(unencodable(
                    "document must be an object with exactly one key, the root element",
                ));
            }
        };

        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(unencodable)?;
        write_element(&mut writer, name, body)?;
        Ok(writer.into_inner())
    }
}

/// An element being decoded.
struct Element {
    name: String,
    attributes: Object,
    children: Object,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Self, DecodeError> {
        let name = utf8(start.name().as_ref(), position)?.to_string();
        let mut attributes = Object::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| malformed(position, e))?;
            let key = utf8(attribute.key.as_ref(), position)?.to_string();
            let value = attribute.unescape_value().map_err(|e| malformed(position, e))?;
            attributes.insert(key, Document::string(value));
        }
        Ok(Self {
            name,
            attributes,
            children: Object::new(),
            text: String::new(),
        })
    }

    fn push_child(&mut self, name: String, value: Document) {
        match self.children.get_mut(&name) {
            None => {
                self.children.insert(name, value);
            }
            // Element values are never arrays, so an array here is a repeat.
            Some(Document::Array(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, Document::Null);
                *existing = Document::Array(vec![first, value]);
            }
        }
    }

    fn into_document(self) -> Document {
        if self.attributes.is_empty() && self.children.is_empty() {
            return Document::String(self.text);
        }
        let mut map = Object::new();
        if !self.attributes.is_empty() {
            map.insert(ATTRIBUTES_KEY.to_string(), Document::Object(self.attributes));
        }
        let text = self.text.trim();
        if !text.is_empty() {
            map.insert(TEXT_KEY.to_string(), Document::string(text));
        }
        map.extend(self.children);
        Document::Object(map)
    }
}

fn close(element: Element, open: &mut [Element], root: &mut Option<(String, Document)>) {
    let name = element.name.clone();
    let value = element.into_document();
    match open.last_mut() {
        Some(parent) => parent.push_child(name, value),
        None => *root = Some((name, value)),
    }
}

fn append_text(open: &mut [Element], text: &str, position: u64) -> Result<(), DecodeError> {
    match open.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(malformed(position, "text outside the root element")),
    }
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str, DecodeError> {
    std::str::from_utf8(bytes).map_err(|e| malformed(position, e))
}

fn malformed(position: u64, cause: impl fmt::Display) -> DecodeError {
    DecodeError::new(Format::Xml, Location::Offset(position), cause.to_string())
}

fn unencodable(cause: impl fmt::Display) -> EncodeError {
    EncodeError::new(Format::Xml, cause.to_string())
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Document) -> Result<(), EncodeError> {
    if !is_xml_name(name) {
        return Err(unencodable(format!("{name:?} is not a valid element name")));
    }
    match value {
        Document::Array(_) => Err(unencodable(format!(
            "array under <{name}> must be the value of an object key"
        ))),
        Document::Object(map) => write_object(writer, name, map),
        scalar => {
            let text = scalar_text(scalar).unwrap_or_default();
            write_text_element(writer, BytesStart::new(name), name, &text)
        }
    }
}

fn write_object(writer: &mut Writer<Vec<u8>>, name: &str, map: &Object) -> Result<(), EncodeError> {
    if map.is_empty() {
        return Err(unencodable(format!("empty object under <{name}>")));
    }
    let mut start = BytesStart::new(name);
    let mut has_attributes = false;
    let mut text = String::new();
    let mut children = Vec::new();

    for (key, child) in map {
        match key.as_str() {
            ATTRIBUTES_KEY => {
                let Document::Object(attributes) = child else {
                    return Err(unencodable(format!("{ATTRIBUTES_KEY} of <{name}> must be an object")));
                };
                if attributes.is_empty() {
                    return Err(unencodable(format!("empty {ATTRIBUTES_KEY} on <{name}>")));
                }
                has_attributes = true;
                for (attribute, value) in attributes {
                    if !is_xml_name(attribute) {
                        return Err(unencodable(format!("{attribute:?} is not a valid attribute name")));
                    }
                    let value = scalar_text(value).ok_or_else(|| {
                        unencodable(format!("attribute {attribute:?} of <{name}> must be a scalar"))
                    })?;
                    start.push_attribute((attribute.as_str(), value.as_str()));
                }
            }
            TEXT_KEY => {
                text = scalar_text(child)
                    .ok_or_else(|| unencodable(format!("{TEXT_KEY} of <{name}> must be a scalar")))?;
                if text.is_empty() || text.trim() != text {
                    return Err(unencodable(format!(
                        "{TEXT_KEY} of <{name}> must be non-empty with no surrounding whitespace"
                    )));
                }
            }
            _ => children.push((key, child)),
        }
    }

    if children.is_empty() {
        if !has_attributes {
            return Err(unencodable(format!(
                "{TEXT_KEY} of <{name}> needs attributes or child elements; use a string leaf"
            )));
        }
        return write_text_element(writer, start, name, &text);
    }

    writer.write_event(Event::Start(start)).map_err(unencodable)?;
    if !text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&text)))
            .map_err(unencodable)?;
    }
    for (key, child) in children {
        match child {
            Document::Array(items) => {
                if items.len() < 2 {
                    return Err(unencodable(format!(
                        "array under <{key}> needs at least two elements to be written as repeated tags"
                    )));
                }
                for item in items {
                    if matches!(item, Document::Array(_)) {
                        return Err(unencodable(format!("nested array under <{key}>")));
                    }
                    write_element(writer, key, item)?;
                }
            }
            _ => write_element(writer, key, child)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(unencodable)?;
    Ok(())
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    start: BytesStart<'_>,
    name: &str,
    text: &str,
) -> Result<(), EncodeError> {
    if text.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(unencodable);
    }
    writer.write_event(Event::Start(start)).map_err(unencodable)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(unencodable)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(unencodable)
}

fn scalar_text(value: &Document) -> Option<String> {
    match value {
        Document::Null => Some(String::new()),
        Document::Bool(b) => Some(b.to_string()),
        Document::Number(n) => Some(n.to_string()),
        Document::String(s) => Some(s.clone()),
        Document::Object(_) | Document::Array(_) => None,
    }
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}
