//! WXR document parsing
//!
//! Builds a small element tree from the raw bytes, then reads the first
//! `channel/item` out of it.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Namespace prefix WordPress uses for its export fields
const WP_PREFIX: &str = "wp";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },

    #[error("Unclosed element: <{0}>")]
    UnclosedTag(String),

    #[error("Document has no root element")]
    NoRootElement,

    #[error("Missing <{0}> element")]
    MissingElement(&'static str),
}

type Result<T> = std::result::Result<T, ParseError>;

/// One post meta entry of the exported item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaRow {
    pub key: String,
    pub value: String,
}

/// The exported item, reduced to what an import needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportDocument {
    /// `item/title`, empty when absent
    pub title: String,
    /// `item/wp:post_name`, empty when absent
    pub canonical_name: String,
    /// `item/wp:post_type` as exported
    pub exported_post_type: Option<String>,
    /// Structured `wp:` children in document order
    pub meta_rows: Vec<MetaRow>,
}

#[derive(Debug)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }
}

/// Attach a finished element to its parent, or make it the root
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::Xml(format!(
            "unexpected second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn decode_utf8(bytes: &[u8], what: &str) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ParseError::Xml(format!("invalid UTF-8 in {}: {}", what, e)))
}

/// Name of an opening tag, with its attributes checked for well-formedness
fn start_name(e: &BytesStart) -> Result<String> {
    let name = decode_utf8(e.name().as_ref(), "element name")?;
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::Xml(format!("in <{}>: {}", name, err)))?;
        decode_utf8(attr.key.as_ref(), "attribute name")?;
        attr.unescape_value()
            .map_err(|err| ParseError::Xml(format!("in <{}>: {}", name, err)))?;
    }
    Ok(name)
}

fn parse_tree(document: &[u8]) -> Result<Element> {
    let mut reader = Reader::from_reader(document);
    // Tag matching is checked against our own stack below
    reader.config_mut().check_end_names = false;

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = start_name(e)?;
                if stack.is_empty() && root.is_some() {
                    return Err(ParseError::Xml(format!(
                        "unexpected second root element <{}>",
                        name
                    )));
                }
                stack.push(Element::new(name));
            }
            Ok(Event::Empty(ref e)) => {
                let name = start_name(e)?;
                attach(&mut stack, &mut root, Element::new(name))?;
            }
            Ok(Event::End(ref e)) => {
                let name = decode_utf8(e.name().as_ref(), "element name")?;
                let element = stack.pop().ok_or_else(|| {
                    ParseError::Xml(format!("closing tag </{}> without opening tag", name))
                })?;
                if element.name != name {
                    return Err(ParseError::MismatchedTag {
                        expected: element.name,
                        found: name,
                    });
                }
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| ParseError::Xml(err.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(ParseError::Xml(
                            "text outside of the root element".to_string(),
                        ))
                    }
                }
            }
            Ok(Event::CData(e)) => {
                // CDATA sections read as plain text
                let text = decode_utf8(&e, "CDATA section")?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None => {
                        return Err(ParseError::Xml(
                            "CDATA outside of the root element".to_string(),
                        ))
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedTag(open.name));
    }

    root.ok_or(ParseError::NoRootElement)
}

/// Parse a WXR export into an [`ImportDocument`].
///
/// Only the first `channel` and its first `item` are read. Missing `title`
/// or `wp:post_name` resolve to empty strings. Metadata rows come from the
/// item's `wp:` children that have child elements of their own; leaf fields
/// such as `wp:status` are skipped.
pub fn parse(document: &[u8]) -> Result<ImportDocument> {
    let root = parse_tree(document)?;
    let channel = root
        .child("channel")
        .ok_or(ParseError::MissingElement("channel"))?;
    let item = channel
        .child("item")
        .ok_or(ParseError::MissingElement("item"))?;

    let meta_rows = item
        .children
        .iter()
        .filter(|c| c.prefix() == Some(WP_PREFIX) && !c.children.is_empty())
        .map(|c| MetaRow {
            key: c.child_text("wp:meta_key").unwrap_or_default().to_string(),
            value: c.child_text("wp:meta_value").unwrap_or_default().to_string(),
        })
        .collect();

    Ok(ImportDocument {
        title: item.child_text("title").unwrap_or_default().to_string(),
        canonical_name: item
            .child_text("wp:post_name")
            .unwrap_or_default()
            .to_string(),
        exported_post_type: item.child_text("wp:post_type").map(str::to_string),
        meta_rows,
    })
}
