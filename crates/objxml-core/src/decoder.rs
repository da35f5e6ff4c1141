//! XML text → raw node tree, an adapter over the quick-xml event reader.
//!
//! The decoder knows nothing about maps or lists. It produces the generic
//! [`RawNode`] tree — tag, ordered children, leaf text — that the rebuild
//! step classifies. Attributes, comments, processing instructions and the
//! declaration are skipped: the wire format carries all data in element
//! names, nesting and leaf text.
//!
//! The reader delivers leaf content in pieces: plain text fragments and one
//! event per entity reference. Fragments are reassembled on the open node
//! and the whole text is trimmed once when the element closes, so spaces
//! around a reference survive while indentation does not.

use crate::error::{Result, XmlError};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};

/// One decoded element: its tag, child elements in document order, and the
/// leaf text (only meaningful when there are no children).
#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub tag: String,
    pub children: Vec<RawNode>,
    pub text: Option<String>,
}

/// Parse an XML document into its raw node tree.
///
/// Fails with [`XmlError::InvalidDocument`] when the text does not parse,
/// contains no root element, contains more than one, or has non-whitespace
/// text outside the root.
pub fn parse(xml: &str) -> Result<RawNode> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<RawNode> = Vec::new();
    let mut root: Option<RawNode> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| XmlError::InvalidDocument(e.to_string()))?;
        match event {
            Event::Start(start) => {
                stack.push(RawNode {
                    tag: tag_name(start.name().as_ref()),
                    children: Vec::new(),
                    text: None,
                });
            }
            Event::Empty(start) => {
                let node = RawNode {
                    tag: tag_name(start.name().as_ref()),
                    children: Vec::new(),
                    text: None,
                };
                attach(node, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // Mismatched end tags are already rejected by the reader.
                let mut node = stack.pop().ok_or_else(|| {
                    XmlError::InvalidDocument("unexpected closing tag".to_string())
                })?;
                finish(&mut node);
                attach(node, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let content = text
                    .decode()
                    .map_err(|e| XmlError::InvalidDocument(e.to_string()))?;
                note_text(content.into_owned(), &mut stack)?;
            }
            Event::GeneralRef(reference) => {
                note_text(resolve_reference(&reference)?, &mut stack)?;
            }
            Event::CData(data) => {
                let content = String::from_utf8_lossy(data.as_ref()).into_owned();
                note_text(content, &mut stack)?;
            }
            Event::Eof => break,
            // Declaration, comments, PIs, doctype: carry no tree data.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::InvalidDocument(
            "unclosed element at end of document".to_string(),
        ));
    }
    root.ok_or_else(|| XmlError::InvalidDocument("document contains no elements".to_string()))
}

/// Attach a completed node to its parent, or install it as the root.
fn attach(node: RawNode, stack: &mut Vec<RawNode>, root: &mut Option<RawNode>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(XmlError::InvalidDocument(
            "more than one root element".to_string(),
        )),
    }
}

/// Record a text fragment on the innermost open element. Text mixed between
/// child elements is outside the wire contract and is dropped; outside the
/// root only whitespace is tolerated.
fn note_text(content: String, stack: &mut [RawNode]) -> Result<()> {
    match stack.last_mut() {
        Some(node) if node.children.is_empty() => {
            match node.text.as_mut() {
                Some(text) => text.push_str(&content),
                None => node.text = Some(content),
            }
            Ok(())
        }
        Some(_) => Ok(()),
        None if content.trim().is_empty() => Ok(()),
        None => Err(XmlError::InvalidDocument(
            "text outside of the root element".to_string(),
        )),
    }
}

/// Trim the assembled leaf text now that the element is complete. Nodes
/// with children carry no text; whitespace-only leaves decode as empty.
fn finish(node: &mut RawNode) {
    if !node.children.is_empty() {
        node.text = None;
        return;
    }
    if let Some(text) = node.text.take() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            node.text = Some(trimmed.to_string());
        }
    }
}

/// Resolve one entity reference event: numeric character references first,
/// then the predefined XML entities. Anything else has no expansion here
/// (no DTD support) and fails the document.
fn resolve_reference(reference: &BytesRef) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| XmlError::InvalidDocument(e.to_string()))?
    {
        return Ok(ch.to_string());
    }
    let name = reference
        .decode()
        .map_err(|e| XmlError::InvalidDocument(e.to_string()))?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| {
            XmlError::InvalidDocument(format!("unresolvable entity reference `&{name};`"))
        })
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
