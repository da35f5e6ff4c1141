//! Value tree → XML text, built on the quick-xml event writer.
//!
//! Shapes on the wire:
//!
//! - **Record** — one element, one child per field in order.
//! - **List** — no element of its own: one sibling element per item, named
//!   after the field. Only the tag repetition tells the decoder a list was
//!   here, so empty lists vanish and one-item lists are indistinguishable
//!   from plain fields.
//! - **Map** — one wrapper element per entry (flag-gated), holding exactly
//!   a `key` leaf and a `value` subtree.
//! - **Scalar** — a leaf element with the canonical text.
//!
//! Formatted and compact output differ only in whitespace; the indenting
//! writer is quick-xml's own, applied while emitting, never by rewriting
//! the value tree.

use crate::error::{Result, XmlError};
use crate::value::Value;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Serialize `value` to a complete XML document.
///
/// Root tag precedence: `root_name` (caller-supplied) over `sticky_root`
/// (the facade's last deserialized root) over the value's own type tag.
/// The buffer is only returned on success — a failing call never yields a
/// partial document.
pub(crate) fn encode(
    value: &Value,
    root_name: Option<&str>,
    sticky_root: Option<&str>,
    allow_associative_array: bool,
    formatted: bool,
) -> Result<String> {
    let writer = if formatted {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };
    let mut enc = Encoder {
        writer,
        allow_associative_array,
    };

    enc.writer
        .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    if !formatted {
        // The indenting writer breaks the line itself; the compact one
        // keeps the declaration line convention by hand.
        enc.writer.get_mut().push(b'\n');
    }

    let tag = root_name.or(sticky_root).unwrap_or_else(|| value.type_tag());
    enc.write_value(tag, value)?;

    let mut out = enc.writer.into_inner();
    out.push(b'\n');
    Ok(String::from_utf8_lossy(&out).into_owned())
}

struct Encoder {
    writer: Writer<Vec<u8>>,
    allow_associative_array: bool,
}

impl Encoder {
    /// Emit one value as a single element named `tag`.
    fn write_value(&mut self, tag: &str, value: &Value) -> Result<()> {
        match value {
            Value::Scalar { text, .. } => self.write_leaf(tag, text),
            Value::Record { fields, .. } if fields.is_empty() => self.write_leaf(tag, ""),
            Value::Record { fields, .. } => {
                self.start(tag)?;
                for (name, field) in fields {
                    self.write_field(name, field)?;
                }
                self.end(tag)
            }
            Value::List { items, .. } if items.is_empty() => self.write_leaf(tag, ""),
            Value::List { type_hint, items } => {
                self.start(tag)?;
                for item in items {
                    self.write_item(None, type_hint.as_deref(), item)?;
                }
                self.end(tag)
            }
            Value::Map { entries } if entries.is_empty() => {
                self.check_maps_allowed()?;
                self.write_leaf(tag, "")
            }
            Value::Map { entries } => {
                self.start(tag)?;
                self.write_entries(None, entries)?;
                self.end(tag)
            }
        }
    }

    /// Emit one record field. Lists expand to sibling elements right here,
    /// without a wrapper; maps expand to flag-gated entry wrappers.
    fn write_field(&mut self, name: &str, value: &Value) -> Result<()> {
        match value {
            Value::List { type_hint, items } => {
                for item in items {
                    self.write_item(Some(name), type_hint.as_deref(), item)?;
                }
                Ok(())
            }
            Value::Map { entries } if entries.is_empty() => {
                self.check_maps_allowed()?;
                self.write_leaf(name, "")
            }
            Value::Map { entries } => self.write_entries(Some(name), entries),
            _ => self.write_value(name, value),
        }
    }

    /// Emit one list item as a sibling element. The field name wins; the
    /// list's element type hint applies only when no field name is in
    /// scope, and the item's own type tag is the last resort.
    fn write_item(&mut self, field: Option<&str>, hint: Option<&str>, item: &Value) -> Result<()> {
        match item {
            Value::Map { entries } if entries.is_empty() => {
                self.check_maps_allowed()?;
                match field.or(hint) {
                    Some(tag) => self.write_leaf(tag, ""),
                    None => Ok(()),
                }
            }
            Value::Map { entries } => self.write_entries(field, entries),
            _ => {
                let tag = field.or(hint).unwrap_or_else(|| item.type_tag());
                self.write_value(tag, item)
            }
        }
    }

    /// Emit map entries as repeated wrapper elements, each holding a `key`
    /// leaf and a `value` subtree. The wrapper is named after the field, or
    /// after the runtime type of the entry's value when the map itself has
    /// no field name (top level, unnamed list element).
    fn write_entries(&mut self, ctx: Option<&str>, entries: &[(String, Value)]) -> Result<()> {
        self.check_maps_allowed()?;
        for (key, value) in entries {
            let wrapper = ctx.unwrap_or_else(|| value.type_tag());
            self.start(wrapper)?;
            self.write_leaf("key", key)?;
            self.write_value("value", value)?;
            self.end(wrapper)?;
        }
        Ok(())
    }

    fn check_maps_allowed(&self) -> Result<()> {
        if self.allow_associative_array {
            Ok(())
        } else {
            Err(XmlError::AssociativeArrayNotAllowed)
        }
    }

    fn write_leaf(&mut self, tag: &str, text: &str) -> Result<()> {
        check_name(tag)?;
        if text.is_empty() {
            self.writer.write_event(Event::Empty(BytesStart::new(tag)))?;
        } else {
            self.writer.write_event(Event::Start(BytesStart::new(tag)))?;
            self.writer.write_event(Event::Text(BytesText::new(text)))?;
            self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        Ok(())
    }

    fn start(&mut self, tag: &str) -> Result<()> {
        check_name(tag)?;
        self.writer.write_event(Event::Start(BytesStart::new(tag)))?;
        Ok(())
    }

    fn end(&mut self, tag: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }
}

fn check_name(tag: &str) -> Result<()> {
    if is_valid_name(tag) {
        Ok(())
    } else {
        Err(XmlError::UnsupportedValueKind(format!(
            "`{tag}` is not a usable XML element name"
        )))
    }
}

/// Minimal XML 1.0 name check, covering the names a value tree can supply
/// as field names, type names or root tags.
fn is_valid_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
