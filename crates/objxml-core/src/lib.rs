//! # objxml-core
//!
//! Schema-less value-graph ↔ XML codec. A [`Value`] tree (records, ordered
//! lists, associative maps, scalars) is serialized to an XML document with
//! no up-front schema, and decoded back through a heuristic that recovers
//! map structure from tree shape — XML has no native map construct, so a
//! decoded tree is otherwise ambiguous.
//!
//! ## Quick start
//!
//! ```rust
//! use objxml_core::{Value, XmlSerializer};
//!
//! let person = Value::record("stdClass", vec![
//!     ("firstname", Value::string("Andreas")),
//!     ("lastname", Value::string("Mueller")),
//! ]);
//!
//! let mut xml = XmlSerializer::new();
//! xml.formatted = false;
//! let text = xml.serialize(&person).unwrap();
//! assert_eq!(
//!     text,
//!     "<?xml version=\"1.0\"?>\n\
//!      <stdClass><firstname>Andreas</firstname><lastname>Mueller</lastname></stdClass>\n"
//! );
//!
//! let decoded = xml.deserialize(&text).unwrap();
//! assert_eq!(decoded.field("firstname").and_then(|v| v.as_text()), Some("Andreas"));
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the `Value` tagged union everything operates on
//! - `encoder` (private) — `Value` → XML text
//! - [`decoder`] — XML text → generic [`RawNode`] tree
//! - [`rebuild`] — heuristic map recovery over the raw tree
//! - [`error`] — the error taxonomy
//!
//! ## Thread safety
//!
//! An [`XmlSerializer`] carries small mutable state (see below), so share
//! one instance across threads only behind external synchronization, or
//! give each thread its own instance. The borrow checker enforces this for
//! in-process use: `deserialize` takes `&mut self`.

pub mod decoder;
mod encoder;
pub mod error;
pub mod rebuild;
pub mod value;

pub use decoder::{RawNode, parse};
pub use error::{Result, XmlError};
pub use rebuild::{lift, rebuild};
pub use value::{ScalarKind, Value};

/// Serializer facade with small cross-call state.
///
/// Besides the two flags, the facade remembers the root tag of the last
/// document it deserialized and reuses it as the default root name for a
/// later `serialize` call on the same instance. This stickiness is a
/// deliberate coupling between the two directions — an explicit root name
/// always overrides it, and a fresh instance has none.
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    /// Permit serializing associative maps. Off by default: maps have no
    /// native XML shape and their recovery on decode is heuristic.
    /// Also enables map recovery during `deserialize`.
    pub allow_associative_array: bool,
    /// Indent the output (2 spaces per level). Compact and formatted
    /// documents are structurally identical XML.
    pub formatted: bool,
    last_root_name: Option<String>,
}

impl Default for XmlSerializer {
    fn default() -> Self {
        XmlSerializer {
            allow_associative_array: false,
            formatted: true,
            last_root_name: None,
        }
    }
}

impl XmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a value tree to a complete XML document.
    ///
    /// The root element name is the last deserialized root tag if this
    /// instance has one, else the value's own type tag. Fails with
    /// [`XmlError::AssociativeArrayNotAllowed`] if the tree holds a map and
    /// [`Self::allow_associative_array`] is unset; never returns a partial
    /// document.
    pub fn serialize(&self, value: &Value) -> Result<String> {
        encoder::encode(
            value,
            None,
            self.last_root_name.as_deref(),
            self.allow_associative_array,
            self.formatted,
        )
    }

    /// Serialize with an explicit root element name, overriding both the
    /// sticky root and the value's type tag.
    pub fn serialize_named(&self, value: &Value, root_name: &str) -> Result<String> {
        encoder::encode(
            value,
            Some(root_name),
            self.last_root_name.as_deref(),
            self.allow_associative_array,
            self.formatted,
        )
    }

    /// Deserialize an XML document into a value tree.
    ///
    /// The outermost tag name is always recorded for root-name stickiness,
    /// whether or not map recovery runs. With
    /// [`Self::allow_associative_array`] set the raw tree goes through
    /// [`rebuild`]; otherwise it maps 1:1 via [`lift`] and `key`/`value`
    /// shapes stay plain record fields.
    pub fn deserialize(&mut self, xml: &str) -> Result<Value> {
        let root = decoder::parse(xml)?;
        self.last_root_name = Some(root.tag.clone());
        if self.allow_associative_array {
            rebuild::rebuild(&root)
        } else {
            Ok(rebuild::lift(&root))
        }
    }

    /// The root tag recorded by the most recent `deserialize` call.
    pub fn last_root_name(&self) -> Option<&str> {
        self.last_root_name.as_deref()
    }
}

/// One-shot serialize with default options (maps rejected, formatted).
pub fn serialize(value: &Value) -> Result<String> {
    XmlSerializer::new().serialize(value)
}

/// One-shot serialize with an explicit root element name.
pub fn serialize_named(value: &Value, root_name: &str) -> Result<String> {
    XmlSerializer::new().serialize_named(value, root_name)
}

/// One-shot deserialize with default options (no map recovery).
pub fn deserialize(xml: &str) -> Result<Value> {
    XmlSerializer::new().deserialize(xml)
}
