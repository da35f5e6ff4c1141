//! Heuristic recovery of value structure from a raw node tree.
//!
//! XML has no map construct, so a decoded tree is ambiguous: a repeated
//! child tag may be a list, a map entry group, or neither. [`rebuild`]
//! resolves this with a fixed shape test, strictly post-order (children are
//! classified before their parent):
//!
//! - a node with exactly two children tagged `key` and `value` (either
//!   order) is a map entry; sibling groups made entirely of entries merge
//!   into one map, later duplicate keys overwriting earlier ones;
//! - a repeated tag group of two or more stays an ordered list;
//! - a group of one collapses to the child's own value — a one-element list
//!   is indistinguishable from a plain field on the wire, so it is never
//!   reconstructed as a list;
//! - a childless node becomes a string scalar (scalar kinds do not survive
//!   the round trip).
//!
//! Known limitation, preserved deliberately: sibling records that happen to
//! hold exactly the two fields `key` and `value` pass the shape test and
//! are merged into a map. No semantic disambiguation is attempted beyond
//! the shape test.
//!
//! [`lift`] is the recovery-disabled companion: the same tag grouping with
//! no entry detection and no error paths.

use crate::decoder::RawNode;
use crate::error::{Result, XmlError};
use crate::value::{ScalarKind, Value};

/// Outcome of classifying one node. Entry-shaped nodes carry their key so
/// the parent can merge sibling entries into a single map.
enum Rebuilt {
    Entry(String, Value),
    Plain(Value),
}

impl Rebuilt {
    fn into_value(self) -> Value {
        match self {
            // An entry with no surrounding group stands alone as a
            // one-entry map.
            Rebuilt::Entry(key, value) => Value::Map {
                entries: vec![(key, value)],
            },
            Rebuilt::Plain(value) => value,
        }
    }
}

/// Rebuild a value from a raw node tree with map recovery enabled.
pub fn rebuild(node: &RawNode) -> Result<Value> {
    classify(node).map(Rebuilt::into_value)
}

/// Map a raw node tree onto a value 1:1, without map recovery: repeated
/// tags become lists, everything else records and string scalars.
pub fn lift(node: &RawNode) -> Value {
    if node.children.is_empty() {
        return leaf_scalar(node);
    }
    let mut fields = Vec::new();
    for tag in distinct_tags(node) {
        let group: Vec<&RawNode> = node.children.iter().filter(|c| c.tag == *tag).collect();
        if group.len() > 1 {
            fields.push((
                tag.clone(),
                Value::List {
                    type_hint: None,
                    items: group.into_iter().map(lift).collect(),
                },
            ));
        } else {
            fields.push((tag.clone(), lift(group[0])));
        }
    }
    Value::Record {
        type_name: node.tag.clone(),
        fields,
    }
}

fn classify(node: &RawNode) -> Result<Rebuilt> {
    if node.children.is_empty() {
        return Ok(Rebuilt::Plain(leaf_scalar(node)));
    }

    let keys = node.children.iter().filter(|c| c.tag == "key").count();
    let values = node.children.iter().filter(|c| c.tag == "value").count();

    if node.children.len() == 2 && keys == 1 && values == 1 {
        return entry(node);
    }
    if (keys > 0) != (values > 0) {
        let reason = if keys > 0 {
            "has a `key` child without a `value`"
        } else {
            "has a `value` child without a `key`"
        };
        return Err(XmlError::MalformedMapEntry {
            tag: node.tag.clone(),
            reason: reason.to_string(),
        });
    }

    // Record shape: group children by tag in first-appearance order.
    let mut fields: Vec<(String, Value)> = Vec::new();
    for tag in distinct_tags(node) {
        let group = node
            .children
            .iter()
            .filter(|c| c.tag == *tag)
            .map(classify)
            .collect::<Result<Vec<_>>>()?;

        if group.iter().all(|r| matches!(r, Rebuilt::Entry(..))) {
            let mut entries: Vec<(String, Value)> = Vec::new();
            for rebuilt in group {
                if let Rebuilt::Entry(key, value) = rebuilt {
                    insert_entry(&mut entries, key, value);
                }
            }
            fields.push((tag.clone(), Value::Map { entries }));
        } else if group.len() > 1 {
            fields.push((
                tag.clone(),
                Value::List {
                    type_hint: None,
                    items: group.into_iter().map(Rebuilt::into_value).collect(),
                },
            ));
        } else if let Some(only) = group.into_iter().next() {
            // Single-element group: indistinguishable from a plain field.
            fields.push((tag.clone(), only.into_value()));
        }
    }
    Ok(Rebuilt::Plain(Value::Record {
        type_name: node.tag.clone(),
        fields,
    }))
}

/// Classify a node already known to hold exactly one `key` and one `value`
/// child. The key must be a leaf; the value is rebuilt recursively and may
/// be any shape.
fn entry(node: &RawNode) -> Result<Rebuilt> {
    let key_child = node
        .children
        .iter()
        .find(|c| c.tag == "key")
        .ok_or_else(|| malformed(node, "missing `key` child"))?;
    let value_child = node
        .children
        .iter()
        .find(|c| c.tag == "value")
        .ok_or_else(|| malformed(node, "missing `value` child"))?;

    if !key_child.children.is_empty() {
        return Err(malformed(node, "`key` child is not a leaf"));
    }
    let key = key_child.text.clone().unwrap_or_default();
    Ok(Rebuilt::Entry(key, rebuild(value_child)?))
}

fn malformed(node: &RawNode, reason: &str) -> XmlError {
    XmlError::MalformedMapEntry {
        tag: node.tag.clone(),
        reason: reason.to_string(),
    }
}

fn leaf_scalar(node: &RawNode) -> Value {
    Value::Scalar {
        text: node.text.clone().unwrap_or_default(),
        kind: ScalarKind::String,
    }
}

/// Child tag names in order of first appearance.
fn distinct_tags(node: &RawNode) -> Vec<&String> {
    let mut tags: Vec<&String> = Vec::new();
    for child in &node.children {
        if !tags.iter().any(|t| **t == child.tag) {
            tags.push(&child.tag);
        }
    }
    tags
}

/// Insert with last-wins semantics: a duplicate key keeps its original
/// position but takes the later value.
fn insert_entry(entries: &mut Vec<(String, Value)>, key: String, value: Value) {
    if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        entries.push((key, value));
    }
}
