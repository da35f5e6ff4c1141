//! The value model every other module operates on.
//!
//! A [`Value`] is a closed tagged union over the four shapes the codec can
//! express: scalars, records (ordered named fields), ordered lists, and
//! associative maps. Producers build a `Value` tree explicitly — there is no
//! reflection over arbitrary object graphs — and the serializer/rebuilder
//! walk it without mutating it.
//!
//! Ordered fields and map entries are plain `Vec<(String, Value)>` to keep
//! insertion order without pulling in an ordered-map dependency.

/// Scalar type tags. The kind never changes how a scalar's text is emitted;
/// it only chooses the fallback element name when no field name applies
/// (e.g. a scalar at the document root, or a list item without a field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl ScalarKind {
    /// The element name used for a scalar of this kind.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Null => "null",
        }
    }
}

/// A schema-less value graph.
///
/// Scalars carry their canonical text form; the constructors below produce
/// that form (`true` → `"1"`, `false`/null → empty text, numbers in plain
/// decimal). Decoding never recovers scalar kinds — everything that comes
/// back from XML is a string scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A leaf value, stored as its canonical text.
    Scalar { text: String, kind: ScalarKind },
    /// An ordered collection of uniquely named fields. `type_name` is the
    /// runtime type name, used as the element name only when no contextual
    /// field name applies (e.g. at the document root).
    Record {
        type_name: String,
        fields: Vec<(String, Value)>,
    },
    /// A positional sequence. Lists have no wrapping element of their own:
    /// items are emitted as repeated sibling elements, and only that
    /// repetition signals "list" to the decoder. `type_hint` names items
    /// that have no contextual field name.
    List {
        type_hint: Option<String>,
        items: Vec<Value>,
    },
    /// A key→value collection. XML has no native map shape, so entries are
    /// serialized as repeated wrapper elements holding `key`/`value`
    /// children, and only recovered heuristically on decode. Keys need not
    /// be unique on input; the rebuild step deduplicates them (last wins).
    Map { entries: Vec<(String, Value)> },
}

impl Value {
    /// A string scalar.
    pub fn string(text: impl Into<String>) -> Value {
        Value::Scalar {
            text: text.into(),
            kind: ScalarKind::String,
        }
    }

    /// An integer scalar in plain decimal form.
    pub fn integer(n: i64) -> Value {
        Value::Scalar {
            text: n.to_string(),
            kind: ScalarKind::Integer,
        }
    }

    /// A float scalar in plain decimal form (never scientific notation).
    /// Non-finite floats have no XML text form and degrade to null.
    pub fn float(f: f64) -> Value {
        if !f.is_finite() {
            return Value::null();
        }
        Value::Scalar {
            text: f.to_string(),
            kind: ScalarKind::Float,
        }
    }

    /// A boolean scalar: `true` is `"1"`, `false` is empty text, matching
    /// the all-strings coercion on the decode side.
    pub fn boolean(b: bool) -> Value {
        Value::Scalar {
            text: if b { "1" } else { "" }.to_string(),
            kind: ScalarKind::Boolean,
        }
    }

    /// The null scalar (empty text).
    pub fn null() -> Value {
        Value::Scalar {
            text: String::new(),
            kind: ScalarKind::Null,
        }
    }

    /// A record with the given runtime type name and ordered fields.
    pub fn record<S: Into<String>>(type_name: S, fields: Vec<(S, Value)>) -> Value {
        Value::Record {
            type_name: type_name.into(),
            fields: fields.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    /// An ordered list with no element type hint.
    pub fn list(items: Vec<Value>) -> Value {
        Value::List {
            type_hint: None,
            items,
        }
    }

    /// An ordered list whose unnamed items are tagged `type_hint`.
    pub fn list_of(type_hint: impl Into<String>, items: Vec<Value>) -> Value {
        Value::List {
            type_hint: Some(type_hint.into()),
            items,
        }
    }

    /// An associative map with entries in insertion order.
    pub fn map<S: Into<String>>(entries: Vec<(S, Value)>) -> Value {
        Value::Map {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Look up a record field by name. `None` is the explicit "no such
    /// field" result — there is no trapping property access. Returns `None`
    /// on non-record values too.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record { fields, .. } => {
                fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Look up a map entry by key. `None` on missing keys and on non-map
    /// values.
    pub fn entry(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map { entries } => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// The scalar text, if this is a scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Scalar { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The fallback element name for this value when no field name is in
    /// scope: the record's type name, the scalar's kind name, or the
    /// synthetic `Array` tag for lists and maps.
    pub(crate) fn type_tag(&self) -> &str {
        match self {
            Value::Scalar { kind, .. } => kind.name(),
            Value::Record { type_name, .. } => type_name,
            Value::List { .. } | Value::Map { .. } => "Array",
        }
    }
}
