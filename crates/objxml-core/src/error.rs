//! Error types for serialization and map recovery.

use thiserror::Error;

/// Errors that can occur while serializing a value tree to XML or
/// rebuilding one from XML text.
///
/// Every failure is terminal for the current call: no partial document is
/// ever returned and nothing is retried internally.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The input text failed to parse, or parsed to an empty document.
    #[error("invalid XML document: {0}")]
    InvalidDocument(String),

    /// The value contains an associative map but `allow_associative_array`
    /// is not set. Maps have no native XML shape, so emitting them must be
    /// opted into explicitly.
    #[error("associative arrays are disabled; set `allow_associative_array` to serialize them")]
    AssociativeArrayNotAllowed,

    /// A node violated the `key`/`value` entry shape during map recovery.
    #[error("malformed map entry in <{tag}>: {reason}")]
    MalformedMapEntry { tag: String, reason: String },

    /// The serializer cannot express this value in XML.
    #[error("unsupported value: {0}")]
    UnsupportedValueKind(String),

    /// Transport error from the underlying writer.
    #[error("XML I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error surfaced by the XML library itself.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XmlError>;
