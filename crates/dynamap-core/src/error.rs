//! Error types for the dynamap core.

use thiserror::Error;

use crate::schema::ScalarKind;

/// Configuration errors found while compiling a message schema.
///
/// All of these are fatal at compile time. Nothing here is deferred to
/// encode or decode: a schema that compiles cleanly cannot produce a
/// configuration failure at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field '{field}' is marked as_set but is not repeated")]
    SetOnSingularField { field: String },

    #[error("field '{field}': sets of {kind:?} are not supported")]
    UnsupportedSetKind { field: String, kind: ScalarKind },

    #[error("field '{field}': lists of {kind:?} are not supported")]
    UnsupportedListKind { field: String, kind: ScalarKind },

    #[error("field '{field}': nested messages map to the M tag, which is not implemented")]
    NestedMessageUnsupported { field: String },

    #[error("key '{key}' references unknown field '{field}'")]
    KeyFieldMissing { key: String, field: String },

    #[error("key '{key}' references repeated field '{field}'; key fields must be singular")]
    KeyFieldRepeated { key: String, field: String },

    #[error("key '{key}' references field '{field}' of kind {kind:?}; key fields must be string or numeric")]
    KeyFieldKind {
        key: String,
        field: String,
        kind: ScalarKind,
    },

    #[error("label '{label}' is declared more than once (keys, exposed fields, and the reserved 'typ'/'value' labels must not collide)")]
    LabelCollision { label: String },

    #[error("duplicate field '{field}' in message schema")]
    DuplicateField { field: String },
}

/// Every configuration error found while compiling one message.
///
/// Errors are collected, not short-circuited, so a host can report all
/// of a message's configuration problems in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("message '{message}': {} configuration error(s)", .errors.len())]
pub struct CompileError {
    /// The message schema that failed to compile.
    pub message: String,
    /// All configuration errors found, in discovery order.
    pub errors: Vec<ConfigError>,
}

/// Errors raised while encoding a message value through a compiled codec.
///
/// These indicate a message value that does not conform to the schema the
/// codec was compiled from.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("message value is missing field '{field}'")]
    MissingField { field: String },

    #[error("field '{field}' is repeated but the schema declares it singular")]
    ExpectedSingular { field: String },

    #[error("field '{field}' is singular but the schema declares it repeated")]
    ExpectedRepeated { field: String },

    #[error("field '{field}': expected a {expected:?} value, got {actual:?}")]
    WrongKind {
        field: String,
        expected: ScalarKind,
        actual: ScalarKind,
    },

    /// Payload serialization failure, propagated unchanged.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Errors raised while decoding an envelope back into a message value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A reserved envelope entry (`typ` or `value`) is absent.
    #[error("envelope is missing required entry '{label}'")]
    MissingEntry { label: String },

    /// A reserved envelope entry is present under the wrong wire tag.
    #[error("envelope entry '{label}' has unexpected tag {tag}")]
    UnexpectedTag { label: String, tag: &'static str },

    /// The stored type identity does not match the codec's message type.
    #[error("type mismatch: expected '{expected}', got '{actual}'")]
    TypeMismatch { expected: String, actual: String },

    /// Payload deserialization failure, propagated unchanged.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Errors from the binary payload layer.
///
/// The envelope layer neither inspects nor masks these; they surface
/// exactly as the serializer reported them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("payload encoding failed: {0}")]
    Encode(String),

    #[error("payload decoding failed: {0}")]
    Decode(String),
}
