//! # dynamap Core
//!
//! Pure primitives for compiling annotated message schemas into
//! attribute-value item codecs for a document store.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation: schemas in, compiled codecs out.
//!
//! ## Key Types
//!
//! - [`MessageSchema`] - A message description: fields, options, computed keys
//! - [`MessageCodec`] - A compiled encode/decode plan for one message
//! - [`MessageValue`] - The dynamic in-memory message representation
//! - [`Envelope`] - The ordered attribute record written to the store
//! - [`AttributeValue`] - The store's tagged-union wire value
//!
//! ## The mapping
//!
//! Each exposed field is classified to exactly one wire tag (see
//! [`classify`]); computed keys concatenate field text deterministically
//! (see [`CompiledKey`]); and every envelope embeds the complete message
//! as a binary payload under `value` plus its type identity under `typ`.

pub mod attr;
pub mod classify;
pub mod codec;
pub mod error;
pub mod keys;
pub mod message;
pub mod payload;
pub mod schema;

pub use attr::{AttributeValue, Envelope, WireTag, PAYLOAD_LABEL, TYPE_LABEL};
pub use classify::{classify, classify_field};
pub use codec::MessageCodec;
pub use error::{CompileError, ConfigError, DecodeError, EncodeError, PayloadError};
pub use keys::CompiledKey;
pub use message::{FieldValue, MessageValue, Scalar};
pub use payload::{decode_payload, encode_payload};
pub use schema::{
    FieldOptions, FieldSchema, KeySpec, MessageOptions, MessageSchema, MessageSchemaBuilder,
    ScalarKind, DEFAULT_SEPARATOR,
};
