//! # dynamap
//!
//! The unified API for dynamap - compiling annotated message schemas
//! into attribute-value item codecs for a document store.
//!
//! ## Overview
//!
//! For every non-disabled message schema, compilation produces a codec
//! with two operations:
//!
//! - **encode**: message value in, envelope out. The envelope combines
//!   computed index keys, a type identity, a single binary payload
//!   embedding the complete message, and any explicitly exposed fields.
//! - **decode**: envelope in, message value out. Only the type identity
//!   and the payload are consulted; everything else is derived data for
//!   store-side indexing.
//!
//! ## Usage
//!
//! ```rust
//! use dynamap::SchemaCompiler;
//! use dynamap::core::{FieldSchema, KeySpec, MessageSchema, MessageValue, ScalarKind};
//!
//! let schema = MessageSchema::builder("example", "pkg", "User")
//!     .field(FieldSchema::new("name", ScalarKind::String))
//!     .field(FieldSchema::new("age", ScalarKind::U32).exposed())
//!     .partition_key(KeySpec::new("partitionKey", ["name"]).prefix("USER"))
//!     .build()
//!     .unwrap();
//!
//! let codecs = SchemaCompiler::default()
//!     .compile(&[schema])
//!     .unwrap()
//!     .into_result()
//!     .unwrap();
//!
//! let user = MessageValue::new().field("name", "alice").field("age", 30u32);
//! let envelope = codecs.encode("User", &user).unwrap();
//! assert_eq!(
//!     envelope.get("partitionKey").and_then(|v| v.as_s()),
//!     Some("USER:alice")
//! );
//! assert_eq!(codecs.decode("User", &envelope).unwrap(), user);
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the core crate for convenience:
//!
//! - `dynamap::core` - Core primitives (schemas, codecs, attribute values)

pub mod compiler;
pub mod error;

// Re-export the core crate
pub use dynamap_core as core;

// Re-export main types for convenience
pub use compiler::{CodecSet, CompileOutcome, CompilerConfig, SchemaCompiler};
pub use error::{Error, Result};

// Re-export commonly used core types
pub use dynamap_core::{
    AttributeValue, CompileError, ConfigError, DecodeError, EncodeError, Envelope, FieldSchema,
    KeySpec, MessageCodec, MessageSchema, MessageValue, PayloadError, Scalar, ScalarKind, WireTag,
};
