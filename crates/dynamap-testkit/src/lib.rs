//! # dynamap Testkit
//!
//! Testing utilities for dynamap.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: shared schemas and deterministic sample messages
//! - **Generators**: proptest strategies producing schema-conforming
//!   message values
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use dynamap_core::MessageCodec;
//! use dynamap_testkit::{fixtures::kitchen_sink_schema, generators::message_for};
//!
//! proptest! {
//!     #[test]
//!     fn roundtrips(msg in message_for(&kitchen_sink_schema())) {
//!         let codec = MessageCodec::compile(&kitchen_sink_schema()).unwrap();
//!         let envelope = codec.encode(&msg).unwrap();
//!         prop_assert_eq!(codec.decode(&envelope).unwrap(), msg);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{kitchen_sink_message, kitchen_sink_schema, user_message, user_schema};
pub use generators::{field_value_for, message_for, nested_message, scalar_for};
