//! Shared schemas and sample messages.
//!
//! Common setup for unit and integration tests across the workspace.

use bytes::Bytes;
use dynamap_core::{FieldSchema, KeySpec, MessageSchema, MessageValue, Scalar, ScalarKind};

/// The canonical two-field example: `User { name, age }` with a
/// prefixed partition key over `name` and `age` exposed as a number.
pub fn user_schema() -> MessageSchema {
    MessageSchema::builder("example", "pkg", "User")
        .field(FieldSchema::new("name", ScalarKind::String))
        .field(FieldSchema::new("age", ScalarKind::U32).exposed())
        .partition_key(KeySpec::new("partitionKey", ["name"]).prefix("USER"))
        .build()
        .expect("user schema is well-formed")
}

/// The canonical user message: `name = "alice"`, `age = 30`.
pub fn user_message() -> MessageValue {
    MessageValue::new().field("name", "alice").field("age", 30u32)
}

/// A schema exercising every supported field shape: singular scalars,
/// lists, all three set kinds, an enum, an unexposed nested message,
/// and both partition and sort keys.
pub fn kitchen_sink_schema() -> MessageSchema {
    MessageSchema::builder("example", "pkg", "KitchenSink")
        .field(FieldSchema::new("id", ScalarKind::String))
        .field(FieldSchema::new("title", ScalarKind::String).exposed())
        .field(FieldSchema::new("count", ScalarKind::U64).exposed())
        .field(FieldSchema::new("ratio", ScalarKind::F64).exposed())
        .field(FieldSchema::new("active", ScalarKind::Bool).exposed())
        .field(FieldSchema::new("blob", ScalarKind::Bytes).exposed())
        .field(FieldSchema::new("level", ScalarKind::Enum).exposed())
        .field(FieldSchema::new("scores", ScalarKind::I32).repeated().exposed())
        .field(FieldSchema::new("labels", ScalarKind::String).repeated().exposed())
        .field(FieldSchema::new("tags", ScalarKind::String).repeated().as_set().exposed())
        .field(FieldSchema::new("ids", ScalarKind::U32).repeated().as_set().exposed())
        .field(FieldSchema::new("digests", ScalarKind::Bytes).repeated().as_set().exposed())
        .field(FieldSchema::new("meta", ScalarKind::Message))
        .partition_key(KeySpec::new("partitionKey", ["id"]).prefix("SINK"))
        .sort_key(KeySpec::new("sortKey", ["count"]))
        .build()
        .expect("kitchen sink schema is well-formed")
}

/// A deterministic message conforming to [`kitchen_sink_schema`].
pub fn kitchen_sink_message() -> MessageValue {
    MessageValue::new()
        .field("id", "sink-1")
        .field("title", "everything")
        .field("count", 42u64)
        .field("ratio", 0.25f64)
        .field("active", true)
        .field("blob", Bytes::from_static(b"\x00\x01\x02"))
        .field("level", Scalar::Enum(2))
        .field("scores", vec![Scalar::I32(-1), Scalar::I32(0), Scalar::I32(1)])
        .field("labels", vec![Scalar::from("red"), Scalar::from("blue")])
        .field("tags", vec![Scalar::from("a"), Scalar::from("b")])
        .field("ids", vec![Scalar::U32(7), Scalar::U32(9)])
        .field(
            "digests",
            vec![
                Scalar::Bytes(Bytes::from_static(b"\xaa\xbb")),
                Scalar::Bytes(Bytes::from_static(b"\xcc")),
            ],
        )
        .field("meta", MessageValue::new().field("origin", "test").field("rev", 3i64))
}
