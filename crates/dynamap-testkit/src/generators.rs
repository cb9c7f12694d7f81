//! Proptest generators for schema-conforming message values.

use bytes::Bytes;
use proptest::prelude::*;

use dynamap_core::{FieldSchema, FieldValue, MessageSchema, MessageValue, Scalar, ScalarKind};

/// Generate a small nested message with primitive fields.
pub fn nested_message() -> BoxedStrategy<MessageValue> {
    prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..3)
        .prop_map(|fields| {
            let mut msg = MessageValue::new();
            for (name, value) in fields {
                msg = msg.field(name, value);
            }
            msg
        })
        .boxed()
}

/// Generate a scalar of the given kind.
///
/// Floats are drawn from finite ranges: NaN never round-trips through
/// equality, and the store has no representation for it anyway.
pub fn scalar_for(kind: ScalarKind) -> BoxedStrategy<Scalar> {
    match kind {
        ScalarKind::I32 => any::<i32>().prop_map(Scalar::I32).boxed(),
        ScalarKind::I64 => any::<i64>().prop_map(Scalar::I64).boxed(),
        ScalarKind::U32 => any::<u32>().prop_map(Scalar::U32).boxed(),
        ScalarKind::U64 => any::<u64>().prop_map(Scalar::U64).boxed(),
        ScalarKind::F32 => (-1.0e30f32..1.0e30f32).prop_map(Scalar::F32).boxed(),
        ScalarKind::F64 => (-1.0e300f64..1.0e300f64).prop_map(Scalar::F64).boxed(),
        ScalarKind::Bool => any::<bool>().prop_map(Scalar::Bool).boxed(),
        ScalarKind::String => "[a-z0-9]{0,12}".prop_map(Scalar::Str).boxed(),
        ScalarKind::Bytes => prop::collection::vec(any::<u8>(), 0..16)
            .prop_map(|v| Scalar::Bytes(Bytes::from(v)))
            .boxed(),
        ScalarKind::Enum => any::<i32>().prop_map(Scalar::Enum).boxed(),
        ScalarKind::Message => nested_message().prop_map(Scalar::Message).boxed(),
    }
}

/// Generate a value for one schema field, honoring its repetition.
pub fn field_value_for(field: &FieldSchema) -> BoxedStrategy<FieldValue> {
    if field.repeated {
        prop::collection::vec(scalar_for(field.kind), 0..4)
            .prop_map(FieldValue::Repeated)
            .boxed()
    } else {
        scalar_for(field.kind).prop_map(FieldValue::Single).boxed()
    }
}

/// Generate a complete message value conforming to the schema: every
/// declared field present, kinds matching, declaration order preserved.
pub fn message_for(schema: &MessageSchema) -> BoxedStrategy<MessageValue> {
    let mut strategy: BoxedStrategy<MessageValue> = Just(MessageValue::new()).boxed();
    for field in schema.fields() {
        let name = field.name.clone();
        let value = field_value_for(field);
        strategy = (strategy, value)
            .prop_map(move |(msg, v)| msg.field(name.clone(), v))
            .boxed();
    }
    strategy
}
