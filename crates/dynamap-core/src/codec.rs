//! Message codecs: compiled envelope encode/decode plans.
//!
//! [`MessageCodec::compile`] turns one message schema into a plan: the
//! compiled computed keys, plus one per-tag construction rule for every
//! exposed field. Compilation is where every configuration error
//! surfaces; a compiled codec encodes and decodes without further
//! configuration checks.
//!
//! Decoding reverses only the envelope layer. Computed keys and exposed
//! fields are derived, denormalized copies for store-side indexing; the
//! binary payload is the single authoritative representation, so no
//! per-field decode rules exist.

use std::collections::BTreeSet;

use crate::attr::{AttributeValue, Envelope, WireTag, PAYLOAD_LABEL, TYPE_LABEL};
use crate::classify::classify_field;
use crate::error::{CompileError, ConfigError, DecodeError, EncodeError};
use crate::keys::CompiledKey;
use crate::message::{FieldValue, MessageValue, Scalar};
use crate::payload::{decode_payload, encode_payload};
use crate::schema::{FieldSchema, MessageSchema, ScalarKind};

/// Element construction rule for lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementRule {
    Number,
    String,
}

/// The construction rule for one exposed field.
///
/// Impossible tag/shape combinations are unrepresentable here: the plan
/// is derived from the classifier output at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldPlan {
    Bool,
    Number,
    String,
    Binary,
    List(ElementRule),
    NumberSet,
    StringSet,
    BinarySet,
}

/// A compiled exposed field: envelope label, declared kind, and rule.
#[derive(Debug, Clone)]
struct ExposedField {
    name: String,
    kind: ScalarKind,
    plan: FieldPlan,
}

/// A compiled encode/decode mapping for one message schema.
#[derive(Debug, Clone)]
pub struct MessageCodec {
    message: String,
    type_identity: String,
    keys: Vec<CompiledKey>,
    exposed: Vec<ExposedField>,
}

impl MessageCodec {
    /// Compile a codec from a schema.
    ///
    /// Collects every configuration problem before failing, so a host
    /// can report all of a message's errors in one pass. A failure here
    /// never affects other messages.
    pub fn compile(schema: &MessageSchema) -> Result<Self, CompileError> {
        let mut errors = Vec::new();

        let mut keys = Vec::new();
        for spec in schema.key_specs() {
            match CompiledKey::compile(spec, schema) {
                Ok(key) => keys.push(key),
                Err(e) => errors.push(e),
            }
        }

        let mut exposed = Vec::new();
        for field in schema.fields() {
            if !field.options.expose {
                continue;
            }
            match compile_exposed(field) {
                Ok(plan) => exposed.push(plan),
                Err(e) => errors.push(e),
            }
        }

        // Computed keys, exposed fields, and the reserved labels all
        // share one namespace; collisions are rejected, never overwritten.
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        seen.insert(TYPE_LABEL);
        seen.insert(PAYLOAD_LABEL);
        let labels = keys
            .iter()
            .map(|k| k.label())
            .chain(exposed.iter().map(|x| x.name.as_str()));
        for label in labels {
            if !seen.insert(label) {
                errors.push(ConfigError::LabelCollision {
                    label: label.to_string(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(CompileError {
                message: schema.name().to_string(),
                errors,
            });
        }

        Ok(Self {
            message: schema.name().to_string(),
            type_identity: schema.type_identity(),
            keys,
            exposed,
        })
    }

    /// The message name this codec was compiled from.
    pub fn message_name(&self) -> &str {
        &self.message
    }

    /// The fully-qualified type identity written under `typ`.
    pub fn type_identity(&self) -> &str {
        &self.type_identity
    }

    /// Encode a message value into an envelope.
    ///
    /// Entry order: computed keys (partition, sort, compounds), then
    /// `value`, then `typ`, then exposed fields in declaration order.
    /// Labels are unique, so the order only makes output deterministic.
    pub fn encode(&self, msg: &MessageValue) -> Result<Envelope, EncodeError> {
        let mut envelope = Envelope::new();

        for key in &self.keys {
            let rendered = key.render(msg)?;
            envelope.push(key.label(), AttributeValue::S(rendered));
        }

        envelope.push(PAYLOAD_LABEL, AttributeValue::B(encode_payload(msg)?));
        envelope.push(TYPE_LABEL, AttributeValue::S(self.type_identity.clone()));

        for field in &self.exposed {
            envelope.push(field.name.clone(), encode_exposed(field, msg)?);
        }

        Ok(envelope)
    }

    /// Encode a message value into a single `M` attribute wrapping the
    /// envelope.
    pub fn encode_attribute(&self, msg: &MessageValue) -> Result<AttributeValue, EncodeError> {
        Ok(self.encode(msg)?.into_attribute())
    }

    /// Decode an envelope back into a message value.
    ///
    /// Reads `typ` and `value` only; every other entry is derived and
    /// ignored. Payload failures propagate unchanged.
    pub fn decode(&self, envelope: &Envelope) -> Result<MessageValue, DecodeError> {
        let typ = envelope.get(TYPE_LABEL).ok_or_else(|| DecodeError::MissingEntry {
            label: TYPE_LABEL.to_string(),
        })?;
        let actual = match typ {
            AttributeValue::S(s) => s,
            other => {
                return Err(DecodeError::UnexpectedTag {
                    label: TYPE_LABEL.to_string(),
                    tag: other.tag().code(),
                });
            }
        };
        if actual != &self.type_identity {
            return Err(DecodeError::TypeMismatch {
                expected: self.type_identity.clone(),
                actual: actual.clone(),
            });
        }

        let payload = envelope.get(PAYLOAD_LABEL).ok_or_else(|| DecodeError::MissingEntry {
            label: PAYLOAD_LABEL.to_string(),
        })?;
        let bytes = match payload {
            AttributeValue::B(b) => b,
            other => {
                return Err(DecodeError::UnexpectedTag {
                    label: PAYLOAD_LABEL.to_string(),
                    tag: other.tag().code(),
                });
            }
        };

        Ok(decode_payload(bytes)?)
    }
}

/// Derive the construction rule for one exposed field.
fn compile_exposed(field: &FieldSchema) -> Result<ExposedField, ConfigError> {
    let tag = classify_field(field)?;
    let plan = match tag {
        WireTag::Bool => FieldPlan::Bool,
        WireTag::Number => FieldPlan::Number,
        WireTag::String => FieldPlan::String,
        WireTag::Binary => FieldPlan::Binary,
        WireTag::NumberSet => FieldPlan::NumberSet,
        WireTag::StringSet => FieldPlan::StringSet,
        WireTag::BinarySet => FieldPlan::BinarySet,
        WireTag::Map => {
            // Declared but unimplemented: fail loudly instead of
            // emitting a partial encoder.
            return Err(ConfigError::NestedMessageUnsupported {
                field: field.name.clone(),
            });
        }
        WireTag::List => match field.kind {
            k if k.is_numeric() => FieldPlan::List(ElementRule::Number),
            ScalarKind::String => FieldPlan::List(ElementRule::String),
            other => {
                return Err(ConfigError::UnsupportedListKind {
                    field: field.name.clone(),
                    kind: other,
                });
            }
        },
        WireTag::Null => unreachable!("classifier never yields NULL"),
    };
    Ok(ExposedField {
        name: field.name.clone(),
        kind: field.kind,
        plan,
    })
}

/// Construct the attribute value for one exposed field.
///
/// Empty strings, byte strings, and sets become the explicit null
/// sentinel: the store rejects them as attribute values. Empty lists
/// are valid and stay lists.
fn encode_exposed(field: &ExposedField, msg: &MessageValue) -> Result<AttributeValue, EncodeError> {
    match field.plan {
        FieldPlan::Bool => match expect_single(msg, &field.name)? {
            Scalar::Bool(b) => Ok(AttributeValue::Bool(*b)),
            other => Err(wrong_kind(&field.name, field.kind, other)),
        },
        FieldPlan::Number => {
            let scalar = expect_single(msg, &field.name)?;
            number_text_checked(&field.name, field.kind, scalar).map(AttributeValue::N)
        }
        FieldPlan::String => match expect_single(msg, &field.name)? {
            Scalar::Str(s) if s.is_empty() => Ok(AttributeValue::null()),
            Scalar::Str(s) => Ok(AttributeValue::S(s.clone())),
            other => Err(wrong_kind(&field.name, field.kind, other)),
        },
        FieldPlan::Binary => match expect_single(msg, &field.name)? {
            Scalar::Bytes(b) if b.is_empty() => Ok(AttributeValue::null()),
            Scalar::Bytes(b) => Ok(AttributeValue::B(b.clone())),
            other => Err(wrong_kind(&field.name, field.kind, other)),
        },
        FieldPlan::List(rule) => {
            let elements = expect_repeated(msg, &field.name)?;
            let mut items = Vec::with_capacity(elements.len());
            for scalar in elements {
                let item = match rule {
                    ElementRule::Number => {
                        AttributeValue::N(number_text_checked(&field.name, field.kind, scalar)?)
                    }
                    ElementRule::String => match scalar {
                        Scalar::Str(s) => AttributeValue::S(s.clone()),
                        other => return Err(wrong_kind(&field.name, field.kind, other)),
                    },
                };
                items.push(item);
            }
            Ok(AttributeValue::L(items))
        }
        FieldPlan::NumberSet => {
            let elements = expect_repeated(msg, &field.name)?;
            if elements.is_empty() {
                return Ok(AttributeValue::null());
            }
            let mut items = Vec::with_capacity(elements.len());
            for scalar in elements {
                items.push(number_text_checked(&field.name, field.kind, scalar)?);
            }
            Ok(AttributeValue::Ns(items))
        }
        FieldPlan::StringSet => {
            let elements = expect_repeated(msg, &field.name)?;
            if elements.is_empty() {
                return Ok(AttributeValue::null());
            }
            let mut items = Vec::with_capacity(elements.len());
            for scalar in elements {
                match scalar {
                    Scalar::Str(s) => items.push(s.clone()),
                    other => return Err(wrong_kind(&field.name, field.kind, other)),
                }
            }
            Ok(AttributeValue::Ss(items))
        }
        FieldPlan::BinarySet => {
            let elements = expect_repeated(msg, &field.name)?;
            if elements.is_empty() {
                return Ok(AttributeValue::null());
            }
            let mut items = Vec::with_capacity(elements.len());
            for scalar in elements {
                match scalar {
                    Scalar::Bytes(b) => items.push(b.clone()),
                    other => return Err(wrong_kind(&field.name, field.kind, other)),
                }
            }
            Ok(AttributeValue::Bs(items))
        }
    }
}

fn expect_single<'a>(msg: &'a MessageValue, field: &str) -> Result<&'a Scalar, EncodeError> {
    match msg.get(field) {
        Some(FieldValue::Single(s)) => Ok(s),
        Some(FieldValue::Repeated(_)) => Err(EncodeError::ExpectedSingular {
            field: field.to_string(),
        }),
        None => Err(EncodeError::MissingField {
            field: field.to_string(),
        }),
    }
}

fn expect_repeated<'a>(msg: &'a MessageValue, field: &str) -> Result<&'a [Scalar], EncodeError> {
    match msg.get(field) {
        Some(FieldValue::Repeated(v)) => Ok(v),
        Some(FieldValue::Single(_)) => Err(EncodeError::ExpectedRepeated {
            field: field.to_string(),
        }),
        None => Err(EncodeError::MissingField {
            field: field.to_string(),
        }),
    }
}

fn number_text_checked(
    field: &str,
    expected: ScalarKind,
    scalar: &Scalar,
) -> Result<String, EncodeError> {
    if scalar.kind() != expected {
        return Err(wrong_kind(field, expected, scalar));
    }
    scalar
        .number_text()
        .ok_or_else(|| wrong_kind(field, expected, scalar))
}

fn wrong_kind(field: &str, expected: ScalarKind, actual: &Scalar) -> EncodeError {
    EncodeError::WrongKind {
        field: field.to_string(),
        expected,
        actual: actual.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KeySpec;
    use bytes::Bytes;

    fn user_schema() -> MessageSchema {
        MessageSchema::builder("example", "pkg", "User")
            .field(FieldSchema::new("name", ScalarKind::String))
            .field(FieldSchema::new("age", ScalarKind::U32).exposed())
            .partition_key(KeySpec::new("partitionKey", ["name"]).prefix("USER"))
            .build()
            .unwrap()
    }

    fn user_message() -> MessageValue {
        MessageValue::new().field("name", "alice").field("age", 30u32)
    }

    #[test]
    fn test_user_envelope() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let envelope = codec.encode(&user_message()).unwrap();

        let labels: Vec<&str> = envelope.labels().collect();
        assert_eq!(labels, vec!["partitionKey", "value", "typ", "age"]);

        assert_eq!(
            envelope.get("partitionKey").and_then(|v| v.as_s()),
            Some("USER:alice")
        );
        assert_eq!(
            envelope.get("typ").and_then(|v| v.as_s()),
            Some("type.example/pkg.User")
        );
        assert_eq!(envelope.get("age").and_then(|v| v.as_n()), Some("30"));
        assert!(envelope.get("value").and_then(|v| v.as_b()).is_some());
    }

    #[test]
    fn test_envelope_roundtrip() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let msg = user_message();
        let envelope = codec.encode(&msg).unwrap();
        let decoded = codec.decode(&envelope).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_encode_attribute_wraps_envelope() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let attr = codec.encode_attribute(&user_message()).unwrap();
        assert_eq!(attr.tag(), WireTag::Map);

        let envelope = Envelope::from_attribute(attr).unwrap();
        assert_eq!(codec.decode(&envelope).unwrap(), user_message());
    }

    #[test]
    fn test_empty_string_becomes_null() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("title", ScalarKind::String).exposed())
            .build()
            .unwrap();
        let codec = MessageCodec::compile(&schema).unwrap();

        let envelope = codec
            .encode(&MessageValue::new().field("title", ""))
            .unwrap();
        assert!(envelope.get("title").unwrap().is_null());

        let envelope = codec
            .encode(&MessageValue::new().field("title", "x"))
            .unwrap();
        assert_eq!(envelope.get("title").and_then(|v| v.as_s()), Some("x"));
    }

    #[test]
    fn test_empty_bytes_becomes_null() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("blob", ScalarKind::Bytes).exposed())
            .build()
            .unwrap();
        let codec = MessageCodec::compile(&schema).unwrap();

        let envelope = codec
            .encode(&MessageValue::new().field("blob", Bytes::new()))
            .unwrap();
        assert!(envelope.get("blob").unwrap().is_null());

        let envelope = codec
            .encode(&MessageValue::new().field("blob", Bytes::from_static(b"\x01")))
            .unwrap();
        assert_eq!(
            envelope.get("blob").and_then(|v| v.as_b()),
            Some(&Bytes::from_static(b"\x01"))
        );
    }

    #[test]
    fn test_bool_always_present() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("active", ScalarKind::Bool).exposed())
            .build()
            .unwrap();
        let codec = MessageCodec::compile(&schema).unwrap();

        let envelope = codec
            .encode(&MessageValue::new().field("active", false))
            .unwrap();
        assert_eq!(envelope.get("active"), Some(&AttributeValue::Bool(false)));
    }

    #[test]
    fn test_empty_list_stays_list() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("scores", ScalarKind::I32).repeated().exposed())
            .build()
            .unwrap();
        let codec = MessageCodec::compile(&schema).unwrap();

        let envelope = codec
            .encode(&MessageValue::new().field("scores", Vec::<Scalar>::new()))
            .unwrap();
        assert_eq!(envelope.get("scores"), Some(&AttributeValue::L(vec![])));
    }

    #[test]
    fn test_list_elements() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("scores", ScalarKind::I32).repeated().exposed())
            .field(FieldSchema::new("names", ScalarKind::String).repeated().exposed())
            .build()
            .unwrap();
        let codec = MessageCodec::compile(&schema).unwrap();

        let msg = MessageValue::new()
            .field("scores", vec![Scalar::I32(1), Scalar::I32(-2)])
            .field("names", vec![Scalar::from("a"), Scalar::from("b")]);
        let envelope = codec.encode(&msg).unwrap();

        assert_eq!(
            envelope.get("scores"),
            Some(&AttributeValue::L(vec![
                AttributeValue::N("1".into()),
                AttributeValue::N("-2".into()),
            ]))
        );
        assert_eq!(
            envelope.get("names"),
            Some(&AttributeValue::L(vec![
                AttributeValue::S("a".into()),
                AttributeValue::S("b".into()),
            ]))
        );
    }

    #[test]
    fn test_empty_set_becomes_null() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("tags", ScalarKind::String).repeated().as_set().exposed())
            .build()
            .unwrap();
        let codec = MessageCodec::compile(&schema).unwrap();

        let envelope = codec
            .encode(&MessageValue::new().field("tags", Vec::<Scalar>::new()))
            .unwrap();
        assert!(envelope.get("tags").unwrap().is_null());
    }

    #[test]
    fn test_set_values_preserved() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("tags", ScalarKind::String).repeated().as_set().exposed())
            .field(FieldSchema::new("ids", ScalarKind::U64).repeated().as_set().exposed())
            .field(FieldSchema::new("digests", ScalarKind::Bytes).repeated().as_set().exposed())
            .build()
            .unwrap();
        let codec = MessageCodec::compile(&schema).unwrap();

        let msg = MessageValue::new()
            .field("tags", vec![Scalar::from("x"), Scalar::from("y")])
            .field("ids", vec![Scalar::U64(7), Scalar::U64(8)])
            .field(
                "digests",
                vec![
                    Scalar::Bytes(Bytes::from_static(b"\xaa")),
                    Scalar::Bytes(Bytes::from_static(b"\xbb")),
                ],
            );
        let envelope = codec.encode(&msg).unwrap();

        assert_eq!(
            envelope.get("tags"),
            Some(&AttributeValue::Ss(vec!["x".into(), "y".into()]))
        );
        assert_eq!(
            envelope.get("ids"),
            Some(&AttributeValue::Ns(vec!["7".into(), "8".into()]))
        );
        assert_eq!(
            envelope.get("digests"),
            Some(&AttributeValue::Bs(vec![
                Bytes::from_static(b"\xaa"),
                Bytes::from_static(b"\xbb"),
            ]))
        );
    }

    #[test]
    fn test_exposed_nested_message_fails_compile() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("meta", ScalarKind::Message).exposed())
            .build()
            .unwrap();
        let err = MessageCodec::compile(&schema).unwrap_err();
        assert_eq!(err.message, "Doc");
        assert!(matches!(
            err.errors.as_slice(),
            [ConfigError::NestedMessageUnsupported { field }] if field == "meta"
        ));
    }

    #[test]
    fn test_unexposed_nested_message_compiles_and_roundtrips() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("id", ScalarKind::String))
            .field(FieldSchema::new("meta", ScalarKind::Message))
            .build()
            .unwrap();
        let codec = MessageCodec::compile(&schema).unwrap();

        let msg = MessageValue::new()
            .field("id", "doc-1")
            .field("meta", MessageValue::new().field("x", 1i32));
        let envelope = codec.encode(&msg).unwrap();
        assert!(envelope.get("meta").is_none());
        assert_eq!(codec.decode(&envelope).unwrap(), msg);
    }

    #[test]
    fn test_set_on_singular_fails_compile() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("oops", ScalarKind::String).as_set().exposed())
            .build()
            .unwrap();
        let err = MessageCodec::compile(&schema).unwrap_err();
        assert!(matches!(
            err.errors.as_slice(),
            [ConfigError::SetOnSingularField { .. }]
        ));
    }

    #[test]
    fn test_list_of_bool_fails_compile() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("flags", ScalarKind::Bool).repeated().exposed())
            .build()
            .unwrap();
        let err = MessageCodec::compile(&schema).unwrap_err();
        assert!(matches!(
            err.errors.as_slice(),
            [ConfigError::UnsupportedListKind { kind: ScalarKind::Bool, .. }]
        ));
    }

    #[test]
    fn test_reserved_label_collision_rejected() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("id", ScalarKind::String))
            .partition_key(KeySpec::new("typ", ["id"]))
            .build()
            .unwrap();
        let err = MessageCodec::compile(&schema).unwrap_err();
        assert!(matches!(
            err.errors.as_slice(),
            [ConfigError::LabelCollision { label }] if label == "typ"
        ));
    }

    #[test]
    fn test_key_and_exposed_label_collision_rejected() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("id", ScalarKind::String).exposed())
            .partition_key(KeySpec::new("id", ["id"]))
            .build()
            .unwrap();
        let err = MessageCodec::compile(&schema).unwrap_err();
        assert!(matches!(
            err.errors.as_slice(),
            [ConfigError::LabelCollision { label }] if label == "id"
        ));
    }

    #[test]
    fn test_all_errors_reported_in_one_pass() {
        let schema = MessageSchema::builder("example", "pkg", "Doc")
            .field(FieldSchema::new("meta", ScalarKind::Message).exposed())
            .field(FieldSchema::new("oops", ScalarKind::Bool).as_set().exposed())
            .partition_key(KeySpec::new("pk", ["missing"]))
            .build()
            .unwrap();
        let err = MessageCodec::compile(&schema).unwrap_err();
        assert_eq!(err.errors.len(), 3);
    }

    #[test]
    fn test_decode_type_mismatch() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let mut envelope = codec.encode(&user_message()).unwrap();
        envelope.set("typ", AttributeValue::S("type.example/pkg.Other".into()));

        let err = codec.decode(&envelope).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TypeMismatch { expected, actual }
                if expected == "type.example/pkg.User" && actual == "type.example/pkg.Other"
        ));
    }

    #[test]
    fn test_decode_missing_typ() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let mut envelope = codec.encode(&user_message()).unwrap();
        envelope.remove("typ");

        assert!(matches!(
            codec.decode(&envelope),
            Err(DecodeError::MissingEntry { label }) if label == "typ"
        ));
    }

    #[test]
    fn test_decode_missing_value() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let mut envelope = codec.encode(&user_message()).unwrap();
        envelope.remove("value");

        assert!(matches!(
            codec.decode(&envelope),
            Err(DecodeError::MissingEntry { label }) if label == "value"
        ));
    }

    #[test]
    fn test_decode_wrong_tag_on_reserved_entry() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let mut envelope = codec.encode(&user_message()).unwrap();
        envelope.set("typ", AttributeValue::N("1".into()));

        assert!(matches!(
            codec.decode(&envelope),
            Err(DecodeError::UnexpectedTag { label, tag: "N" }) if label == "typ"
        ));
    }

    #[test]
    fn test_decode_ignores_derived_entries() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let msg = user_message();
        let mut envelope = codec.encode(&msg).unwrap();

        // Corrupt every derived entry; decode reads the payload only.
        envelope.set("partitionKey", AttributeValue::S("garbage".into()));
        envelope.set("age", AttributeValue::N("999".into()));
        envelope.push("extra", AttributeValue::Bool(true));

        assert_eq!(codec.decode(&envelope).unwrap(), msg);
    }

    #[test]
    fn test_encode_missing_field_value() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let msg = MessageValue::new().field("name", "alice");
        assert!(matches!(
            codec.encode(&msg),
            Err(EncodeError::MissingField { field }) if field == "age"
        ));
    }

    #[test]
    fn test_encode_wrong_shape() {
        let codec = MessageCodec::compile(&user_schema()).unwrap();
        let msg = MessageValue::new()
            .field("name", "alice")
            .field("age", vec![Scalar::U32(30)]);
        assert!(matches!(
            codec.encode(&msg),
            Err(EncodeError::ExpectedSingular { field }) if field == "age"
        ));
    }
}
