//! Compound keys: deterministic string concatenation of source fields.
//!
//! A key spec is validated against its owning schema once, at compile
//! time; rendering is then a pure string build over a message value.

use crate::error::{ConfigError, EncodeError};
use crate::message::{MessageValue, Scalar};
use crate::schema::{KeySpec, MessageSchema, ScalarKind};

/// One segment of a compiled key.
#[derive(Debug, Clone)]
struct KeyPart {
    field: String,
    kind: ScalarKind,
}

/// A key spec validated against its owning schema, ready to render.
#[derive(Debug, Clone)]
pub struct CompiledKey {
    label: String,
    prefix: Option<String>,
    separator: String,
    parts: Vec<KeyPart>,
}

impl CompiledKey {
    /// Validate a key spec against its owning schema.
    ///
    /// Every referenced field must exist, be singular, and be of string
    /// or numeric kind.
    pub fn compile(spec: &KeySpec, schema: &MessageSchema) -> Result<Self, ConfigError> {
        let mut parts = Vec::with_capacity(spec.fields.len());
        for name in &spec.fields {
            let field = schema.field(name).ok_or_else(|| ConfigError::KeyFieldMissing {
                key: spec.name.clone(),
                field: name.clone(),
            })?;
            if field.repeated {
                return Err(ConfigError::KeyFieldRepeated {
                    key: spec.name.clone(),
                    field: name.clone(),
                });
            }
            if !field.kind.is_keyable() {
                return Err(ConfigError::KeyFieldKind {
                    key: spec.name.clone(),
                    field: name.clone(),
                    kind: field.kind,
                });
            }
            parts.push(KeyPart {
                field: name.clone(),
                kind: field.kind,
            });
        }

        // An empty prefix means no prefix segment at all.
        let prefix = spec.prefix.clone().filter(|p| !p.is_empty());

        Ok(Self {
            label: spec.name.clone(),
            prefix,
            separator: spec.separator_or_default().to_string(),
            parts,
        })
    }

    /// The envelope label this key is stored under.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Render the key string for a message value.
    ///
    /// Produces `prefix + sep + f1 + sep + ... + sep + fn`, with the
    /// prefix segment present only when a non-empty prefix was declared.
    /// String segments are concatenated verbatim; there is no escaping,
    /// so callers must choose separators that cannot occur in field
    /// content.
    pub fn render(&self, msg: &MessageValue) -> Result<String, EncodeError> {
        let mut out = String::new();
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
            out.push_str(&self.separator);
        }
        let mut first = true;
        for part in &self.parts {
            if !first {
                out.push_str(&self.separator);
            }
            first = false;

            let scalar = lookup_singular(msg, &part.field)?;
            match (part.kind, scalar) {
                (ScalarKind::String, Scalar::Str(s)) => out.push_str(s),
                (kind, scalar) if scalar.kind() == kind => {
                    let text = scalar.number_text().ok_or_else(|| EncodeError::WrongKind {
                        field: part.field.clone(),
                        expected: kind,
                        actual: scalar.kind(),
                    })?;
                    out.push_str(&text);
                }
                (kind, scalar) => {
                    return Err(EncodeError::WrongKind {
                        field: part.field.clone(),
                        expected: kind,
                        actual: scalar.kind(),
                    });
                }
            }
        }
        Ok(out)
    }
}

fn lookup_singular<'a>(msg: &'a MessageValue, field: &str) -> Result<&'a Scalar, EncodeError> {
    match msg.get(field) {
        Some(crate::message::FieldValue::Single(s)) => Ok(s),
        Some(crate::message::FieldValue::Repeated(_)) => Err(EncodeError::ExpectedSingular {
            field: field.to_string(),
        }),
        None => Err(EncodeError::MissingField {
            field: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSchema, MessageSchema};

    fn schema() -> MessageSchema {
        MessageSchema::builder("example", "pkg", "User")
            .field(FieldSchema::new("name", ScalarKind::String))
            .field(FieldSchema::new("age", ScalarKind::U32))
            .field(FieldSchema::new("score", ScalarKind::F64))
            .field(FieldSchema::new("level", ScalarKind::Enum))
            .field(FieldSchema::new("tags", ScalarKind::String).repeated())
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_with_prefix() {
        let spec = KeySpec::new("partitionKey", ["name"]).prefix("USER");
        let key = CompiledKey::compile(&spec, &schema()).unwrap();
        let msg = MessageValue::new().field("name", "alice");
        assert_eq!(key.render(&msg).unwrap(), "USER:alice");
    }

    #[test]
    fn test_render_without_prefix() {
        let spec = KeySpec::new("k", ["name", "age"]);
        let key = CompiledKey::compile(&spec, &schema()).unwrap();
        let msg = MessageValue::new().field("name", "alice").field("age", 30u32);
        assert_eq!(key.render(&msg).unwrap(), "alice:30");
    }

    #[test]
    fn test_render_empty_prefix_means_none() {
        let spec = KeySpec::new("k", ["name"]).prefix("");
        let key = CompiledKey::compile(&spec, &schema()).unwrap();
        let msg = MessageValue::new().field("name", "alice");
        assert_eq!(key.render(&msg).unwrap(), "alice");
    }

    #[test]
    fn test_render_custom_separator() {
        let spec = KeySpec::new("k", ["name", "age"]).prefix("U").separator("#");
        let key = CompiledKey::compile(&spec, &schema()).unwrap();
        let msg = MessageValue::new().field("name", "alice").field("age", 30u32);
        assert_eq!(key.render(&msg).unwrap(), "U#alice#30");
    }

    #[test]
    fn test_render_float_shortest_roundtrip() {
        let spec = KeySpec::new("k", ["score"]);
        let key = CompiledKey::compile(&spec, &schema()).unwrap();
        let msg = MessageValue::new().field("score", 0.5f64);
        assert_eq!(key.render(&msg).unwrap(), "0.5");
    }

    #[test]
    fn test_render_separator_collision_is_verbatim() {
        // Documented limitation: field content containing the separator
        // is concatenated as-is.
        let spec = KeySpec::new("k", ["name", "age"]);
        let key = CompiledKey::compile(&spec, &schema()).unwrap();
        let msg = MessageValue::new().field("name", "a:b").field("age", 1u32);
        assert_eq!(key.render(&msg).unwrap(), "a:b:1");
    }

    #[test]
    fn test_compile_missing_field() {
        let spec = KeySpec::new("k", ["nope"]);
        assert!(matches!(
            CompiledKey::compile(&spec, &schema()),
            Err(ConfigError::KeyFieldMissing { key, field }) if key == "k" && field == "nope"
        ));
    }

    #[test]
    fn test_compile_repeated_field_rejected() {
        let spec = KeySpec::new("k", ["tags"]);
        assert!(matches!(
            CompiledKey::compile(&spec, &schema()),
            Err(ConfigError::KeyFieldRepeated { .. })
        ));
    }

    #[test]
    fn test_compile_enum_field_rejected() {
        let spec = KeySpec::new("k", ["level"]);
        assert!(matches!(
            CompiledKey::compile(&spec, &schema()),
            Err(ConfigError::KeyFieldKind { kind: ScalarKind::Enum, .. })
        ));
    }

    #[test]
    fn test_render_missing_field_value() {
        let spec = KeySpec::new("k", ["name"]);
        let key = CompiledKey::compile(&spec, &schema()).unwrap();
        let msg = MessageValue::new();
        assert!(matches!(
            key.render(&msg),
            Err(EncodeError::MissingField { field }) if field == "name"
        ));
    }

    #[test]
    fn test_render_wrong_kind_value() {
        let spec = KeySpec::new("k", ["age"]);
        let key = CompiledKey::compile(&spec, &schema()).unwrap();
        let msg = MessageValue::new().field("age", "not-a-number");
        assert!(matches!(
            key.render(&msg),
            Err(EncodeError::WrongKind {
                expected: ScalarKind::U32,
                actual: ScalarKind::String,
                ..
            })
        ));
    }

    #[test]
    fn test_render_deterministic() {
        let spec = KeySpec::new("k", ["name", "age", "score"]).prefix("P");
        let key = CompiledKey::compile(&spec, &schema()).unwrap();
        let msg = MessageValue::new()
            .field("name", "alice")
            .field("age", 30u32)
            .field("score", 2.25f64);
        assert_eq!(key.render(&msg).unwrap(), key.render(&msg).unwrap());
        assert_eq!(key.render(&msg).unwrap(), "P:alice:30:2.25");
    }
}
