//! Wire-tag classification: one tag per (repetition, set option, kind).
//!
//! Classification is a pure function with no hidden state. Every input
//! combination either yields a tag or a typed configuration error; there
//! is no fallthrough and no silent default.

use crate::attr::WireTag;
use crate::error::ConfigError;
use crate::schema::{FieldSchema, ScalarKind};

/// Select the wire tag for a field shape.
///
/// `field` is the field name, carried only for error reporting.
///
/// Rules, in priority order:
/// 1. `as_set` on a singular field is a configuration error.
/// 2. Repeated without `as_set` is a `List`.
/// 3. Repeated with `as_set`: numeric and enum kinds form a `NumberSet`,
///    strings a `StringSet`, bytes a `BinarySet`; sets of booleans or
///    nested messages are not supported.
/// 4. Singular: numeric and enum kinds are `Number`, plus the obvious
///    `Bool`/`String`/`Binary` mappings. A singular nested message
///    classifies as `Map`; the `Map` encoder is intentionally
///    unimplemented, so exposing such a field fails codec compilation.
pub fn classify(
    field: &str,
    repeated: bool,
    as_set: bool,
    kind: ScalarKind,
) -> Result<WireTag, ConfigError> {
    if as_set && !repeated {
        return Err(ConfigError::SetOnSingularField {
            field: field.to_string(),
        });
    }

    if repeated {
        if !as_set {
            return Ok(WireTag::List);
        }
        return match kind {
            ScalarKind::I32
            | ScalarKind::I64
            | ScalarKind::U32
            | ScalarKind::U64
            | ScalarKind::F32
            | ScalarKind::F64
            | ScalarKind::Enum => Ok(WireTag::NumberSet),
            ScalarKind::String => Ok(WireTag::StringSet),
            ScalarKind::Bytes => Ok(WireTag::BinarySet),
            ScalarKind::Bool | ScalarKind::Message => Err(ConfigError::UnsupportedSetKind {
                field: field.to_string(),
                kind,
            }),
        };
    }

    match kind {
        ScalarKind::I32
        | ScalarKind::I64
        | ScalarKind::U32
        | ScalarKind::U64
        | ScalarKind::F32
        | ScalarKind::F64
        | ScalarKind::Enum => Ok(WireTag::Number),
        ScalarKind::Bool => Ok(WireTag::Bool),
        ScalarKind::String => Ok(WireTag::String),
        ScalarKind::Bytes => Ok(WireTag::Binary),
        ScalarKind::Message => Ok(WireTag::Map),
    }
}

/// Classify a schema field.
pub fn classify_field(field: &FieldSchema) -> Result<WireTag, ConfigError> {
    classify(&field.name, field.repeated, field.options.as_set, field.kind)
}
