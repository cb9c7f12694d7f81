//! Dynamic message values: the in-memory representation compiled codecs
//! encode and decode.
//!
//! A [`MessageValue`] is an ordered list of named field values. It can
//! carry every scalar kind a schema can declare, including nested
//! messages, so the binary payload round-trips fields that have no
//! wire-format mapping of their own.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::schema::ScalarKind;

/// A single scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(String),
    Bytes(Bytes),
    /// An enum discriminant.
    Enum(i32),
    /// A nested message.
    Message(MessageValue),
}

impl Scalar {
    /// The schema kind this value inhabits.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::I64(_) => ScalarKind::I64,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::U64(_) => ScalarKind::U64,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Str(_) => ScalarKind::String,
            Scalar::Bytes(_) => ScalarKind::Bytes,
            Scalar::Enum(_) => ScalarKind::Enum,
            Scalar::Message(_) => ScalarKind::Message,
        }
    }

    /// Canonical locale-independent decimal text for numeric kinds.
    ///
    /// Integer kinds render base-10; floating-point kinds render the
    /// shortest decimal that round-trips at 64-bit precision (`f32` is
    /// widened to `f64` first). `None` for non-numeric scalars.
    pub fn number_text(&self) -> Option<String> {
        match self {
            Scalar::I32(v) => Some(v.to_string()),
            Scalar::I64(v) => Some(v.to_string()),
            Scalar::U32(v) => Some(v.to_string()),
            Scalar::U64(v) => Some(v.to_string()),
            Scalar::F32(v) => Some(format!("{}", f64::from(*v))),
            Scalar::F64(v) => Some(format!("{}", v)),
            Scalar::Enum(v) => Some(v.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::I32(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::I64(v)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::U32(v)
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Scalar::U64(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::F32(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::F64(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<Bytes> for Scalar {
    fn from(v: Bytes) -> Self {
        Scalar::Bytes(v)
    }
}

impl From<MessageValue> for Scalar {
    fn from(v: MessageValue) -> Self {
        Scalar::Message(v)
    }
}

/// A field's value: one scalar or a repeated sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Single(Scalar),
    Repeated(Vec<Scalar>),
}

impl From<Scalar> for FieldValue {
    fn from(v: Scalar) -> Self {
        FieldValue::Single(v)
    }
}

impl From<Vec<Scalar>> for FieldValue {
    fn from(v: Vec<Scalar>) -> Self {
        FieldValue::Repeated(v)
    }
}

macro_rules! single_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(v: $ty) -> Self {
                    FieldValue::Single(Scalar::from(v))
                }
            }
        )*
    };
}

single_from!(&str, String, i32, i64, u32, u64, f32, f64, bool, Bytes, MessageValue);

/// An ordered set of named field values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageValue {
    fields: Vec<(String, FieldValue)>,
}

impl MessageValue {
    /// An empty message value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, fluent style.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Look up a singular field's scalar.
    pub fn single(&self, name: &str) -> Option<&Scalar> {
        match self.get(name)? {
            FieldValue::Single(s) => Some(s),
            FieldValue::Repeated(_) => None,
        }
    }

    /// Look up a repeated field's elements.
    pub fn repeated(&self, name: &str) -> Option<&[Scalar]> {
        match self.get(name)? {
            FieldValue::Single(_) => None,
            FieldValue::Repeated(v) => Some(v),
        }
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no fields are set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
