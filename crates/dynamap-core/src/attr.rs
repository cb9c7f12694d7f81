//! Attribute values: the tagged union wire format of the document store.
//!
//! The store understands exactly ten value type markers. Envelopes are
//! ordered label-to-value mappings built from these. Order is preserved
//! for deterministic output, not for correctness; the store itself treats
//! items as unordered maps.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Reserved envelope label holding the message type identity.
pub const TYPE_LABEL: &str = "typ";

/// Reserved envelope label holding the serialized message payload.
pub const PAYLOAD_LABEL: &str = "value";

/// One of the store's ten value type markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireTag {
    Binary,
    Bool,
    BinarySet,
    List,
    Map,
    Number,
    NumberSet,
    Null,
    String,
    StringSet,
}

impl WireTag {
    /// The store-side type code for this tag.
    pub const fn code(self) -> &'static str {
        match self {
            WireTag::Binary => "B",
            WireTag::Bool => "BOOL",
            WireTag::BinarySet => "BS",
            WireTag::List => "L",
            WireTag::Map => "M",
            WireTag::Number => "N",
            WireTag::NumberSet => "NS",
            WireTag::Null => "NULL",
            WireTag::String => "S",
            WireTag::StringSet => "SS",
        }
    }
}

impl fmt::Display for WireTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single tagged value in the store's wire format.
///
/// The serialized form uses the store's exact tag vocabulary
/// (`B, BOOL, BS, L, M, N, NS, NULL, S, SS`); the store validates these
/// shapes itself. Numbers travel as decimal strings, which is how the
/// store represents them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Raw bytes.
    #[serde(rename = "B")]
    B(Bytes),

    /// Boolean.
    #[serde(rename = "BOOL")]
    Bool(bool),

    /// Homogeneous set of byte strings.
    #[serde(rename = "BS")]
    Bs(Vec<Bytes>),

    /// Heterogeneous list.
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),

    /// Nested map of labeled values, order-preserving.
    #[serde(rename = "M")]
    M(Vec<(String, AttributeValue)>),

    /// Number, carried as canonical decimal text.
    #[serde(rename = "N")]
    N(String),

    /// Homogeneous set of numbers.
    #[serde(rename = "NS")]
    Ns(Vec<String>),

    /// Explicit null marker. The store requires the boolean to be `true`.
    #[serde(rename = "NULL")]
    Null(bool),

    /// UTF-8 string.
    #[serde(rename = "S")]
    S(String),

    /// Homogeneous set of strings.
    #[serde(rename = "SS")]
    Ss(Vec<String>),
}

impl AttributeValue {
    /// The wire tag of this value.
    pub const fn tag(&self) -> WireTag {
        match self {
            AttributeValue::B(_) => WireTag::Binary,
            AttributeValue::Bool(_) => WireTag::Bool,
            AttributeValue::Bs(_) => WireTag::BinarySet,
            AttributeValue::L(_) => WireTag::List,
            AttributeValue::M(_) => WireTag::Map,
            AttributeValue::N(_) => WireTag::Number,
            AttributeValue::Ns(_) => WireTag::NumberSet,
            AttributeValue::Null(_) => WireTag::Null,
            AttributeValue::S(_) => WireTag::String,
            AttributeValue::Ss(_) => WireTag::StringSet,
        }
    }

    /// The store's null sentinel.
    pub const fn null() -> Self {
        AttributeValue::Null(true)
    }

    /// The string content, if this is an `S` value.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            _ => None,
        }
    }

    /// The number text, if this is an `N` value.
    pub fn as_n(&self) -> Option<&str> {
        match self {
            AttributeValue::N(n) => Some(n),
            _ => None,
        }
    }

    /// The raw bytes, if this is a `B` value.
    pub fn as_b(&self) -> Option<&Bytes> {
        match self {
            AttributeValue::B(b) => Some(b),
            _ => None,
        }
    }

    /// True if this is the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null(_))
    }
}

/// The top-level record written to the store: an ordered mapping from
/// label to tagged value.
///
/// Labels are unique by construction when the envelope comes out of a
/// compiled codec (collisions are rejected at compile time). `get`
/// returns the first match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Envelope {
    entries: Vec<(String, AttributeValue)>,
}

impl Envelope {
    /// Create an empty envelope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, label: impl Into<String>, value: AttributeValue) {
        self.entries.push((label.into(), value));
    }

    /// Look up an entry by label.
    pub fn get(&self, label: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    /// Replace the entry with the given label, or append if absent.
    pub fn set(&mut self, label: &str, value: AttributeValue) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, v)) => *v = value,
            None => self.entries.push((label.to_string(), value)),
        }
    }

    /// Remove the entry with the given label, if present.
    pub fn remove(&mut self, label: &str) -> Option<AttributeValue> {
        let pos = self.entries.iter().position(|(l, _)| l == label)?;
        Some(self.entries.remove(pos).1)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    /// Iterate labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the envelope has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap the whole envelope in a single `M` attribute value.
    pub fn into_attribute(self) -> AttributeValue {
        AttributeValue::M(self.entries)
    }

    /// Unwrap an `M` attribute value back into an envelope.
    pub fn from_attribute(value: AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::M(entries) => Some(Self { entries }),
            _ => None,
        }
    }
}

impl FromIterator<(String, AttributeValue)> for Envelope {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_codes_match_store_vocabulary() {
        let codes: Vec<&str> = [
            WireTag::Binary,
            WireTag::Bool,
            WireTag::BinarySet,
            WireTag::List,
            WireTag::Map,
            WireTag::Number,
            WireTag::NumberSet,
            WireTag::Null,
            WireTag::String,
            WireTag::StringSet,
        ]
        .iter()
        .map(|t| t.code())
        .collect();
        assert_eq!(
            codes,
            vec!["B", "BOOL", "BS", "L", "M", "N", "NS", "NULL", "S", "SS"]
        );
    }

    #[test]
    fn test_attribute_tag() {
        assert_eq!(AttributeValue::S("x".into()).tag(), WireTag::String);
        assert_eq!(AttributeValue::N("1".into()).tag(), WireTag::Number);
        assert_eq!(AttributeValue::null().tag(), WireTag::Null);
        assert_eq!(AttributeValue::B(Bytes::new()).tag(), WireTag::Binary);
        assert_eq!(AttributeValue::L(vec![]).tag(), WireTag::List);
    }

    #[test]
    fn test_serialized_form_uses_store_tags() {
        let json = serde_json::to_value(AttributeValue::S("alice".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "S": "alice" }));

        let json = serde_json::to_value(AttributeValue::null()).unwrap();
        assert_eq!(json, serde_json::json!({ "NULL": true }));

        let json = serde_json::to_value(AttributeValue::Ns(vec!["1".into(), "2".into()])).unwrap();
        assert_eq!(json, serde_json::json!({ "NS": ["1", "2"] }));
    }

    #[test]
    fn test_envelope_insertion_order() {
        let mut envelope = Envelope::new();
        envelope.push("b", AttributeValue::S("2".into()));
        envelope.push("a", AttributeValue::S("1".into()));

        let labels: Vec<&str> = envelope.labels().collect();
        assert_eq!(labels, vec!["b", "a"]);
    }

    #[test]
    fn test_envelope_get_set_remove() {
        let mut envelope = Envelope::new();
        envelope.push("k", AttributeValue::S("v".into()));

        assert_eq!(envelope.get("k").and_then(|v| v.as_s()), Some("v"));
        assert!(envelope.get("missing").is_none());

        envelope.set("k", AttributeValue::S("w".into()));
        assert_eq!(envelope.get("k").and_then(|v| v.as_s()), Some("w"));
        assert_eq!(envelope.len(), 1);

        let removed = envelope.remove("k");
        assert_eq!(removed, Some(AttributeValue::S("w".into())));
        assert!(envelope.is_empty());
    }

    #[test]
    fn test_envelope_attribute_roundtrip() {
        let mut envelope = Envelope::new();
        envelope.push("x", AttributeValue::Bool(true));
        let wrapped = envelope.clone().into_attribute();
        assert_eq!(wrapped.tag(), WireTag::Map);
        assert_eq!(Envelope::from_attribute(wrapped), Some(envelope));
    }
}
