//! Whole-message binary payload encoding.
//!
//! The `value` envelope entry embeds the complete message in CBOR:
//! self-describing, length-delimited, and independent of which fields
//! are separately exposed. This is what guarantees perfect round-trip
//! of every field, including ones with no wire-format mapping of their
//! own (nested messages in particular).

use bytes::Bytes;

use crate::error::PayloadError;
use crate::message::MessageValue;

/// Serialize a message value to payload bytes.
pub fn encode_payload(msg: &MessageValue) -> Result<Bytes, PayloadError> {
    let mut buf = Vec::new();
    ciborium::into_writer(msg, &mut buf).map_err(|e| PayloadError::Encode(e.to_string()))?;
    Ok(Bytes::from(buf))
}

/// Deserialize payload bytes back into a message value.
pub fn decode_payload(bytes: &[u8]) -> Result<MessageValue, PayloadError> {
    ciborium::from_reader(bytes).map_err(|e| PayloadError::Decode(e.to_string()))
}
