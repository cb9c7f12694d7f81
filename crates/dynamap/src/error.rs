//! Error types for the dynamap facade.

use dynamap_core::{CompileError, DecodeError, EncodeError, PayloadError};
use thiserror::Error;

/// Errors that can occur while compiling schema sets or using codecs.
#[derive(Debug, Error)]
pub enum Error {
    /// A message schema failed to compile.
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    /// A message value could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// An envelope could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The binary payload layer failed.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// No codec exists for the requested message.
    #[error("unknown message: {0}")]
    UnknownMessage(String),
}

/// Result type for dynamap operations.
pub type Result<T> = std::result::Result<T, Error>;
