//! Schema-set compilation: the driver that walks message schemas and
//! collects compiled codecs.
//!
//! Messages are independent: one message's configuration errors never
//! corrupt or abort another message's codec. Failures are returned in a
//! caller-owned collection rather than reported through any shared sink,
//! unless the host opts into fail-fast.

use dynamap_core::{CompileError, Envelope, MessageCodec, MessageSchema, MessageValue};

use crate::error::{Error, Result};

/// Configuration for the schema compiler.
#[derive(Debug, Clone, Default)]
pub struct CompilerConfig {
    /// Abort on the first message that fails to compile instead of
    /// collecting failures and continuing.
    pub fail_fast: bool,
}

/// Compiles message schemas into a [`CodecSet`].
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    config: CompilerConfig,
}

/// The result of compiling a schema set: the codecs that compiled, plus
/// every per-message failure.
#[derive(Debug)]
pub struct CompileOutcome {
    /// Codecs for every non-disabled message that compiled cleanly.
    pub codecs: CodecSet,
    /// One entry per message that failed, in input order. Empty unless
    /// some message had configuration errors.
    pub failures: Vec<CompileError>,
}

impl CompileOutcome {
    /// Treat any failure as fatal: the codec set if every message
    /// compiled, otherwise the first failure.
    pub fn into_result(mut self) -> Result<CodecSet> {
        if self.failures.is_empty() {
            Ok(self.codecs)
        } else {
            Err(Error::Compile(self.failures.remove(0)))
        }
    }
}

impl SchemaCompiler {
    /// A compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Compile every non-disabled message in the set.
    ///
    /// Disabled messages are skipped. With `fail_fast`, the first
    /// failing message aborts the run; otherwise failures are collected
    /// in the outcome and the remaining messages still compile.
    pub fn compile(&self, schemas: &[MessageSchema]) -> Result<CompileOutcome> {
        let mut codecs = Vec::new();
        let mut failures = Vec::new();

        for schema in schemas {
            if schema.options().disabled {
                tracing::debug!("skipping disabled message '{}'", schema.name());
                continue;
            }
            match MessageCodec::compile(schema) {
                Ok(codec) => codecs.push(codec),
                Err(err) => {
                    tracing::warn!("message '{}' failed to compile: {}", schema.name(), err);
                    if self.config.fail_fast {
                        return Err(err.into());
                    }
                    failures.push(err);
                }
            }
        }

        Ok(CompileOutcome {
            codecs: CodecSet { codecs },
            failures,
        })
    }
}

/// A set of compiled codecs, looked up by message name or type identity.
#[derive(Debug, Clone, Default)]
pub struct CodecSet {
    codecs: Vec<MessageCodec>,
}

impl CodecSet {
    /// Look up a codec by message name.
    pub fn get(&self, message: &str) -> Option<&MessageCodec> {
        self.codecs.iter().find(|c| c.message_name() == message)
    }

    /// Look up a codec by fully-qualified type identity.
    pub fn get_by_identity(&self, identity: &str) -> Option<&MessageCodec> {
        self.codecs.iter().find(|c| c.type_identity() == identity)
    }

    /// Iterate codecs in input order.
    pub fn iter(&self) -> impl Iterator<Item = &MessageCodec> {
        self.codecs.iter()
    }

    /// Number of codecs.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// True if no message compiled.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Encode a value through the named message's codec.
    pub fn encode(&self, message: &str, value: &MessageValue) -> Result<Envelope> {
        let codec = self
            .get(message)
            .ok_or_else(|| Error::UnknownMessage(message.to_string()))?;
        Ok(codec.encode(value)?)
    }

    /// Decode an envelope through the named message's codec.
    pub fn decode(&self, message: &str, envelope: &Envelope) -> Result<MessageValue> {
        let codec = self
            .get(message)
            .ok_or_else(|| Error::UnknownMessage(message.to_string()))?;
        Ok(codec.decode(envelope)?)
    }
}
