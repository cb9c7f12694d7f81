//! Message schemas: the read-only description of a message's fields,
//! options, and computed keys.
//!
//! Schemas are supplied whole by the schema collaborator and never
//! mutated by the core. Options are typed structs validated when a codec
//! is compiled, not probed dynamically per field.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default separator between compound key segments.
pub const DEFAULT_SEPARATOR: &str = ":";

/// The scalar kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    Bool,
    String,
    Bytes,
    /// An enumeration, carried as its numeric discriminant.
    Enum,
    /// A nested message.
    Message,
}

impl ScalarKind {
    /// Kinds that map to the store's number tags (`N`/`NS`). Enums count:
    /// their discriminant is what travels.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            ScalarKind::I32
                | ScalarKind::I64
                | ScalarKind::U32
                | ScalarKind::U64
                | ScalarKind::F32
                | ScalarKind::F64
                | ScalarKind::Enum
        )
    }

    /// Kinds allowed as compound key segments: strings plus the integer
    /// and floating-point kinds. Enums are excluded; a key built from a
    /// bare discriminant is not a stable identifier.
    pub const fn is_keyable(self) -> bool {
        matches!(
            self,
            ScalarKind::I32
                | ScalarKind::I64
                | ScalarKind::U32
                | ScalarKind::U64
                | ScalarKind::F32
                | ScalarKind::F64
                | ScalarKind::String
        )
    }
}

/// Per-field options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldOptions {
    /// Give this field its own top-level envelope entry in addition to
    /// its copy inside the binary payload.
    pub expose: bool,
    /// Encode a repeated field as a homogeneous set instead of a list.
    pub as_set: bool,
}

/// One field of a message schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name; doubles as the envelope label when exposed.
    pub name: String,
    /// Scalar kind.
    pub kind: ScalarKind,
    /// Singular or repeated.
    pub repeated: bool,
    /// Field-level options.
    pub options: FieldOptions,
}

impl FieldSchema {
    /// A singular field with default options.
    pub fn new(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            kind,
            repeated: false,
            options: FieldOptions::default(),
        }
    }

    /// Mark the field repeated.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Expose the field as its own envelope entry.
    pub fn exposed(mut self) -> Self {
        self.options.expose = true;
        self
    }

    /// Encode the (repeated) field as a set.
    pub fn as_set(mut self) -> Self {
        self.options.as_set = true;
        self
    }
}

/// A named computed key: an ordered list of source fields joined by a
/// separator, with an optional literal prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    /// Envelope label for the computed key.
    pub name: String,
    /// Referenced field names, in concatenation order.
    pub fields: Vec<String>,
    /// Literal prefix; when non-empty it is written first, followed by
    /// the separator.
    pub prefix: Option<String>,
    /// Segment separator. `None` means [`DEFAULT_SEPARATOR`].
    pub separator: Option<String>,
}

impl KeySpec {
    /// A key over the given fields with default separator and no prefix.
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            prefix: None,
            separator: None,
        }
    }

    /// Set the literal prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Override the separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// The effective separator.
    pub fn separator_or_default(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }
}

/// Message-level options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageOptions {
    /// Skip codec generation for this message entirely.
    pub disabled: bool,
    /// Computed partition key.
    pub partition_key: Option<KeySpec>,
    /// Computed sort key.
    pub sort_key: Option<KeySpec>,
    /// Additional computed keys, in declaration order.
    pub compound_keys: Vec<KeySpec>,
}

/// A named message structure with an ordered field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSchema {
    name: String,
    namespace: String,
    package: String,
    fields: Vec<FieldSchema>,
    options: MessageOptions,
}

impl MessageSchema {
    /// Start building a schema.
    pub fn builder(
        namespace: impl Into<String>,
        package: impl Into<String>,
        name: impl Into<String>,
    ) -> MessageSchemaBuilder {
        MessageSchemaBuilder {
            name: name.into(),
            namespace: namespace.into(),
            package: package.into(),
            fields: Vec::new(),
            options: MessageOptions::default(),
        }
    }

    /// Message name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fully-qualified type identity, e.g. `type.example/pkg.User`.
    ///
    /// Stored under the reserved `typ` label and checked on decode.
    pub fn type_identity(&self) -> String {
        format!("type.{}/{}.{}", self.namespace, self.package, self.name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Message-level options.
    pub fn options(&self) -> &MessageOptions {
        &self.options
    }

    /// All key specs in evaluation order: partition key, sort key, then
    /// each additional compound key in declaration order.
    pub fn key_specs(&self) -> impl Iterator<Item = &KeySpec> {
        self.options
            .partition_key
            .iter()
            .chain(self.options.sort_key.iter())
            .chain(self.options.compound_keys.iter())
    }
}

/// Fluent builder for [`MessageSchema`].
#[derive(Debug, Clone)]
pub struct MessageSchemaBuilder {
    name: String,
    namespace: String,
    package: String,
    fields: Vec<FieldSchema>,
    options: MessageOptions,
}

impl MessageSchemaBuilder {
    /// Append a field.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the partition key.
    pub fn partition_key(mut self, spec: KeySpec) -> Self {
        self.options.partition_key = Some(spec);
        self
    }

    /// Set the sort key.
    pub fn sort_key(mut self, spec: KeySpec) -> Self {
        self.options.sort_key = Some(spec);
        self
    }

    /// Append an additional compound key.
    pub fn compound_key(mut self, spec: KeySpec) -> Self {
        self.options.compound_keys.push(spec);
        self
    }

    /// Disable codec generation for this message.
    pub fn disabled(mut self) -> Self {
        self.options.disabled = true;
        self
    }

    /// Finish the schema. Rejects duplicate field names.
    pub fn build(self) -> Result<MessageSchema, ConfigError> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(ConfigError::DuplicateField {
                    field: field.name.clone(),
                });
            }
        }
        Ok(MessageSchema {
            name: self.name,
            namespace: self.namespace,
            package: self.package,
            fields: self.fields,
            options: self.options,
        })
    }
}
