//! # Field Schema
//!
//! Derives the filterable/sortable surface of a record type from an explicit
//! table of [`FieldDescriptor`]s. The resulting [`Schema`] maps each wire key to
//! a [`FieldSchema`] and is the single source of truth for what a list query may
//! filter, sort, or project.
//!
//! ```rust,ignore
//! use filtercrate::{FieldDescriptor, ValueKind, build_schema};
//!
//! let schema = build_schema(&[
//!     FieldDescriptor::new("id", ValueKind::Text).ui("visible;sortable"),
//!     FieldDescriptor::new("createdAt", ValueKind::DateTime)
//!         .column("created_at")
//!         .ui("visible;filterable;sortable"),
//! ]);
//! assert!(schema.get("createdAt").is_some_and(|f| f.filterable));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

/// Wire key of the identifier field.
pub const ID_KEY: &str = "id";

/// Value type exposed for a field. Determines which operators it certifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    DateTime,
}

impl FieldType {
    /// Operators certified for this type, in their canonical order.
    #[must_use]
    pub const fn operators(self) -> &'static [Operator] {
        match self {
            Self::String => &[
                Operator::Eq,
                Operator::Ne,
                Operator::Contains,
                Operator::StartsWith,
                Operator::EndsWith,
                Operator::In,
                Operator::IsNull,
            ],
            Self::Number => &[
                Operator::Eq,
                Operator::Ne,
                Operator::Gt,
                Operator::Gte,
                Operator::Lt,
                Operator::Lte,
                Operator::Between,
                Operator::In,
                Operator::IsNull,
            ],
            Self::Boolean => &[Operator::Eq, Operator::IsNull],
            Self::DateTime => &[
                Operator::Gt,
                Operator::Gte,
                Operator::Lt,
                Operator::Lte,
                Operator::Between,
                Operator::IsNull,
            ],
        }
    }
}

/// Filter operator accepted inside the `field[operator]` query syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Contains,
    StartsWith,
    EndsWith,
    /// Comma-separated list of values
    In,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Two comma-separated bounds, inclusive
    Between,
    /// `true` selects NULL, anything else NOT NULL
    IsNull,
}

impl Operator {
    pub const ALL: [Self; 12] = [
        Self::Eq,
        Self::Ne,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
        Self::In,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Between,
        Self::IsNull,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Contains => "contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::In => "in",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Between => "between",
            Self::IsNull => "is_null",
        }
    }

    /// Look up an operator by its query-string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared value kind of a model field, before it is mapped to a [`FieldType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Boolean,
    DateTime,
    /// Anything without a certified mapping; exposed as `string` with `eq` only.
    Other(String),
}

impl ValueKind {
    /// Classify a Rust type by the name of its last path segment
    /// (`String`, `i64`, `DateTime`, `Decimal`, ...).
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "String" | "str" | "char" | "Cow" => Self::Text,
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => Self::Integer,
            "f32" | "f64" | "Decimal" => Self::Float,
            "bool" => Self::Boolean,
            "DateTime" | "DateTimeUtc" | "DateTimeLocal" | "DateTimeWithTimeZone"
            | "NaiveDateTime" | "NaiveDate" | "NaiveTime" | "Date" | "Time" | "OffsetDateTime"
            | "PrimitiveDateTime" | "SystemTime" => Self::DateTime,
            other => Self::Other(other.to_string()),
        }
    }

    /// Exposed type and certified operator set for this kind.
    #[must_use]
    pub fn type_and_operators(&self) -> (FieldType, &'static [Operator]) {
        let field_type = match self {
            Self::Text => FieldType::String,
            Self::Integer | Self::Float => FieldType::Number,
            Self::Boolean => FieldType::Boolean,
            Self::DateTime => FieldType::DateTime,
            Self::Other(_) => return (FieldType::String, &[Operator::Eq]),
        };
        (field_type, field_type.operators())
    }
}

/// One declared field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Wire key. Empty or `-` hides the field from the schema.
    pub key: String,
    /// Storage column, when it differs from the wire key.
    pub column: Option<String>,
    pub kind: ValueKind,
    /// Semicolon-delimited capability annotation, e.g. `visible;filterable;sortable`.
    pub ui: String,
    pub time_format: Option<String>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(key: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            key: key.into(),
            column: None,
            kind,
            ui: String::new(),
            time_format: None,
        }
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn ui(mut self, annotation: impl Into<String>) -> Self {
        self.ui = annotation.into();
        self
    }

    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    fn is_exposed(&self) -> bool {
        !self.key.is_empty() && self.key != "-"
    }
}

/// Capability flags parsed from a `ui` annotation string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub sortable: bool,
    pub filterable: bool,
    pub editable: bool,
    pub visible: bool,
    pub selection: Option<String>,
}

impl Capabilities {
    /// Parse `;`-separated tokens. Unknown tokens are ignored so annotations can
    /// carry hints for other consumers.
    #[must_use]
    pub fn parse(annotation: &str) -> Self {
        let mut caps = Self::default();
        let mut selection_seen = false;
        for token in annotation.split(';').map(str::trim) {
            match token {
                "sortable" => caps.sortable = true,
                "filterable" => caps.filterable = true,
                "editable" => caps.editable = true,
                "visible" => caps.visible = true,
                _ => {
                    // Only the first `selection:` token counts; an empty one means none.
                    if !selection_seen && let Some(choice) = token.strip_prefix("selection:") {
                        selection_seen = true;
                        caps.selection = (!choice.is_empty()).then(|| choice.to_string());
                    }
                }
            }
        }
        caps
    }
}

/// Everything a client may know about one exposed field.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldSchema {
    pub key: String,
    pub column: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub operators: Vec<Operator>,
    pub sortable: bool,
    pub filterable: bool,
    pub editable: bool,
    pub visible: bool,
    pub selection: Option<String>,
    pub time_format: Option<String>,
}

impl FieldSchema {
    #[must_use]
    pub fn allows(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    #[must_use]
    pub fn is_identifier(&self) -> bool {
        self.key == ID_KEY
    }
}

/// Wire key -> [`FieldSchema`] map for one record type.
///
/// Backed by an ordered map so serializing the same schema twice yields the
/// same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, FieldSchema>,
}

impl Schema {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The identifier field (`id`), when the record type exposes one.
    #[must_use]
    pub fn identifier(&self) -> Option<&FieldSchema> {
        self.get(ID_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Build the schema for a record type from its declared fields.
///
/// Fields whose wire key is empty or `-` are dropped. When a key is declared
/// twice, the later declaration replaces the earlier one.
#[must_use]
pub fn build_schema(descriptors: &[FieldDescriptor]) -> Schema {
    let mut fields = BTreeMap::new();

    for descriptor in descriptors.iter().filter(|d| d.is_exposed()) {
        let (field_type, operators) = descriptor.kind.type_and_operators();
        let caps = Capabilities::parse(&descriptor.ui);
        let column = descriptor
            .column
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(&descriptor.key)
            .to_string();

        fields.insert(
            descriptor.key.clone(),
            FieldSchema {
                key: descriptor.key.clone(),
                column,
                field_type,
                operators: operators.to_vec(),
                sortable: caps.sortable,
                filterable: caps.filterable,
                editable: caps.editable,
                visible: caps.visible,
                selection: caps.selection,
                time_format: descriptor.time_format.clone().filter(|f| !f.is_empty()),
            },
        );
    }

    Schema { fields }
}
