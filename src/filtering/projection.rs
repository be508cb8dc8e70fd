use serde_json::{Map, Value};

use crate::errors::FilterError;
use crate::schema::Schema;

/// Field selection parsed from `fields=a,b,c`.
///
/// Applied to records after serialization, so a selected value has the same
/// format as in a full record. `keys` and `columns` are parallel: `columns[i]`
/// is the storage column of `keys[i]`. The identifier, when the schema has one,
/// always comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    keys: Vec<String>,
    columns: Vec<String>,
}

impl Projection {
    /// Parse a comma-separated field list. Returns `Ok(None)` when the list
    /// selects nothing, meaning full records.
    ///
    /// # Errors
    ///
    /// `INVALID_FIELD` for the first entry that names no schema field.
    pub fn parse(fields: &str, schema: &Schema) -> Result<Option<Self>, FilterError> {
        let requested: Vec<&str> = fields
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();
        if requested.is_empty() {
            return Ok(None);
        }

        let mut projection = Self {
            keys: Vec::with_capacity(requested.len() + 1),
            columns: Vec::with_capacity(requested.len() + 1),
        };
        if let Some(identifier) = schema.identifier() {
            projection.push(&identifier.key, &identifier.column);
        }
        for entry in requested {
            let field = schema
                .get(entry)
                .ok_or_else(|| FilterError::invalid_selected_field(entry))?;
            projection.push(&field.key, &field.column);
        }

        Ok(Some(projection))
    }

    fn push(&mut self, key: &str, column: &str) {
        if !self.keys.iter().any(|k| k == key) {
            self.keys.push(key.to_string());
            self.columns.push(column.to_string());
        }
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Pick the selected wire keys out of a serialized record, in selection
    /// order. A key the record does not carry is looked up under its storage
    /// column, then falls back to `null`.
    #[must_use]
    pub fn shape_row(&self, record: &Value) -> Value {
        let shaped: Map<String, Value> = self
            .keys
            .iter()
            .zip(&self.columns)
            .map(|(key, column)| {
                let value = record
                    .get(key)
                    .or_else(|| record.get(column))
                    .cloned()
                    .unwrap_or(Value::Null);
                (key.clone(), value)
            })
            .collect();
        Value::Object(shaped)
    }
}
