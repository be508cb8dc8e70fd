use std::collections::HashMap;

use crate::errors::FilterError;
use crate::schema::{Operator, Schema};

/// Query keys that drive paging, sorting, projection, and introspection.
/// They are never treated as filters.
pub const RESERVED_KEYS: [&str; 6] = ["draw", "start", "length", "sort", "fields", "schema"];

/// Raw query parameters as an ordered multi-map.
///
/// Keys keep the position of their first occurrence; repeated keys collect
/// their values in arrival order. Lookups go through a key index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(&position) = self.index.get(&key) {
            self.entries[position].1.push(value);
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, vec![value]));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_slice())
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First value of `key`, if any.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

/// One validated filter: `field[operator]=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDirective {
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

/// Split a raw key into `(field, operator)`. A key without brackets means `eq`.
///
/// `created_at[gte]` -> `("created_at", "gte")`, `title` -> `("title", "eq")`.
#[must_use]
pub fn parse_key(raw: &str) -> (&str, &str) {
    let Some((field, rest)) = raw.split_once('[') else {
        return (raw, Operator::Eq.as_str());
    };
    let operator = rest.split('[').next().unwrap_or(rest);
    (field, operator.strip_suffix(']').unwrap_or(operator))
}

/// Validate every non-reserved query key against `schema`.
///
/// Stops at the first invalid key. Each value of a key becomes its own
/// directive; they are meant to be combined with AND.
///
/// # Errors
///
/// - `INVALID_FIELD` when the field is not in the schema
/// - `FIELD_NOT_FILTERABLE` when the field is not marked filterable
/// - `OPERATOR_NOT_ALLOWED` when the operator is unknown or not certified for the field
pub fn parse_filters(
    params: &QueryParams,
    schema: &Schema,
) -> Result<Vec<FilterDirective>, FilterError> {
    let mut directives = Vec::new();

    for (raw_key, values) in params.iter() {
        let (field, operator_name) = parse_key(raw_key);
        if RESERVED_KEYS.contains(&field) {
            continue;
        }

        let meta = schema
            .get(field)
            .ok_or_else(|| FilterError::invalid_field(field))?;

        if !meta.filterable {
            return Err(FilterError::field_not_filterable(field));
        }

        let operator = Operator::from_name(operator_name)
            .filter(|op| meta.allows(*op))
            .ok_or_else(|| {
                FilterError::operator_not_allowed(field, operator_name, &meta.operators)
            })?;

        directives.extend(values.iter().map(|value| FilterDirective {
            field: field.to_string(),
            operator,
            value: value.clone(),
        }));
    }

    Ok(directives)
}
