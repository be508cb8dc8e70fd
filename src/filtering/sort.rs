use sea_orm::{
    QueryOrder,
    sea_query::{Alias, IntoColumnRef, Order, SimpleExpr},
};

use crate::errors::FilterError;
use crate::schema::{FieldSchema, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub field: String,
    pub direction: SortDirection,
}

fn split_token(token: &str) -> (&str, SortDirection) {
    match token.strip_prefix('-') {
        Some(field) => (field, SortDirection::Desc),
        None => (token, SortDirection::Asc),
    }
}

fn resolve<'s>(schema: &'s Schema, field: &str) -> Result<&'s FieldSchema, FilterError> {
    let meta = schema
        .get(field)
        .ok_or_else(|| FilterError::invalid_sort_field(field))?;
    // The identifier is always orderable so paging stays stable.
    if !meta.sortable && !meta.is_identifier() {
        return Err(FilterError::field_not_sortable(field));
    }
    Ok(meta)
}

fn sort_terms<'s>(
    sort: &str,
    schema: &'s Schema,
) -> Result<Vec<(&'s FieldSchema, SortDirection)>, FilterError> {
    sort.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let (field, direction) = split_token(token);
            resolve(schema, field).map(|meta| (meta, direction))
        })
        .collect()
}

/// Parse `sort` (e.g. `-created_at,title`) into directives, highest priority first.
///
/// An empty string yields no directives.
///
/// # Errors
///
/// - `INVALID_FIELD` when a token names no schema field
/// - `FIELD_NOT_SORTABLE` when the field is not sortable and is not `id`
pub fn parse_sorting(sort: &str, schema: &Schema) -> Result<Vec<SortDirective>, FilterError> {
    Ok(sort_terms(sort, schema)?
        .into_iter()
        .map(|(meta, direction)| SortDirective {
            field: meta.key.clone(),
            direction,
        })
        .collect())
}

/// Validate `sort` and append one `ORDER BY` term per token to `query`.
///
/// # Errors
///
/// Same as [`parse_sorting`]; nothing is applied when any token fails.
pub fn apply_sorting<Q: QueryOrder>(
    query: Q,
    sort: &str,
    schema: &Schema,
) -> Result<Q, FilterError> {
    Ok(sort_terms(sort, schema)?
        .into_iter()
        .fold(query, |query, (meta, direction)| {
            let column = SimpleExpr::Column(Alias::new(meta.column.as_str()).into_column_ref());
            query.order_by(column, direction.into())
        }))
}
