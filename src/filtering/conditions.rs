use sea_orm::{
    Condition, QueryFilter, Value,
    sea_query::{Alias, Expr, SimpleExpr},
};

use super::query_parser::{FilterDirective, QueryParams, parse_filters};
use crate::errors::FilterError;
use crate::schema::{FieldSchema, FieldType, Operator, Schema};

/// A single storage-level condition on one column.
///
/// Pattern operators keep the value as given; case sensitivity is whatever the
/// column collation says.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq { column: String, value: Value },
    Ne { column: String, value: Value },
    /// SQL `LIKE` with `%` already placed
    Like { column: String, pattern: String },
    In { column: String, values: Vec<Value> },
    Gt { column: String, value: Value },
    Gte { column: String, value: Value },
    Lt { column: String, value: Value },
    Lte { column: String, value: Value },
    /// Inclusive on both ends
    Between { column: String, low: Value, high: Value },
    IsNull { column: String },
    IsNotNull { column: String },
}

impl Predicate {
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Eq { column, .. }
            | Self::Ne { column, .. }
            | Self::Like { column, .. }
            | Self::In { column, .. }
            | Self::Gt { column, .. }
            | Self::Gte { column, .. }
            | Self::Lt { column, .. }
            | Self::Lte { column, .. }
            | Self::Between { column, .. }
            | Self::IsNull { column }
            | Self::IsNotNull { column } => column,
        }
    }

    #[must_use]
    pub fn into_expr(self) -> SimpleExpr {
        let col = |name: String| Expr::col(Alias::new(name));
        match self {
            Self::Eq { column, value } => col(column).eq(value),
            Self::Ne { column, value } => col(column).ne(value),
            Self::Like { column, pattern } => col(column).like(pattern),
            Self::In { column, values } => col(column).is_in(values),
            Self::Gt { column, value } => col(column).gt(value),
            Self::Gte { column, value } => col(column).gte(value),
            Self::Lt { column, value } => col(column).lt(value),
            Self::Lte { column, value } => col(column).lte(value),
            Self::Between { column, low, high } => col(column).between(low, high),
            Self::IsNull { column } => col(column).is_null(),
            Self::IsNotNull { column } => col(column).is_not_null(),
        }
    }
}

impl From<Predicate> for SimpleExpr {
    fn from(predicate: Predicate) -> Self {
        predicate.into_expr()
    }
}

/// Literal for `raw` as the field's type would store it.
///
/// Numbers try integer then float; booleans accept `true/false/1/0`. Anything
/// that does not parse is passed through as text and left to the database.
fn typed_value(field_type: FieldType, raw: &str) -> Value {
    match field_type {
        FieldType::Number => raw
            .parse::<i64>()
            .map(Value::from)
            .or_else(|_| raw.parse::<f64>().map(Value::from))
            .unwrap_or_else(|_| Value::from(raw.to_string())),
        FieldType::Boolean => match raw {
            "true" | "1" => Value::from(true),
            "false" | "0" => Value::from(false),
            _ => Value::from(raw.to_string()),
        },
        FieldType::String | FieldType::DateTime => Value::from(raw.to_string()),
    }
}

/// Translate one validated `(field, operator, value)` triple into a predicate.
///
/// Returns `None` when the value cannot form a predicate for the operator:
/// `between` needs exactly two comma-separated bounds.
#[must_use]
pub fn translate(field: &FieldSchema, operator: Operator, raw: &str) -> Option<Predicate> {
    let column = field.column.clone();
    let value = |v: &str| typed_value(field.field_type, v);

    let predicate = match operator {
        Operator::Eq => Predicate::Eq { column, value: value(raw) },
        Operator::Ne => Predicate::Ne { column, value: value(raw) },
        Operator::Contains => Predicate::Like {
            column,
            pattern: format!("%{raw}%"),
        },
        Operator::StartsWith => Predicate::Like {
            column,
            pattern: format!("{raw}%"),
        },
        Operator::EndsWith => Predicate::Like {
            column,
            pattern: format!("%{raw}"),
        },
        Operator::In => Predicate::In {
            column,
            values: raw.split(',').map(value).collect(),
        },
        Operator::Gt => Predicate::Gt { column, value: value(raw) },
        Operator::Gte => Predicate::Gte { column, value: value(raw) },
        Operator::Lt => Predicate::Lt { column, value: value(raw) },
        Operator::Lte => Predicate::Lte { column, value: value(raw) },
        Operator::Between => {
            let parts: Vec<&str> = raw.split(',').collect();
            let [low, high] = parts.as_slice() else {
                return None;
            };
            Predicate::Between {
                column,
                low: value(*low),
                high: value(*high),
            }
        }
        Operator::IsNull if raw == "true" => Predicate::IsNull { column },
        Operator::IsNull => Predicate::IsNotNull { column },
    };

    Some(predicate)
}

fn translate_directive(schema: &Schema, directive: &FilterDirective) -> Option<Predicate> {
    let field = schema.get(&directive.field)?;
    translate(field, directive.operator, &directive.value)
}

/// Validate `params` and translate them into predicates, in query order.
///
/// # Errors
///
/// Returns the first [`FilterError`] found by [`parse_filters`].
pub fn build_predicates(
    params: &QueryParams,
    schema: &Schema,
) -> Result<Vec<Predicate>, FilterError> {
    let directives = parse_filters(params, schema)?;
    Ok(directives
        .iter()
        .filter_map(|directive| translate_directive(schema, directive))
        .collect())
}

/// Validate `params` and AND every resulting predicate into one [`Condition`].
///
/// # Errors
///
/// Returns the first [`FilterError`] found by [`parse_filters`].
pub fn build_condition(params: &QueryParams, schema: &Schema) -> Result<Condition, FilterError> {
    Ok(build_predicates(params, schema)?
        .into_iter()
        .fold(Condition::all(), |condition, predicate| {
            condition.add(predicate.into_expr())
        }))
}

/// Validate `params` and add every resulting predicate to `query`.
///
/// On error the query is dropped; nothing partial is returned.
///
/// # Errors
///
/// Returns the first [`FilterError`] found by [`parse_filters`].
pub fn apply_filters<Q: QueryFilter>(
    query: Q,
    params: &QueryParams,
    schema: &Schema,
) -> Result<Q, FilterError> {
    Ok(build_predicates(params, schema)?
        .into_iter()
        .fold(query, |query, predicate| query.filter(predicate.into_expr())))
}
