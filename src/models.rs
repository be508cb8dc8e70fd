use std::sync::Arc;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use crate::filtering::QueryParams;
use crate::schema::Schema;

/// Control parameters of the list endpoint.
///
/// Every other query key is treated as a filter, `field[operator]=value`.
///
/// # Pagination
/// DataTables style: `start` is the row offset, `length` the page size. A
/// missing or non-positive `length` falls back to the configured default and
/// large values are capped.
///
/// # Sorting
/// `sort` is a comma-separated list of wire keys, `-` prefix for descending:
/// ```text
/// sort=-created_at,content
/// ```
///
/// # Field selection
/// `fields` restricts each record to the listed keys. `id` is always included.
///
/// # Schema
/// `schema=true` returns the field schema instead of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct ListQuery {
    /// Echoed back unchanged so DataTables can match responses to requests.
    #[param(example = 1)]
    pub draw: i64,
    /// Zero-based row offset.
    #[param(example = 0)]
    pub start: u64,
    /// Page size.
    #[param(example = 20)]
    pub length: Option<i64>,
    #[param(example = "-created_at,content")]
    pub sort: Option<String>,
    #[param(example = "content,created_at")]
    pub fields: Option<String>,
    #[param(example = false)]
    pub schema: bool,
}

impl ListQuery {
    /// Read the control keys out of raw parameters. Unparseable values fall
    /// back to their defaults instead of failing the request.
    #[must_use]
    pub fn from_params(params: &QueryParams) -> Self {
        let parse_int = |key: &str| params.first(key).and_then(|v| v.trim().parse::<i64>().ok());
        let non_empty = |key: &str| {
            params
                .first(key)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            draw: parse_int("draw").unwrap_or_default(),
            start: parse_int("start")
                .and_then(|start| u64::try_from(start).ok())
                .unwrap_or_default(),
            length: parse_int("length"),
            sort: non_empty("sort"),
            fields: non_empty("fields"),
            schema: params.first("schema") == Some("true"),
        }
    }

    #[must_use]
    pub fn wants_schema(&self) -> bool {
        self.schema
    }
}

/// Paging and ordering defaults for a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    pub default_length: u64,
    pub max_length: u64,
    /// Applied when the request has no `sort`, if the schema exposes `id`.
    pub default_sort: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_length: 20,
            max_length: 2000,
            default_sort: "-id".to_string(),
        }
    }
}

impl ListConfig {
    /// `(offset, limit)` for `query`.
    #[must_use]
    pub fn page(&self, query: &ListQuery) -> (u64, u64) {
        let limit = query
            .length
            .and_then(|length| u64::try_from(length).ok())
            .filter(|length| *length > 0)
            .unwrap_or(self.default_length)
            .min(self.max_length);
        (query.start, limit)
    }
}

/// One page of records in DataTables shape.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub success: bool,
    pub draw: i64,
    /// Row count before any filter
    pub records_total: u64,
    /// Row count after filters, before paging
    pub records_filtered: u64,
    pub data: Vec<Value>,
}

/// Successful result of the list endpoint.
#[derive(Debug, Clone)]
pub enum ListOutcome {
    Schema(Arc<Schema>),
    Page(ListResponse),
}

impl IntoResponse for ListOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Schema(schema) => Json(json!({ "schema": &*schema })).into_response(),
            Self::Page(page) => Json(page).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        ListQuery::from_params(&pairs.iter().copied().collect())
    }

    #[test]
    fn test_from_params_reads_control_keys() {
        let q = query(&[
            ("draw", "3"),
            ("start", "40"),
            ("length", "10"),
            ("sort", "-created_at"),
            ("fields", "content"),
            ("content[contains]", "hello"),
        ]);
        assert_eq!(q.draw, 3);
        assert_eq!(q.start, 40);
        assert_eq!(q.length, Some(10));
        assert_eq!(q.sort.as_deref(), Some("-created_at"));
        assert_eq!(q.fields.as_deref(), Some("content"));
        assert!(!q.wants_schema());
    }

    #[test]
    fn test_from_params_is_lenient() {
        let q = query(&[("draw", "x"), ("start", "-5"), ("length", "lots"), ("sort", "")]);
        assert_eq!(q, ListQuery::default());
        assert!(query(&[("schema", "true")]).wants_schema());
        assert!(!query(&[("schema", "1")]).wants_schema());
    }

    #[test]
    fn test_page_defaults_and_cap() {
        let config = ListConfig::default();
        assert_eq!(config.page(&ListQuery::default()), (0, 20));
        assert_eq!(config.page(&query(&[("length", "0")])), (0, 20));
        assert_eq!(config.page(&query(&[("length", "-1")])), (0, 20));
        assert_eq!(config.page(&query(&[("length", "5000")])), (0, 2000));
        assert_eq!(config.page(&query(&[("start", "7"), ("length", "3")])), (7, 3));
    }

    #[test]
    fn test_response_uses_datatables_keys() {
        let page = ListResponse {
            success: true,
            draw: 2,
            records_total: 10,
            records_filtered: 4,
            data: vec![json!({"id": "c1"})],
        };
        assert_eq!(
            serde_json::to_value(page).unwrap(),
            json!({
                "success": true,
                "draw": 2,
                "recordsTotal": 10,
                "recordsFiltered": 4,
                "data": [{"id": "c1"}]
            })
        );
    }
}
