//! # Error Handling
//!
//! Two layers:
//!
//! - [`FilterError`] is what the query engine returns. It carries a closed
//!   [`ErrorCode`] plus enough context (`field`, `operator`, `allowed`) for a
//!   client to correct its request without parsing the message.
//! - [`ListError`] is what the list endpoint returns. It wraps engine and
//!   database failures and turns them into HTTP responses.
//!
//! Database details are logged through `tracing` and never sent to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use std::fmt;
use utoipa::ToSchema;

use crate::schema::Operator;

/// Machine-readable reason a query was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced field is not part of the schema
    InvalidField,
    FieldNotFilterable,
    /// Reserved for validators that reject malformed operator syntax
    InvalidOperator,
    /// Operator is not certified for the field; `allowed` lists what is
    OperatorNotAllowed,
    FieldNotSortable,
    /// Reserved for validators that reject malformed field names
    InvalidFieldName,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidField => "INVALID_FIELD",
            Self::FieldNotFilterable => "FIELD_NOT_FILTERABLE",
            Self::InvalidOperator => "INVALID_OPERATOR",
            Self::OperatorNotAllowed => "OPERATOR_NOT_ALLOWED",
            Self::FieldNotSortable => "FIELD_NOT_SORTABLE",
            Self::InvalidFieldName => "INVALID_FIELD_NAME",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure for a filter, sort, or field-selection directive.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, thiserror::Error)]
#[error("{message}")]
pub struct FilterError {
    pub code: ErrorCode,
    pub message: String,
    pub field: String,
    pub operator: Option<String>,
    pub allowed: Option<Vec<Operator>>,
}

impl FilterError {
    fn new(code: ErrorCode, field: &str, message: String) -> Self {
        Self {
            code,
            message,
            field: field.to_string(),
            operator: None,
            allowed: None,
        }
    }

    /// Filter key that does not name a schema field.
    #[must_use]
    pub fn invalid_field(field: &str) -> Self {
        Self::new(
            ErrorCode::InvalidField,
            field,
            format!("Field '{field}' does not exist or is not available for filtering"),
        )
    }

    /// Sort token that does not name a schema field.
    #[must_use]
    pub fn invalid_sort_field(field: &str) -> Self {
        Self::new(
            ErrorCode::InvalidField,
            field,
            format!("Sort field '{field}' does not exist"),
        )
    }

    /// Field-selection entry that does not name a schema field.
    #[must_use]
    pub fn invalid_selected_field(field: &str) -> Self {
        Self::new(ErrorCode::InvalidField, field, format!("Invalid field: {field}"))
    }

    #[must_use]
    pub fn field_not_filterable(field: &str) -> Self {
        Self::new(
            ErrorCode::FieldNotFilterable,
            field,
            format!("Field '{field}' is not filterable"),
        )
    }

    #[must_use]
    pub fn operator_not_allowed(field: &str, operator: &str, allowed: &[Operator]) -> Self {
        Self {
            operator: Some(operator.to_string()),
            allowed: Some(allowed.to_vec()),
            ..Self::new(
                ErrorCode::OperatorNotAllowed,
                field,
                format!("Operator '{operator}' is not allowed for field '{field}'"),
            )
        }
    }

    #[must_use]
    pub fn field_not_sortable(field: &str) -> Self {
        Self::new(
            ErrorCode::FieldNotSortable,
            field,
            format!("Field '{field}' is not sortable"),
        )
    }
}

/// Failure of the list endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// 400 Bad Request - the query did not validate against the schema
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// 500 Internal Server Error - details logged, not exposed
    #[error("A database error occurred")]
    Database(#[from] DbErr),

    /// 500 Internal Server Error - a record could not be encoded
    #[error("Failed to encode records")]
    Serialization(#[from] serde_json::Error),
}

impl ListError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Filter(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Filter(err) => {
                tracing::debug!(
                    code = %err.code,
                    field = %err.field,
                    "Rejected list query"
                );
            }
            Self::Database(internal) => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::Serialization(internal) => {
                tracing::error!(error = %internal, "Record serialization failed");
            }
        }
    }
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = match &self {
            Self::Filter(err) => json!({
                "success": false,
                "message": err.message,
                "error": err,
            }),
            _ => json!({
                "success": false,
                "error": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
