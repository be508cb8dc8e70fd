//! # filtercrate
//!
//! Declarative filtering, sorting, and field selection for Sea-ORM list
//! endpoints. A record type declares which fields are exposed and what each may
//! do; untyped query parameters are then validated against that declaration and
//! turned into query modifications.
//!
//! ```rust,ignore
//! use filtercrate::FilterSchema;
//! use sea_orm::entity::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, FilterSchema)]
//! #[sea_orm(table_name = "comments")]
//! pub struct Model {
//!     #[sea_orm(primary_key, auto_increment = false)]
//!     #[filtercrate(visible)]
//!     pub id: String,
//!     #[filtercrate(visible, filterable, sortable)]
//!     pub content: String,
//!     #[filtercrate(visible, filterable, sortable, time_format = "2006-01-02 15:04")]
//!     pub created_at: DateTimeUtc,
//! }
//!
//! // GET /comments?content[contains]=hello&sort=-created_at
//! let app = Router::new()
//!     .route("/comments", filtercrate::list_route::<Entity>())
//!     .with_state(db);
//! ```

pub mod errors;
pub mod filtering;
pub mod models;
pub mod routes;
pub mod schema;
pub mod traits;

pub use filtercrate_derive::FilterSchema;

pub use errors::{ErrorCode, FilterError, ListError};
pub use filtering::{
    FilterDirective, Predicate, Projection, QueryParams, SortDirection, SortDirective,
    apply_filters, apply_sorting, build_condition, parse_filters, parse_sorting,
};
pub use models::{ListConfig, ListOutcome, ListQuery, ListResponse};
pub use routes::{list_handler, list_records, list_route};
pub use schema::{
    Capabilities, FieldDescriptor, FieldSchema, FieldType, Operator, Schema, ValueKind,
    build_schema,
};
pub use serde_with;
pub use traits::{FilterModel, cached_schema};
