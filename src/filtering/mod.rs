//! # Query Directives
//!
//! Turns untyped query parameters into validated Sea-ORM query modifications.
//! Everything here is checked against a [`Schema`](crate::Schema) first, so a
//! request can only touch fields the record type exposes.
//!
//! ## Main Components
//!
//! - **[`parse_filters`]**: validates `field[operator]=value` keys
//! - **[`apply_filters`]**: adds the resulting predicates to any [`QueryFilter`](sea_orm::QueryFilter)
//! - **[`apply_sorting`]**: validates `sort=-a,b` and adds `ORDER BY` terms
//! - **[`Projection`]**: restricts and re-keys columns for `fields=a,b`
//!
//! ## Query Parameter Examples
//!
//! ```rust,ignore
//! // Equality (no operator means eq)
//! GET /comments?pinned=true
//!
//! // Pattern and range operators
//! GET /comments?content[contains]=hello
//! GET /comments?total_up_votes[between]=5,10
//! GET /comments?created_at[gte]=2024-01-01T00:00:00Z
//!
//! // Lists and nulls
//! GET /comments?thread_id[in]=t1,t2
//! GET /comments?updatedAt[is_null]=true
//!
//! // Sorting, newest first then by content
//! GET /comments?sort=-created_at,content
//!
//! // Field selection; id is always included
//! GET /comments?fields=content,created_at
//! ```
//!
//! Every operator must be certified for the field's type; see
//! [`FieldType::operators`](crate::FieldType::operators). The first invalid
//! directive aborts the whole request with a [`FilterError`](crate::FilterError).

pub mod conditions;
pub mod projection;
pub mod query_parser;
pub mod sort;

pub use conditions::{Predicate, apply_filters, build_condition, build_predicates, translate};
pub use projection::Projection;
pub use query_parser::{FilterDirective, QueryParams, RESERVED_KEYS, parse_filters, parse_key};
pub use sort::{SortDirection, SortDirective, apply_sorting, parse_sorting};
