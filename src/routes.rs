use axum::{
    extract::{Query, State},
    routing::{MethodRouter, get},
};
use sea_orm::{DatabaseConnection, EntityName, EntityTrait, PaginatorTrait, QuerySelect};
use serde::Serialize;

use crate::errors::ListError;
use crate::filtering::{Projection, QueryParams, apply_filters, apply_sorting};
use crate::models::{ListConfig, ListOutcome, ListQuery, ListResponse};
use crate::traits::{FilterModel, cached_schema};

/// Run one list request for entity `E` against `db`.
///
/// Steps, in order: schema short-circuit, field selection, filters, sort
/// (falling back to `config.default_sort`), filtered count, paging, fetch,
/// unfiltered count.
///
/// # Errors
///
/// [`ListError::Filter`] for the first invalid directive; nothing touches the
/// database in that case. [`ListError::Database`] when a query fails.
pub async fn list_records<E>(
    db: &DatabaseConnection,
    params: &QueryParams,
    config: &ListConfig,
) -> Result<ListOutcome, ListError>
where
    E: EntityTrait,
    E::Model: FilterModel + Serialize + Sync + 'static,
{
    let schema = cached_schema::<E::Model>();
    let request = ListQuery::from_params(params);
    if request.wants_schema() {
        return Ok(ListOutcome::Schema(schema));
    }

    let projection = match request.fields.as_deref() {
        Some(fields) => Projection::parse(fields, &schema)?,
        None => None,
    };

    let query = apply_filters(E::find(), params, &schema)?;
    let sort = match request.sort.as_deref() {
        Some(sort) => sort,
        None if schema.identifier().is_some() => config.default_sort.as_str(),
        None => "",
    };
    let query = apply_sorting(query, sort, &schema)?;

    let records_filtered = query.clone().count(db).await?;
    let (offset, limit) = config.page(&request);
    let query = query.offset(offset).limit(limit);

    let records = query
        .all(db)
        .await?
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    let data = match &projection {
        Some(projection) => records
            .iter()
            .map(|record| projection.shape_row(record))
            .collect(),
        None => records,
    };

    let records_total = E::find().count(db).await?;

    tracing::debug!(
        table = E::default().table_name(),
        records_total,
        records_filtered,
        returned = data.len(),
        "Listed records"
    );

    Ok(ListOutcome::Page(ListResponse {
        success: true,
        draw: request.draw,
        records_total,
        records_filtered,
        data,
    }))
}

/// Axum handler listing entity `E` with the default [`ListConfig`].
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/comments", get(list_handler::<comment::Entity>))
///     .with_state(db);
/// ```
///
/// # Errors
///
/// See [`list_records`]; errors render as JSON envelopes.
pub async fn list_handler<E>(
    State(db): State<DatabaseConnection>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListOutcome, ListError>
where
    E: EntityTrait,
    E::Model: FilterModel + Serialize + Sync + 'static,
{
    let params: QueryParams = pairs.into_iter().collect();
    list_records::<E>(&db, &params, &ListConfig::default()).await
}

/// `GET` route for [`list_handler`].
#[must_use]
pub fn list_route<E>() -> MethodRouter<DatabaseConnection>
where
    E: EntityTrait,
    E::Model: FilterModel + Serialize + Sync + 'static,
{
    get(list_handler::<E>)
}
