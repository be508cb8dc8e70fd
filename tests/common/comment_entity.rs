use filtercrate::FilterSchema;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, FilterSchema)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[filtercrate(visible)]
    pub id: String,

    #[filtercrate(visible, filterable)]
    pub thread_id: String,

    #[sea_orm(column_type = "Text")]
    #[filtercrate(visible, filterable, sortable, editable)]
    pub content: String,

    #[filtercrate(visible, filterable, sortable, time_format = "2006-01-02 15:04")]
    pub created_at: DateTimeUtc,

    #[serde(rename = "updatedAt")]
    #[filtercrate(visible, filterable)]
    pub updated_at: Option<DateTimeUtc>,

    #[filtercrate(visible, filterable, sortable)]
    pub total_up_votes: i32,

    #[filtercrate(visible, filterable)]
    pub pinned: bool,

    #[filtercrate(ui = "visible;selection:draft,published")]
    pub status: String,

    #[serde(skip)]
    pub author_ip: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
