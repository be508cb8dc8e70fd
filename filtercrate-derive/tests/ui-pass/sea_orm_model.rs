//! Derive on a Sea-ORM model with renames, hidden fields, and column overrides
use filtercrate::{FieldType, FilterModel, FilterSchema, Operator};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub mod comment {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, FilterSchema)]
    #[sea_orm(table_name = "comments")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        #[filtercrate(visible)]
        pub id: String,

        #[filtercrate(visible, filterable, sortable)]
        pub content: String,

        #[filtercrate(visible, filterable, sortable, time_format = "2006-01-02 15:04")]
        pub created_at: DateTimeUtc,

        #[sea_orm(column_name = "updated")]
        #[serde(rename = "updatedAt")]
        #[filtercrate(visible, filterable)]
        pub updated_at: Option<DateTimeUtc>,

        #[serde(skip)]
        pub author_ip: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn main() {
    let schema = comment::Model::schema();
    assert_eq!(schema.len(), 4);
    assert!(!schema.contains("author_ip"));

    let created_at = schema.get("created_at").unwrap();
    assert_eq!(created_at.field_type, FieldType::DateTime);
    assert_eq!(created_at.time_format.as_deref(), Some("2006-01-02 15:04"));

    let updated_at = schema.get("updatedAt").unwrap();
    assert_eq!(updated_at.column, "updated");
    assert!(updated_at.allows(Operator::IsNull));

    let id = schema.get("id").unwrap();
    assert!(id.visible && !id.sortable && !id.filterable);
}
