//! Derive on a plain struct with a container rename rule
use filtercrate::{FieldType, FilterModel, FilterSchema, Operator};
use serde::Serialize;

#[derive(Serialize, FilterSchema)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    #[filtercrate(visible, sortable)]
    pub id: i64,

    #[filtercrate(filterable, sortable)]
    pub total_up_votes: i32,

    #[filtercrate(filterable, ui = "visible;selection:open,closed")]
    pub status: String,

    #[filtercrate(filterable)]
    pub pinned: bool,

    #[filtercrate(filterable)]
    pub tags: Vec<String>,

    #[filtercrate(skip)]
    pub internal_note: String,
}

fn main() {
    let schema = Thread::schema();
    assert_eq!(schema.len(), 5);

    let votes = schema.get("totalUpVotes").unwrap();
    assert_eq!(votes.column, "total_up_votes");
    assert_eq!(votes.field_type, FieldType::Number);

    let status = schema.get("status").unwrap();
    assert!(status.visible);
    assert_eq!(status.selection.as_deref(), Some("open,closed"));

    assert_eq!(schema.get("pinned").unwrap().operators, [Operator::Eq, Operator::IsNull]);
    assert_eq!(schema.get("tags").unwrap().operators, [Operator::Eq]);
    assert!(!schema.contains("internalNote"));
}
