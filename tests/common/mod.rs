#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, IntoActiveModel};
use sea_orm_migration::prelude::*;
use serde_json::Value;
use tower::ServiceExt;

pub mod comment_entity;

use comment_entity::{Entity as Comment, Model as CommentModel};

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let db = Database::connect(&url).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

pub async fn setup_seeded_db() -> Result<DatabaseConnection, DbErr> {
    let db = setup_test_db().await?;
    for comment in seed_comments() {
        comment.into_active_model().reset_all().insert(&db).await?;
    }
    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    let api = Router::new()
        .route("/comments", filtercrate::list_route::<Comment>())
        .with_state(db);

    Router::new().nest("/api/v1", api)
}

/// Seeded app; `GET /api/v1/comments` lists five comments across two threads.
pub async fn setup_seeded_app() -> Router {
    let db = setup_seeded_db()
        .await
        .expect("Failed to setup test database");
    setup_test_app(db)
}

/// `GET` `uri` and return the status with the decoded JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Percent-encode one `key=value` pair so brackets survive the URI parser.
pub fn pair(key: &str, value: &str) -> String {
    format!(
        "{}={}",
        url_escape::encode_component(key),
        url_escape::encode_component(value)
    )
}

/// Ids of the records in a list response, in order.
pub fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn at(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 10, 0, 0).unwrap()
}

pub fn seed_comments() -> Vec<CommentModel> {
    let comment = |id: &str,
                   thread_id: &str,
                   content: &str,
                   created_at: DateTime<Utc>,
                   total_up_votes: i32,
                   pinned: bool| CommentModel {
        id: id.to_string(),
        thread_id: thread_id.to_string(),
        content: content.to_string(),
        created_at,
        updated_at: None,
        total_up_votes,
        pinned,
        status: "published".to_string(),
        author_ip: "10.0.0.1".to_string(),
    };

    vec![
        comment("c1", "t1", "hello world", at(1, 10), 3, false),
        CommentModel {
            updated_at: Some(at(2, 16)),
            status: "draft".to_string(),
            ..comment("c2", "t1", "Hello there", at(2, 15), 10, true)
        },
        comment("c3", "t2", "goodbye", at(3, 20), 0, false),
        CommentModel {
            updated_at: Some(at(4, 26)),
            ..comment("c4", "t2", "say hello again", at(4, 25), 7, false)
        },
        comment("c5", "t1", "nothing here", at(5, 30), 1, true),
    ]
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateCommentTable)]
    }
}

pub struct CreateCommentTable;

#[async_trait::async_trait]
impl MigrationName for CreateCommentTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_comment_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateCommentTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Comments::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Comments::Id)
                    .string()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Comments::ThreadId).string().not_null())
            .col(ColumnDef::new(Comments::Content).text().not_null())
            .col(
                ColumnDef::new(Comments::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Comments::UpdatedAt)
                    .timestamp_with_time_zone()
                    .null(),
            )
            .col(
                ColumnDef::new(Comments::TotalUpVotes)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(
                ColumnDef::new(Comments::Pinned)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(Comments::Status)
                    .string()
                    .not_null()
                    .default("draft"),
            )
            .col(ColumnDef::new(Comments::AuthorIp).string().not_null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Comments {
    Table,
    Id,
    ThreadId,
    Content,
    CreatedAt,
    UpdatedAt,
    TotalUpVotes,
    Pinned,
    Status,
    AuthorIp,
}
