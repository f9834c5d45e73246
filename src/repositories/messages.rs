use crate::common::context::Context;
use crate::entities::messages::Message;
use chrono::Utc;
use uuid::Uuid;

const TABLE_NAME: &str = "messages";
const READ_FIELDS: &str = "id, name, content, created_at, updated_at";

pub async fn fetch_all<C: Context>(ctx: &C) -> sqlx::Result<Vec<Message>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " ORDER BY created_at ASC, rowid ASC"
    );
    sqlx::query_as(QUERY).fetch_all(ctx.db()).await
}

pub async fn fetch_one<C: Context>(ctx: &C, id: &str) -> sqlx::Result<Option<Message>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(id)
        .fetch_optional(ctx.db())
        .await
}

/// `name` and `content` are bound as given; the NOT NULL constraints reject
/// a missing field.
pub async fn create<C: Context>(
    ctx: &C,
    name: Option<&str>,
    content: Option<&str>,
) -> sqlx::Result<Message> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (id, name, content, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING ",
        READ_FIELDS
    );
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    sqlx::query_as(QUERY)
        .bind(id)
        .bind(name)
        .bind(content)
        .bind(now)
        .bind(now)
        .fetch_one(ctx.db())
        .await
}

/// Fails with `RowNotFound` when `id` does not exist.
pub async fn update<C: Context>(
    ctx: &C,
    id: &str,
    name: Option<&str>,
    content: Option<&str>,
) -> sqlx::Result<Message> {
    const QUERY: &str = const_str::concat!(
        "UPDATE ",
        TABLE_NAME,
        " SET name = COALESCE(?, name), content = COALESCE(?, content), updated_at = ?",
        " WHERE id = ? RETURNING ",
        READ_FIELDS
    );
    sqlx::query_as(QUERY)
        .bind(name)
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(ctx.db())
        .await
}

/// Returns the row as it was before deletion. Fails with `RowNotFound` when
/// `id` does not exist.
pub async fn delete<C: Context>(ctx: &C, id: &str) -> sqlx::Result<Message> {
    const QUERY: &str = const_str::concat!(
        "DELETE FROM ",
        TABLE_NAME,
        " WHERE id = ? RETURNING ",
        READ_FIELDS
    );
    sqlx::query_as(QUERY)
        .bind(id)
        .fetch_one(ctx.db())
        .await
}
