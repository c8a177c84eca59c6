//! Audit trail repository: record messages and field-level change history

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        audit::{FieldChange, FieldChangeEntry, RecordMessage},
        enums::RecordType,
    },
};

const SELECT_MESSAGE: &str = r#"
    SELECT m.id, m.record_type, m.record_id, m.author_id,
           u.name AS author_name, m.body, m.message_type, m.posted_at
    FROM record_messages m
    LEFT JOIN users u ON u.id = m.author_id
"#;

const SELECT_CHANGE: &str = r#"
    SELECT c.id, c.record_type, c.record_id, c.field_name,
           c.old_value, c.new_value, c.changed_by,
           u.name AS changed_by_name, c.changed_at
    FROM field_changes c
    LEFT JOIN users u ON u.id = c.changed_by
"#;

/// Insert a message row inside the caller's transaction.
pub(crate) async fn insert_message(
    conn: &mut PgConnection,
    record_type: RecordType,
    record_id: i32,
    author_id: Option<i32>,
    body: &str,
    message_type: &str,
) -> AppResult<i32> {
    let id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO record_messages (record_type, record_id, author_id, body, message_type)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(record_type)
    .bind(record_id)
    .bind(author_id)
    .bind(body)
    .bind(message_type)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Insert field change rows inside the caller's transaction.
pub(crate) async fn insert_changes(
    conn: &mut PgConnection,
    record_type: RecordType,
    record_id: i32,
    changed_by: Option<i32>,
    changes: &[FieldChangeEntry],
) -> AppResult<()> {
    for change in changes {
        sqlx::query(
            r#"
            INSERT INTO field_changes (record_type, record_id, field_name, old_value, new_value, changed_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record_type)
        .bind(record_id)
        .bind(change.field_name)
        .bind(&change.old_value)
        .bind(&change.new_value)
        .bind(changed_by)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct AuditRepository {
    pool: Pool<Postgres>,
}

impl AuditRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Messages posted on a record, newest first
    pub async fn messages(
        &self,
        record_type: RecordType,
        record_id: i32,
    ) -> AppResult<Vec<RecordMessage>> {
        let query = format!(
            "{} WHERE m.record_type = $1 AND m.record_id = $2 ORDER BY m.posted_at DESC, m.id DESC",
            SELECT_MESSAGE
        );
        let messages = sqlx::query_as::<_, RecordMessage>(&query)
            .bind(record_type)
            .bind(record_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(messages)
    }

    /// Field changes recorded on a record, newest first
    pub async fn changes(
        &self,
        record_type: RecordType,
        record_id: i32,
    ) -> AppResult<Vec<FieldChange>> {
        let query = format!(
            "{} WHERE c.record_type = $1 AND c.record_id = $2 ORDER BY c.changed_at DESC, c.id DESC",
            SELECT_CHANGE
        );
        let changes = sqlx::query_as::<_, FieldChange>(&query)
            .bind(record_type)
            .bind(record_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(changes)
    }

    /// Post a comment on a record and return the stored message
    pub async fn post_message(
        &self,
        record_type: RecordType,
        record_id: i32,
        author_id: Option<i32>,
        body: &str,
        message_type: &str,
    ) -> AppResult<RecordMessage> {
        let mut conn = self.pool.acquire().await?;
        let id = insert_message(&mut conn, record_type, record_id, author_id, body, message_type)
            .await?;

        let query = format!("{} WHERE m.id = $1", SELECT_MESSAGE);
        let message = sqlx::query_as::<_, RecordMessage>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(message)
    }
}
