use crate::models::DbMessage;
use eyre::Result;
use sqlx::PgExecutor;

pub async fn insert_message<'e>(
    executor: impl PgExecutor<'e>,
    notification_id: i32,
    client_id: i32,
) -> Result<DbMessage> {
    let message = sqlx::query_as::<_, DbMessage>(
        r#"
        INSERT INTO messages (notification_id, client_id)
        VALUES ($1, $2)
        RETURNING id, notification_id, client_id, created, status
        "#,
    )
    .bind(notification_id)
    .bind(client_id)
    .fetch_one(executor)
    .await?;

    Ok(message)
}

pub async fn mark_sent<'e>(executor: impl PgExecutor<'e>, id: i32) -> Result<Option<DbMessage>> {
    let message = sqlx::query_as::<_, DbMessage>(
        r#"
        UPDATE messages
        SET status = TRUE
        WHERE id = $1
        RETURNING id, notification_id, client_id, created, status
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(message)
}

pub async fn get_messages_by_notification_id<'e>(
    executor: impl PgExecutor<'e>,
    notification_id: i32,
) -> Result<Vec<DbMessage>> {
    let messages = sqlx::query_as::<_, DbMessage>(
        r#"
        SELECT id, notification_id, client_id, created, status
        FROM messages
        WHERE notification_id = $1
        ORDER BY id DESC
        "#,
    )
    .bind(notification_id)
    .fetch_all(executor)
    .await?;

    Ok(messages)
}
