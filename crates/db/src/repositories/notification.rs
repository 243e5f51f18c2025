use crate::models::DbNotification;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{PgConnection, PgExecutor};

const NOTIFICATION_COLUMNS: &str = r#"
    SELECT n.id, n.text, n.start_datetime, n.finish_datetime,
           ARRAY(
               SELECT t.tag::text
               FROM notification_tags nt
               JOIN tags t ON t.id = nt.tag_id
               WHERE nt.notification_id = n.id
               ORDER BY t.tag
           ) AS tags,
           ARRAY(
               SELECT oc.operator_code
               FROM notification_operator_codes noc
               JOIN operator_codes oc ON oc.id = noc.operator_code_id
               WHERE noc.notification_id = n.id
               ORDER BY oc.operator_code
           ) AS operator_codes
    FROM notifications n
"#;

pub async fn list_notifications<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<DbNotification>> {
    let notifications =
        sqlx::query_as::<_, DbNotification>(&format!("{NOTIFICATION_COLUMNS} ORDER BY n.id DESC"))
            .fetch_all(executor)
            .await?;

    Ok(notifications)
}

pub async fn get_notification<'e>(
    executor: impl PgExecutor<'e>,
    id: i32,
) -> Result<Option<DbNotification>> {
    let notification =
        sqlx::query_as::<_, DbNotification>(&format!("{NOTIFICATION_COLUMNS} WHERE n.id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;

    Ok(notification)
}

pub async fn insert_notification(
    conn: &mut PgConnection,
    text: &str,
    start_datetime: DateTime<Utc>,
    finish_datetime: DateTime<Utc>,
) -> Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO notifications (text, start_datetime, finish_datetime)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(text)
    .bind(start_datetime)
    .bind(finish_datetime)
    .fetch_one(conn)
    .await?;

    tracing::debug!("Notification created: id={}", id);
    Ok(id)
}

/// Applies the given base fields; `None` keeps the stored value. Returns
/// `false` if the notification does not exist.
pub async fn update_notification(
    conn: &mut PgConnection,
    id: i32,
    text: Option<&str>,
    start_datetime: Option<DateTime<Utc>>,
    finish_datetime: Option<DateTime<Utc>>,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE notifications
        SET text = COALESCE($2, text),
            start_datetime = COALESCE($3, start_datetime),
            finish_datetime = COALESCE($4, finish_datetime)
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(text)
    .bind(start_datetime)
    .bind(finish_datetime)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn replace_tags(conn: &mut PgConnection, id: i32, tag_ids: &[i32]) -> Result<()> {
    sqlx::query("DELETE FROM notification_tags WHERE notification_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO notification_tags (notification_id, tag_id)
        SELECT $1, UNNEST($2::integer[])
        "#,
    )
    .bind(id)
    .bind(tag_ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn replace_operator_codes(
    conn: &mut PgConnection,
    id: i32,
    operator_code_ids: &[i32],
) -> Result<()> {
    sqlx::query("DELETE FROM notification_operator_codes WHERE notification_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO notification_operator_codes (notification_id, operator_code_id)
        SELECT $1, UNNEST($2::integer[])
        "#,
    )
    .bind(id)
    .bind(operator_code_ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Returns `false` if the notification does not exist.
pub async fn delete_notification<'e>(executor: impl PgExecutor<'e>, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
