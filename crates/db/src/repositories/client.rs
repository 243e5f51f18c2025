use crate::models::DbClient;
use eyre::Result;
use sqlx::{PgConnection, PgExecutor};

const CLIENT_COLUMNS: &str = r#"
    SELECT c.id, c.number, c.operator_code_id, oc.operator_code,
           c.tag_id, t.tag::text AS tag, c.timezone
    FROM clients c
    JOIN operator_codes oc ON oc.id = c.operator_code_id
    LEFT JOIN tags t ON t.id = c.tag_id
"#;

pub async fn number_exists<'e>(
    executor: impl PgExecutor<'e>,
    number: &str,
    exclude_id: Option<i32>,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM clients
            WHERE number = $1 AND ($2::integer IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(number)
    .bind(exclude_id)
    .fetch_one(executor)
    .await?;

    Ok(exists)
}

pub async fn insert_client(
    conn: &mut PgConnection,
    number: &str,
    operator_code_id: i32,
    tag_id: Option<i32>,
    timezone: &str,
) -> Result<i32> {
    tracing::debug!(
        "Creating client: number={}, operator_code_id={}, tag_id={:?}, timezone={}",
        number,
        operator_code_id,
        tag_id,
        timezone
    );

    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO clients (number, operator_code_id, tag_id, timezone)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(number)
    .bind(operator_code_id)
    .bind(tag_id)
    .bind(timezone)
    .fetch_one(conn)
    .await?;

    Ok(id)
}

pub async fn get_client<'e>(executor: impl PgExecutor<'e>, id: i32) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(&format!("{CLIENT_COLUMNS} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(client)
}

/// Like [`get_client`], but row-locks the client until the transaction ends.
pub async fn get_client_for_update(conn: &mut PgConnection, id: i32) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(&format!(
        "{CLIENT_COLUMNS} WHERE c.id = $1 FOR UPDATE OF c"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(client)
}

pub async fn update_client(
    conn: &mut PgConnection,
    id: i32,
    number: &str,
    operator_code_id: i32,
    tag_id: Option<i32>,
    timezone: &str,
) -> Result<()> {
    tracing::debug!(
        "Updating client {}: number={}, operator_code_id={}, tag_id={:?}, timezone={}",
        id,
        number,
        operator_code_id,
        tag_id,
        timezone
    );

    sqlx::query(
        r#"
        UPDATE clients
        SET number = $2, operator_code_id = $3, tag_id = $4, timezone = $5
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(number)
    .bind(operator_code_id)
    .bind(tag_id)
    .bind(timezone)
    .execute(conn)
    .await?;

    Ok(())
}

/// Deletes a client, returning the operator code and tag ids it referenced.
pub async fn delete_client(
    conn: &mut PgConnection,
    id: i32,
) -> Result<Option<(i32, Option<i32>)>> {
    let references = sqlx::query_as::<_, (i32, Option<i32>)>(
        r#"
        DELETE FROM clients
        WHERE id = $1
        RETURNING operator_code_id, tag_id
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(references)
}
