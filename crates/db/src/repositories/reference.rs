//! Resolve-or-create and pruning of the operator code and tag lookup rows.
//!
//! These functions take the caller's connection so they run inside the
//! caller's transaction. Resolving upserts the row, which keeps it locked
//! until commit; pruning deletes only when no client references the row.

use eyre::Result;
use mailing_core::models::{operator_code::OperatorCode, tag::Tag};
use sqlx::{PgConnection, PgExecutor};

use crate::models::DbReference;

pub async fn resolve_operator_code(
    conn: &mut PgConnection,
    code: OperatorCode,
) -> Result<DbReference> {
    let reference = sqlx::query_as::<_, DbReference>(
        r#"
        INSERT INTO operator_codes (operator_code)
        VALUES ($1)
        ON CONFLICT (operator_code)
        DO UPDATE SET operator_code = EXCLUDED.operator_code
        RETURNING id, (xmax = 0) AS created
        "#,
    )
    .bind(code.value())
    .fetch_one(conn)
    .await?;

    tracing::debug!(
        "Resolved operator code {}: id={}, created={}",
        code,
        reference.id,
        reference.created
    );
    Ok(reference)
}

pub async fn resolve_tag(conn: &mut PgConnection, tag: &Tag) -> Result<DbReference> {
    let reference = sqlx::query_as::<_, DbReference>(
        r#"
        INSERT INTO tags (tag)
        VALUES ($1)
        ON CONFLICT (tag)
        DO UPDATE SET tag = EXCLUDED.tag
        RETURNING id, (xmax = 0) AS created
        "#,
    )
    .bind(tag.as_str())
    .fetch_one(conn)
    .await?;

    tracing::debug!(
        "Resolved tag {}: id={}, created={}",
        tag,
        reference.id,
        reference.created
    );
    Ok(reference)
}

/// Deletes the operator code unless a client still uses it. Returns the
/// deleted code.
pub async fn prune_operator_code(conn: &mut PgConnection, id: i32) -> Result<Option<i16>> {
    let pruned = sqlx::query_scalar::<_, i16>(
        r#"
        DELETE FROM operator_codes oc
        WHERE oc.id = $1
          AND NOT EXISTS (SELECT 1 FROM clients c WHERE c.operator_code_id = oc.id)
        RETURNING oc.operator_code
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(pruned)
}

/// Deletes the tag unless a client still uses it. Returns the deleted tag.
pub async fn prune_tag(conn: &mut PgConnection, id: i32) -> Result<Option<String>> {
    let pruned = sqlx::query_scalar::<_, String>(
        r#"
        DELETE FROM tags t
        WHERE t.id = $1
          AND NOT EXISTS (SELECT 1 FROM clients c WHERE c.tag_id = t.id)
        RETURNING t.tag::text
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(pruned)
}

/// Ids of the given tags, share-locked until the transaction ends.
pub async fn tag_ids(conn: &mut PgConnection, tags: &[Tag]) -> Result<Vec<i32>> {
    let names: Vec<String> = tags.iter().map(|tag| tag.as_str().to_string()).collect();

    let ids = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT id FROM tags
        WHERE tag = ANY($1)
        ORDER BY id
        FOR SHARE
        "#,
    )
    .bind(names)
    .fetch_all(conn)
    .await?;

    Ok(ids)
}

/// Ids of the given operator codes, share-locked until the transaction ends.
pub async fn operator_code_ids(
    conn: &mut PgConnection,
    codes: &[OperatorCode],
) -> Result<Vec<i32>> {
    let values: Vec<i16> = codes.iter().map(|code| code.value()).collect();

    let ids = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT id FROM operator_codes
        WHERE operator_code = ANY($1)
        ORDER BY id
        FOR SHARE
        "#,
    )
    .bind(values)
    .fetch_all(conn)
    .await?;

    Ok(ids)
}

pub async fn missing_tags<'e>(executor: impl PgExecutor<'e>, tags: &[Tag]) -> Result<Vec<String>> {
    let names: Vec<String> = tags.iter().map(|tag| tag.as_str().to_string()).collect();

    let missing = sqlx::query_scalar::<_, String>(
        r#"
        SELECT wanted.tag
        FROM UNNEST($1::text[]) AS wanted(tag)
        WHERE NOT EXISTS (SELECT 1 FROM tags t WHERE t.tag = wanted.tag)
        ORDER BY wanted.tag
        "#,
    )
    .bind(names)
    .fetch_all(executor)
    .await?;

    Ok(missing)
}

pub async fn missing_operator_codes<'e>(
    executor: impl PgExecutor<'e>,
    codes: &[OperatorCode],
) -> Result<Vec<i16>> {
    let values: Vec<i16> = codes.iter().map(|code| code.value()).collect();

    let missing = sqlx::query_scalar::<_, i16>(
        r#"
        SELECT wanted.code
        FROM UNNEST($1::smallint[]) AS wanted(code)
        WHERE NOT EXISTS (SELECT 1 FROM operator_codes oc WHERE oc.operator_code = wanted.code)
        ORDER BY wanted.code
        "#,
    )
    .bind(values)
    .fetch_all(executor)
    .await?;

    Ok(missing)
}
