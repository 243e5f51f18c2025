//! PostgreSQL implementation of the `mailing-core` repository traits.
//!
//! Every write runs in its own transaction: lookup rows are resolved (or
//! created) with the caller's connection, the entity is written, and
//! orphaned lookup rows are pruned before commit.

use async_trait::async_trait;
use mailing_core::{
    errors::{MailingError, MailingResult},
    models::{
        client::{Client, ClientChanges, ClientUpdate, NewClient, PrunedReferences},
        message::Message,
        notification::{NewNotification, Notification, NotificationChanges},
        operator_code::OperatorCode,
        phone::PhoneNumber,
        tag::Tag,
    },
    repository::{
        ClientRepository, MessageRepository, NotificationRepository, ReferenceRepository,
    },
};
use sqlx::{PgConnection, error::ErrorKind};

use crate::{
    DbPool,
    repositories::{client, message, notification, reference},
};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Lifts a storage error into the domain taxonomy. Constraint violations
/// are caller mistakes and surface as validation errors.
fn store_error(err: impl Into<eyre::Report>) -> MailingError {
    let report = err.into();

    if let Some(sqlx::Error::Database(db_err)) = report.downcast_ref::<sqlx::Error>() {
        let message = match (db_err.kind(), db_err.constraint()) {
            (ErrorKind::UniqueViolation, Some("clients_number_key")) => {
                Some("Client with this number already exists")
            }
            (ErrorKind::CheckViolation, Some("valid_schedule")) => {
                Some("finish_datetime must be later than start_datetime")
            }
            (ErrorKind::UniqueViolation, _) => Some("Record already exists"),
            (ErrorKind::ForeignKeyViolation, _) => Some("Referenced record does not exist"),
            _ => None,
        };
        if let Some(message) = message {
            return MailingError::validation(message);
        }
    }

    MailingError::Database(report)
}

fn operator_code_from_row(code: i16) -> MailingResult<OperatorCode> {
    OperatorCode::new(i64::from(code))
}

/// Resolves filter values to row ids, failing if any of them vanished
/// since validation.
async fn filter_ids(
    conn: &mut PgConnection,
    tags: &[Tag],
    codes: &[OperatorCode],
) -> MailingResult<(Vec<i32>, Vec<i32>)> {
    let tag_ids = reference::tag_ids(&mut *conn, tags)
        .await
        .map_err(store_error)?;
    if tag_ids.len() != tags.len() {
        return Err(MailingError::validation("One or more tags do not exist"));
    }

    let code_ids = reference::operator_code_ids(&mut *conn, codes)
        .await
        .map_err(store_error)?;
    if code_ids.len() != codes.len() {
        return Err(MailingError::validation(
            "One or more operator codes do not exist",
        ));
    }

    Ok((tag_ids, code_ids))
}

#[async_trait]
impl ClientRepository for PgStore {
    async fn number_exists(
        &self,
        number: PhoneNumber,
        exclude_id: Option<i32>,
    ) -> MailingResult<bool> {
        client::number_exists(&self.pool, number.as_e164(), exclude_id)
            .await
            .map_err(store_error)
    }

    async fn create_client(&self, new_client: NewClient) -> MailingResult<Client> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let operator_code = reference::resolve_operator_code(&mut tx, new_client.operator_code)
            .await
            .map_err(store_error)?;
        let tag = match &new_client.tag {
            Some(tag) => Some(
                reference::resolve_tag(&mut tx, tag)
                    .await
                    .map_err(store_error)?,
            ),
            None => None,
        };

        let id = client::insert_client(
            &mut tx,
            new_client.number.as_e164(),
            operator_code.id,
            tag.map(|tag| tag.id),
            new_client.timezone.name(),
        )
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;

        Ok(Client {
            id,
            number: new_client.number,
            operator_code: new_client.operator_code,
            tag: new_client.tag,
            timezone: new_client.timezone,
        })
    }

    async fn update_client(
        &self,
        id: i32,
        changes: ClientChanges,
    ) -> MailingResult<Option<ClientUpdate>> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let Some(current) = client::get_client_for_update(&mut tx, id)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };
        if changes.is_empty() {
            tx.commit().await.map_err(store_error)?;
            return Ok(Some(ClientUpdate {
                client: Client::try_from(current)?,
                pruned: PrunedReferences::default(),
            }));
        }

        let operator_code_id = match changes.operator_code {
            Some(code) if code.value() != current.operator_code => {
                reference::resolve_operator_code(&mut tx, code)
                    .await
                    .map_err(store_error)?
                    .id
            }
            _ => current.operator_code_id,
        };
        let tag_id = match &changes.tag {
            Some(tag) if current.tag.as_deref() != Some(tag.as_str()) => Some(
                reference::resolve_tag(&mut tx, tag)
                    .await
                    .map_err(store_error)?
                    .id,
            ),
            _ => current.tag_id,
        };
        let number = changes
            .number
            .as_ref()
            .map_or(current.number.as_str(), PhoneNumber::as_e164);
        let timezone = changes
            .timezone
            .map_or(current.timezone.as_str(), |timezone| timezone.name());

        client::update_client(&mut tx, id, number, operator_code_id, tag_id, timezone)
            .await
            .map_err(store_error)?;

        let mut pruned = PrunedReferences::default();
        if operator_code_id != current.operator_code_id {
            pruned.operator_code = reference::prune_operator_code(&mut tx, current.operator_code_id)
                .await
                .map_err(store_error)?
                .map(operator_code_from_row)
                .transpose()?;
        }
        if let Some(old_tag_id) = current.tag_id.filter(|old| Some(*old) != tag_id) {
            pruned.tag = reference::prune_tag(&mut tx, old_tag_id)
                .await
                .map_err(store_error)?
                .map(Tag::parse)
                .transpose()?;
        }

        let row = client::get_client(&mut *tx, id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| MailingError::not_found(format!("Client with ID {id} not found")))?;

        tx.commit().await.map_err(store_error)?;

        Ok(Some(ClientUpdate {
            client: Client::try_from(row)?,
            pruned,
        }))
    }

    async fn delete_client(&self, id: i32) -> MailingResult<Option<PrunedReferences>> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let Some((operator_code_id, tag_id)) = client::delete_client(&mut tx, id)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };

        let mut pruned = PrunedReferences {
            operator_code: reference::prune_operator_code(&mut tx, operator_code_id)
                .await
                .map_err(store_error)?
                .map(operator_code_from_row)
                .transpose()?,
            tag: None,
        };
        if let Some(tag_id) = tag_id {
            pruned.tag = reference::prune_tag(&mut tx, tag_id)
                .await
                .map_err(store_error)?
                .map(Tag::parse)
                .transpose()?;
        }

        tx.commit().await.map_err(store_error)?;

        Ok(Some(pruned))
    }
}

#[async_trait]
impl ReferenceRepository for PgStore {
    async fn missing_tags(&self, tags: Vec<Tag>) -> MailingResult<Vec<Tag>> {
        reference::missing_tags(&self.pool, &tags)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(Tag::parse)
            .collect()
    }

    async fn missing_operator_codes(
        &self,
        codes: Vec<OperatorCode>,
    ) -> MailingResult<Vec<OperatorCode>> {
        reference::missing_operator_codes(&self.pool, &codes)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(operator_code_from_row)
            .collect()
    }
}

#[async_trait]
impl NotificationRepository for PgStore {
    async fn list_notifications(&self) -> MailingResult<Vec<Notification>> {
        notification::list_notifications(&self.pool)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(Notification::try_from)
            .collect()
    }

    async fn get_notification(&self, id: i32) -> MailingResult<Option<Notification>> {
        notification::get_notification(&self.pool, id)
            .await
            .map_err(store_error)?
            .map(Notification::try_from)
            .transpose()
    }

    async fn create_notification(
        &self,
        new_notification: NewNotification,
    ) -> MailingResult<Notification> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let id = notification::insert_notification(
            &mut tx,
            &new_notification.text,
            new_notification.start_datetime,
            new_notification.finish_datetime,
        )
        .await
        .map_err(store_error)?;

        let (tag_ids, code_ids) = filter_ids(
            &mut tx,
            &new_notification.tags,
            &new_notification.operator_codes,
        )
        .await?;
        notification::replace_tags(&mut tx, id, &tag_ids)
            .await
            .map_err(store_error)?;
        notification::replace_operator_codes(&mut tx, id, &code_ids)
            .await
            .map_err(store_error)?;

        // Tags and codes in the order retrieval returns them.
        let row = notification::get_notification(&mut *tx, id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| {
                MailingError::not_found(format!("Notification with ID {id} not found"))
            })?;

        tx.commit().await.map_err(store_error)?;

        Notification::try_from(row)
    }

    async fn update_notification(
        &self,
        id: i32,
        changes: NotificationChanges,
    ) -> MailingResult<Option<Notification>> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let exists = notification::update_notification(
            &mut tx,
            id,
            changes.text.as_deref(),
            changes.start_datetime,
            changes.finish_datetime,
        )
        .await
        .map_err(store_error)?;
        if !exists {
            return Ok(None);
        }

        let (tag_ids, code_ids) = filter_ids(
            &mut tx,
            changes.tags.as_deref().unwrap_or_default(),
            changes.operator_codes.as_deref().unwrap_or_default(),
        )
        .await?;
        if changes.tags.is_some() {
            notification::replace_tags(&mut tx, id, &tag_ids)
                .await
                .map_err(store_error)?;
        }
        if changes.operator_codes.is_some() {
            notification::replace_operator_codes(&mut tx, id, &code_ids)
                .await
                .map_err(store_error)?;
        }

        let row = notification::get_notification(&mut *tx, id)
            .await
            .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;

        row.map(Notification::try_from).transpose()
    }

    async fn delete_notification(&self, id: i32) -> MailingResult<bool> {
        notification::delete_notification(&self.pool, id)
            .await
            .map_err(store_error)
    }
}

#[async_trait]
impl MessageRepository for PgStore {
    async fn record_message(
        &self,
        notification_id: i32,
        client_id: i32,
    ) -> MailingResult<Message> {
        message::insert_message(&self.pool, notification_id, client_id)
            .await
            .map(Message::from)
            .map_err(store_error)
    }

    async fn mark_sent(&self, id: i32) -> MailingResult<Option<Message>> {
        message::mark_sent(&self.pool, id)
            .await
            .map(|message| message.map(Message::from))
            .map_err(store_error)
    }

    async fn list_messages(&self, notification_id: i32) -> MailingResult<Vec<Message>> {
        message::get_messages_by_notification_id(&self.pool, notification_id)
            .await
            .map(|messages| messages.into_iter().map(Message::from).collect())
            .map_err(store_error)
    }
}
