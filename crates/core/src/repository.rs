//! Persistence boundary of the mailing domain.
//!
//! Every write method is one transaction in the implementing store:
//! resolving or creating referenced lookup rows, writing the entity and
//! pruning orphaned lookup rows all commit or roll back together.

use async_trait::async_trait;

use crate::{
    errors::MailingResult,
    models::{
        client::{Client, ClientChanges, ClientUpdate, NewClient, PrunedReferences},
        message::Message,
        notification::{NewNotification, Notification, NotificationChanges},
        operator_code::OperatorCode,
        phone::PhoneNumber,
        tag::Tag,
    },
};

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Whether a client other than `exclude_id` already owns `number`.
    async fn number_exists(&self, number: PhoneNumber, exclude_id: Option<i32>)
    -> MailingResult<bool>;

    /// Stores a client, resolving or creating its operator code and tag.
    async fn create_client(&self, client: NewClient) -> MailingResult<Client>;

    /// Applies `changes` and prunes the lookup rows the client stopped
    /// referencing. `None` if the client does not exist.
    async fn update_client(
        &self,
        id: i32,
        changes: ClientChanges,
    ) -> MailingResult<Option<ClientUpdate>>;

    /// Deletes a client and prunes its now unreferenced lookup rows.
    /// `None` if the client does not exist.
    async fn delete_client(&self, id: i32) -> MailingResult<Option<PrunedReferences>>;
}

#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// Returns the tags of `tags` that have no row.
    async fn missing_tags(&self, tags: Vec<Tag>) -> MailingResult<Vec<Tag>>;

    /// Returns the codes of `codes` that have no row.
    async fn missing_operator_codes(
        &self,
        codes: Vec<OperatorCode>,
    ) -> MailingResult<Vec<OperatorCode>>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn list_notifications(&self) -> MailingResult<Vec<Notification>>;

    async fn get_notification(&self, id: i32) -> MailingResult<Option<Notification>>;

    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> MailingResult<Notification>;

    async fn update_notification(
        &self,
        id: i32,
        changes: NotificationChanges,
    ) -> MailingResult<Option<Notification>>;

    /// `false` if the notification does not exist.
    async fn delete_notification(&self, id: i32) -> MailingResult<bool>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Records a pending delivery of a notification to a client.
    async fn record_message(&self, notification_id: i32, client_id: i32)
    -> MailingResult<Message>;

    async fn mark_sent(&self, id: i32) -> MailingResult<Option<Message>>;

    async fn list_messages(&self, notification_id: i32) -> MailingResult<Vec<Message>>;
}
