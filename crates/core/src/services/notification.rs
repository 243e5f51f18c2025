use std::sync::Arc;

use tracing::info;

use crate::{
    errors::{MailingError, MailingResult},
    models::{
        message::Message,
        notification::{CreateNotificationRequest, Notification, UpdateNotificationRequest},
        operator_code::OperatorCode,
        tag::Tag,
    },
    repository::{MessageRepository, NotificationRepository, ReferenceRepository},
};

/// Full CRUD over notifications plus read access to their messages.
///
/// Tag and operator-code filters may only name rows that already exist;
/// unlike clients, notifications never create lookup rows.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    references: Arc<dyn ReferenceRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        references: Arc<dyn ReferenceRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            notifications,
            references,
            messages,
        }
    }

    pub async fn list(&self) -> MailingResult<Vec<Notification>> {
        self.notifications.list_notifications().await
    }

    pub async fn get(&self, id: i32) -> MailingResult<Notification> {
        self.notifications
            .get_notification(id)
            .await?
            .ok_or_else(|| notification_not_found(id))
    }

    pub async fn create(&self, request: CreateNotificationRequest) -> MailingResult<Notification> {
        let new_notification = request.validate()?;
        self.ensure_tags_exist(&new_notification.tags).await?;
        self.ensure_operator_codes_exist(&new_notification.operator_codes)
            .await?;

        let notification = self
            .notifications
            .create_notification(new_notification)
            .await?;
        info!(
            notification_id = notification.id,
            tags = notification.tags.len(),
            operator_codes = notification.operator_codes.len(),
            "Notification created"
        );

        Ok(notification)
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateNotificationRequest,
    ) -> MailingResult<Notification> {
        let current = self.get(id).await?;
        let changes = request.validate(&current)?;
        if let Some(tags) = &changes.tags {
            self.ensure_tags_exist(tags).await?;
        }
        if let Some(codes) = &changes.operator_codes {
            self.ensure_operator_codes_exist(codes).await?;
        }

        self.notifications
            .update_notification(id, changes)
            .await?
            .ok_or_else(|| notification_not_found(id))
    }

    pub async fn delete(&self, id: i32) -> MailingResult<()> {
        if !self.notifications.delete_notification(id).await? {
            return Err(notification_not_found(id));
        }
        info!(notification_id = id, "Notification deleted");
        Ok(())
    }

    pub async fn messages(&self, id: i32) -> MailingResult<Vec<Message>> {
        self.get(id).await?;
        self.messages.list_messages(id).await
    }

    async fn ensure_tags_exist(&self, tags: &[Tag]) -> MailingResult<()> {
        if tags.is_empty() {
            return Ok(());
        }

        let missing = self.references.missing_tags(tags.to_vec()).await?;
        if !missing.is_empty() {
            return Err(MailingError::validation(format!(
                "Unknown tags: {}",
                join(&missing)
            )));
        }
        Ok(())
    }

    async fn ensure_operator_codes_exist(&self, codes: &[OperatorCode]) -> MailingResult<()> {
        if codes.is_empty() {
            return Ok(());
        }

        let missing = self.references.missing_operator_codes(codes.to_vec()).await?;
        if !missing.is_empty() {
            return Err(MailingError::validation(format!(
                "Unknown operator codes: {}",
                join(&missing)
            )));
        }
        Ok(())
    }
}

fn notification_not_found(id: i32) -> MailingError {
    MailingError::not_found(format!("Notification with ID {id} not found"))
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
