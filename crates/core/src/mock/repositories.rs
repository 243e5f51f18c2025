use async_trait::async_trait;
use mockall::mock;

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
    repository::{
        ClientRepository, MessageRepository, NotificationRepository, ReferenceRepository,
    },
};

// Mock repositories for testing
mock! {
    pub ClientRepo {}

    #[async_trait]
    impl ClientRepository for ClientRepo {
        async fn number_exists(
            &self,
            number: PhoneNumber,
            exclude_id: Option<i32>,
        ) -> MailingResult<bool>;

        async fn create_client(&self, client: NewClient) -> MailingResult<Client>;

        async fn update_client(
            &self,
            id: i32,
            changes: ClientChanges,
        ) -> MailingResult<Option<ClientUpdate>>;

        async fn delete_client(&self, id: i32) -> MailingResult<Option<PrunedReferences>>;
    }
}

mock! {
    pub ReferenceRepo {}

    #[async_trait]
    impl ReferenceRepository for ReferenceRepo {
        async fn missing_tags(&self, tags: Vec<Tag>) -> MailingResult<Vec<Tag>>;

        async fn missing_operator_codes(
            &self,
            codes: Vec<OperatorCode>,
        ) -> MailingResult<Vec<OperatorCode>>;
    }
}

mock! {
    pub NotificationRepo {}

    #[async_trait]
    impl NotificationRepository for NotificationRepo {
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

        async fn delete_notification(&self, id: i32) -> MailingResult<bool>;
    }
}

mock! {
    pub MessageRepo {}

    #[async_trait]
    impl MessageRepository for MessageRepo {
        async fn record_message(
            &self,
            notification_id: i32,
            client_id: i32,
        ) -> MailingResult<Message>;

        async fn mark_sent(&self, id: i32) -> MailingResult<Option<Message>>;

        async fn list_messages(&self, notification_id: i32) -> MailingResult<Vec<Message>>;
    }
}
