use chrono::{DateTime, Utc};
use mailing_core::{
    errors::MailingError,
    models::{
        client::Client, message::Message, notification::Notification,
        operator_code::OperatorCode, phone::PhoneNumber, tag::Tag, timezone::Timezone,
    },
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A client row joined with its operator code and tag.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClient {
    pub id: i32,
    pub number: String,
    pub operator_code_id: i32,
    pub operator_code: i16,
    pub tag_id: Option<i32>,
    pub tag: Option<String>,
    pub timezone: String,
}

/// Result of a resolve-or-create of a lookup row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub struct DbReference {
    pub id: i32,
    /// `true` when the row was inserted by this call.
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: i32,
    pub text: String,
    pub start_datetime: DateTime<Utc>,
    pub finish_datetime: DateTime<Utc>,
    pub tags: Vec<String>,
    pub operator_codes: Vec<i16>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMessage {
    pub id: i32,
    pub notification_id: i32,
    pub client_id: i32,
    pub created: DateTime<Utc>,
    pub status: bool,
}

impl TryFrom<DbClient> for Client {
    type Error = MailingError;

    fn try_from(row: DbClient) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            number: PhoneNumber::parse(&row.number)?,
            operator_code: OperatorCode::new(i64::from(row.operator_code))?,
            tag: row.tag.map(Tag::parse).transpose()?,
            timezone: Timezone::parse(&row.timezone)?,
        })
    }
}

impl TryFrom<DbNotification> for Notification {
    type Error = MailingError;

    fn try_from(row: DbNotification) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            text: row.text,
            start_datetime: row.start_datetime,
            finish_datetime: row.finish_datetime,
            tags: row
                .tags
                .into_iter()
                .map(Tag::parse)
                .collect::<Result<_, _>>()?,
            operator_codes: row
                .operator_codes
                .into_iter()
                .map(|code| OperatorCode::new(i64::from(code)))
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<DbMessage> for Message {
    fn from(row: DbMessage) -> Self {
        Self {
            id: row.id,
            notification_id: row.notification_id,
            client_id: row.client_id,
            created: row.created,
            status: row.status,
        }
    }
}
