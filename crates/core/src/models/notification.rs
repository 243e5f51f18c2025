use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{MailingError, MailingResult};

use super::{operator_code::OperatorCode, tag::Tag};

/// A broadcast campaign and the filters selecting its recipients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i32,
    pub text: String,
    pub start_datetime: DateTime<Utc>,
    pub finish_datetime: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub operator_codes: Vec<OperatorCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotificationRequest {
    pub text: String,
    pub start_datetime: DateTime<Utc>,
    pub finish_datetime: DateTime<Utc>,
    pub tags: Option<Vec<String>>,
    pub operator_codes: Option<Vec<i64>>,
}

impl CreateNotificationRequest {
    pub fn validate(self) -> MailingResult<NewNotification> {
        ensure_schedule(self.start_datetime, self.finish_datetime)?;

        Ok(NewNotification {
            text: parse_text(self.text)?,
            start_datetime: self.start_datetime,
            finish_datetime: self.finish_datetime,
            tags: parse_tags(self.tags.unwrap_or_default())?,
            operator_codes: parse_operator_codes(self.operator_codes.unwrap_or_default())?,
        })
    }
}

/// A validated notification. Tags and codes are sorted and unique.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub text: String,
    pub start_datetime: DateTime<Utc>,
    pub finish_datetime: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub operator_codes: Vec<OperatorCode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNotificationRequest {
    pub text: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub finish_datetime: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub operator_codes: Option<Vec<i64>>,
}

impl UpdateNotificationRequest {
    /// Validates the patch against the stored notification it applies to.
    pub fn validate(self, current: &Notification) -> MailingResult<NotificationChanges> {
        let start = self.start_datetime.unwrap_or(current.start_datetime);
        let finish = self.finish_datetime.unwrap_or(current.finish_datetime);
        ensure_schedule(start, finish)?;

        Ok(NotificationChanges {
            text: self.text.map(parse_text).transpose()?,
            start_datetime: self.start_datetime,
            finish_datetime: self.finish_datetime,
            tags: self.tags.map(parse_tags).transpose()?,
            operator_codes: self.operator_codes.map(parse_operator_codes).transpose()?,
        })
    }
}

/// Validated partial update. A present `tags`/`operator_codes` list
/// replaces the whole association set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationChanges {
    pub text: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub finish_datetime: Option<DateTime<Utc>>,
    pub tags: Option<Vec<Tag>>,
    pub operator_codes: Option<Vec<OperatorCode>>,
}

/// Start must be strictly earlier than finish.
pub fn ensure_schedule(start: DateTime<Utc>, finish: DateTime<Utc>) -> MailingResult<()> {
    if start >= finish {
        return Err(MailingError::validation(
            "finish_datetime must be later than start_datetime",
        ));
    }
    Ok(())
}

fn parse_text(text: String) -> MailingResult<String> {
    if text.trim().is_empty() {
        return Err(MailingError::validation("text may not be blank"));
    }
    Ok(text)
}

fn parse_tags(raw: Vec<String>) -> MailingResult<Vec<Tag>> {
    let mut tags = raw.into_iter().map(Tag::parse).collect::<MailingResult<Vec<_>>>()?;
    tags.sort();
    tags.dedup();
    Ok(tags)
}

fn parse_operator_codes(raw: Vec<i64>) -> MailingResult<Vec<OperatorCode>> {
    let mut codes = raw
        .into_iter()
        .map(OperatorCode::new)
        .collect::<MailingResult<Vec<_>>>()?;
    codes.sort();
    codes.dedup();
    Ok(codes)
}
