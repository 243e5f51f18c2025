use serde::{Deserialize, Serialize};

use crate::errors::MailingResult;

use super::{operator_code::OperatorCode, phone::PhoneNumber, tag::Tag, timezone::Timezone};

/// A client with its operator code and tag flattened to scalar values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i32,
    pub number: PhoneNumber,
    pub operator_code: OperatorCode,
    pub tag: Option<Tag>,
    pub timezone: Timezone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub number: String,
    pub operator_code: i64,
    pub tag: Option<String>,
    pub timezone: String,
}

impl CreateClientRequest {
    pub fn validate(self) -> MailingResult<NewClient> {
        Ok(NewClient {
            number: PhoneNumber::parse(&self.number)?,
            operator_code: OperatorCode::new(self.operator_code)?,
            tag: self.tag.map(Tag::parse).transpose()?,
            timezone: Timezone::parse(&self.timezone)?,
        })
    }
}

/// A validated client ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub number: PhoneNumber,
    pub operator_code: OperatorCode,
    pub tag: Option<Tag>,
    pub timezone: Timezone,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClientRequest {
    pub number: Option<String>,
    pub operator_code: Option<i64>,
    pub tag: Option<String>,
    pub timezone: Option<String>,
}

impl UpdateClientRequest {
    pub fn validate(self) -> MailingResult<ClientChanges> {
        Ok(ClientChanges {
            number: self.number.as_deref().map(PhoneNumber::parse).transpose()?,
            operator_code: self.operator_code.map(OperatorCode::new).transpose()?,
            tag: self.tag.map(Tag::parse).transpose()?,
            timezone: self.timezone.as_deref().map(Timezone::parse).transpose()?,
        })
    }
}

/// Validated partial update of a client. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientChanges {
    pub number: Option<PhoneNumber>,
    pub operator_code: Option<OperatorCode>,
    pub tag: Option<Tag>,
    pub timezone: Option<Timezone>,
}

impl ClientChanges {
    pub fn is_empty(&self) -> bool {
        self.number.is_none()
            && self.operator_code.is_none()
            && self.tag.is_none()
            && self.timezone.is_none()
    }
}

/// Lookup rows deleted because no client references them anymore.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrunedReferences {
    pub operator_code: Option<OperatorCode>,
    pub tag: Option<Tag>,
}

impl PrunedReferences {
    pub fn is_empty(&self) -> bool {
        self.operator_code.is_none() && self.tag.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientUpdate {
    pub client: Client,
    pub pruned: PrunedReferences,
}
