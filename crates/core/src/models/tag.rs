use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{MailingError, MailingResult};

pub const MAX_TAG_LENGTH: usize = 100;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\d]+$").expect("tag pattern is a valid regex"));

/// A label used to group clients for targeted notifications.
///
/// Word characters only (Unicode letters, digits, underscore).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn parse(value: impl Into<String>) -> MailingResult<Self> {
        let value = value.into();

        if value.chars().count() > MAX_TAG_LENGTH {
            return Err(MailingError::validation(format!(
                "Tag must be at most {MAX_TAG_LENGTH} characters long"
            )));
        }
        if !TAG_PATTERN.is_match(&value) {
            return Err(MailingError::validation(format!(
                "Tag '{value}' may only contain letters, digits and underscores"
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = MailingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
