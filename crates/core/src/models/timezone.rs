use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{MailingError, MailingResult};

/// Longest zone name the `clients.timezone` column holds.
pub const MAX_TIMEZONE_LENGTH: usize = 32;

/// IANA timezone of a client, e.g. `Europe/Moscow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone(Tz);

impl Timezone {
    pub fn parse(name: &str) -> MailingResult<Self> {
        if name.len() > MAX_TIMEZONE_LENGTH {
            return Err(MailingError::validation(format!(
                "Timezone name '{name}' is longer than {MAX_TIMEZONE_LENGTH} characters"
            )));
        }

        name.parse::<Tz>()
            .map(Self)
            .map_err(|_| MailingError::validation(format!("Unknown timezone '{name}'")))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl TryFrom<String> for Timezone {
    type Error = MailingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timezone> for String {
    fn from(timezone: Timezone) -> Self {
        timezone.name().to_string()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
