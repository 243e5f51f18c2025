use std::{fmt, str::FromStr};

use phonenumber::Mode;
use serde::{Deserialize, Serialize};

use crate::errors::{MailingError, MailingResult};

/// A phone number kept in E.164 form (`+12015550123`).
///
/// Parsing follows libphonenumber: the input must carry a `+` country
/// code, may use the usual visual separators, and must be a valid number
/// for the region it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(input: &str) -> MailingResult<Self> {
        let number = phonenumber::parse(None, input.trim()).map_err(|err| {
            MailingError::validation(format!("Phone number '{input}' could not be parsed: {err}"))
        })?;

        if !phonenumber::is_valid(&number) {
            return Err(MailingError::validation(format!(
                "Phone number '{input}' is not a valid number"
            )));
        }

        Ok(Self(number.format().mode(Mode::E164).to_string()))
    }

    pub fn as_e164(&self) -> &str {
        &self.0
    }
}

impl FromStr for PhoneNumber {
    type Err = MailingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = MailingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(number: PhoneNumber) -> Self {
        number.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
