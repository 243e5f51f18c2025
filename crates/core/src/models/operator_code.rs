use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{MailingError, MailingResult};

/// Numeric carrier prefix a client's phone number belongs to.
///
/// Stored as a `SMALLINT`, so only `0..=32767` is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i16")]
pub struct OperatorCode(i16);

impl OperatorCode {
    pub const MIN: i16 = 0;
    pub const MAX: i16 = i16::MAX;

    pub fn new(value: i64) -> MailingResult<Self> {
        i16::try_from(value)
            .ok()
            .filter(|code| *code >= Self::MIN)
            .map(Self)
            .ok_or_else(|| {
                MailingError::validation(format!(
                    "Operator code {value} must be between {} and {}",
                    Self::MIN,
                    Self::MAX
                ))
            })
    }

    pub const fn value(self) -> i16 {
        self.0
    }
}

impl TryFrom<i64> for OperatorCode {
    type Error = MailingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OperatorCode> for i16 {
    fn from(code: OperatorCode) -> Self {
        code.0
    }
}

impl fmt::Display for OperatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
