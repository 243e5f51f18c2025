use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One delivery attempt of a notification to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    pub notification_id: i32,
    pub client_id: i32,
    pub created: DateTime<Utc>,
    /// `true` once the message has been sent.
    pub status: bool,
}
