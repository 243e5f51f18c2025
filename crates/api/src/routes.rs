/// Client collection under `/v1/client/`
pub mod client;
/// Liveness and version endpoints
pub mod health;
/// Notification collection under `/v1/notification/`
pub mod notification;
