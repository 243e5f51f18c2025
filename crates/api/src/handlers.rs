/// Client create, update and delete
pub mod client;
/// Notification CRUD and message listing
pub mod notification;
