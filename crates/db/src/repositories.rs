pub mod client;
pub mod message;
pub mod notification;
pub mod reference;
