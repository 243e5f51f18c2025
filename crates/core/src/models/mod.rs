pub mod client;
pub mod message;
pub mod notification;
pub mod operator_code;
pub mod phone;
pub mod tag;
pub mod timezone;
