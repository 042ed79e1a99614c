pub mod chat;
pub mod courier;
pub mod order;
