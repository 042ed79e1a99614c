pub mod assignment;
pub mod chat;
pub mod lifecycle;
pub mod notify;
