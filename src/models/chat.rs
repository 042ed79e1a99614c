use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    Customer,
    Courier,
}

/// A single message in an order's chat log, ordered by `sent_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub order_id: Uuid,
    pub sender: ChatSender,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}
