use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::chat::{ChatMessage, ChatSender};
use crate::state::AppState;

/// Append a message to an order's chat log. Participant checks are the
/// calling service's concern; the core only validates shape and existence.
pub fn post_message(
    state: &AppState,
    order_id: Uuid,
    sender: ChatSender,
    text: &str,
) -> Result<ChatMessage, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("message cannot be empty".to_string()));
    }

    if !state.orders.contains_key(&order_id) {
        return Err(AppError::NotFound(format!("order {order_id} not found")));
    }

    let message = ChatMessage {
        order_id,
        sender,
        message: text.to_string(),
        sent_at: Utc::now(),
    };

    state
        .chats
        .entry(order_id)
        .or_default()
        .push(message.clone());

    Ok(message)
}

/// Full replay of an order's chat, ascending by `sent_at`. Polling clients
/// re-fetch the whole log; there is no cursor.
pub fn list_messages(state: &AppState, order_id: Uuid) -> Result<Vec<ChatMessage>, AppError> {
    if !state.orders.contains_key(&order_id) {
        return Err(AppError::NotFound(format!("order {order_id} not found")));
    }

    let mut messages = state
        .chats
        .get(&order_id)
        .map(|log| log.value().clone())
        .unwrap_or_default();

    messages.sort_by_key(|message| message.sent_at);
    Ok(messages)
}
