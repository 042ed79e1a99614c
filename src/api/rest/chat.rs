use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::chat;
use crate::error::AppError;
use crate::models::chat::{ChatMessage, ChatSender};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat/:order_id", get(list_messages))
        .route("/chat/send", post(send_message))
}

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub order_id: Uuid,
    pub sender: ChatSender,
    pub message: String,
}

async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    Ok(Json(chat::list_messages(&state, order_id)?))
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    let message = chat::post_message(&state, payload.order_id, payload.sender, &payload.message)?;
    Ok((StatusCode::CREATED, Json(message)))
}
