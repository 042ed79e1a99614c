use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use uuid::Uuid;

use crate::engine::assignment::{assign, AssignmentOutcome, IncomingOrder};
use crate::error::AppError;
use crate::models::order::AssignedOrder;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(intake_order))
        .route("/orders/:id", get(get_order))
}

/// Intake hook for the commerce side: called once an order is paid. Resolves
/// the destination, opens the delivery record and notifies nearby couriers.
async fn intake_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IncomingOrder>,
) -> Result<(StatusCode, Json<AssignmentOutcome>), AppError> {
    let outcome = assign(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssignedOrder>, AppError> {
    let order = state
        .orders
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

    Ok(Json(order.value().clone()))
}
