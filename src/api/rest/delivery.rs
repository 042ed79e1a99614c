use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use serde::Serialize;
use uuid::Uuid;

use crate::api::rest::auth::AuthedCourier;
use crate::engine::lifecycle;
use crate::error::AppError;
use crate::models::order::AssignedOrder;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/delivery/orders", get(list_available))
        .route("/delivery/assigned", get(list_assigned))
        .route("/delivery/orders/:id/accept", post(accept_order))
        .route("/delivery/:id/pickup", patch(pickup_order))
        .route("/delivery/:id/complete", patch(complete_order))
}

#[derive(Serialize)]
struct OrdersResponse {
    orders: Vec<AssignedOrder>,
}

#[derive(Serialize)]
struct ActionResponse {
    message: &'static str,
    order: AssignedOrder,
}

async fn list_available(
    State(state): State<Arc<AppState>>,
    AuthedCourier(courier): AuthedCourier,
) -> Json<OrdersResponse> {
    Json(OrdersResponse {
        orders: lifecycle::list_available(&state, &courier),
    })
}

async fn list_assigned(
    State(state): State<Arc<AppState>>,
    AuthedCourier(courier): AuthedCourier,
) -> Json<OrdersResponse> {
    Json(OrdersResponse {
        orders: lifecycle::list_assigned(&state, courier.id),
    })
}

async fn accept_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    AuthedCourier(courier): AuthedCourier,
) -> Result<Json<ActionResponse>, AppError> {
    let order = lifecycle::accept(&state, id, courier.id)?;
    Ok(Json(ActionResponse {
        message: "order accepted",
        order,
    }))
}

async fn pickup_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    AuthedCourier(courier): AuthedCourier,
) -> Result<Json<ActionResponse>, AppError> {
    let order = lifecycle::mark_picked_up(&state, id, courier.id)?;
    Ok(Json(ActionResponse {
        message: "order picked up",
        order,
    }))
}

async fn complete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    AuthedCourier(courier): AuthedCourier,
) -> Result<Json<ActionResponse>, AppError> {
    let order = lifecycle::complete(&state, id, courier.id)?;
    Ok(Json(ActionResponse {
        message: "order delivered",
        order,
    }))
}
