use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::rest::auth::AuthedCourier;
use crate::error::AppError;
use crate::models::courier::{Courier, GeoPoint};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/couriers", post(register_courier).get(list_couriers))
        .route("/couriers/:id/location", patch(update_location))
        .route("/couriers/:id/availability", patch(update_availability))
}

#[derive(Deserialize)]
pub struct RegisterCourierRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub location: GeoPoint,
}

#[derive(Serialize)]
pub struct RegisteredCourier {
    pub courier: Courier,
    /// Bearer token for the courier action API; shown once at registration.
    pub token: String,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub location: GeoPoint,
}

#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub is_available: bool,
}

async fn register_courier(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterCourierRequest>,
) -> Result<(StatusCode, Json<RegisteredCourier>), AppError> {
    for (field, value) in [
        ("name", &payload.name),
        ("phone", &payload.phone),
        ("email", &payload.email),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} cannot be empty")));
        }
    }

    let courier = Courier {
        id: Uuid::new_v4(),
        name: payload.name,
        phone: payload.phone,
        email: payload.email,
        location: payload.location,
        is_available: true,
        updated_at: Utc::now(),
    };

    let token = Uuid::new_v4().simple().to_string();
    state.courier_tokens.insert(token.clone(), courier.id);
    state.couriers.insert(courier.id, courier.clone());

    Ok((StatusCode::CREATED, Json(RegisteredCourier { courier, token })))
}

async fn list_couriers(State(state): State<Arc<AppState>>) -> Json<Vec<Courier>> {
    let couriers = state
        .couriers
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(couriers)
}

async fn update_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    AuthedCourier(caller): AuthedCourier,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<Courier>, AppError> {
    if caller.id != id {
        return Err(AppError::Forbidden(
            "couriers may only update their own location".to_string(),
        ));
    }

    let mut courier = state
        .couriers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("courier {id} not found")))?;

    courier.location = payload.location;
    courier.updated_at = Utc::now();

    Ok(Json(courier.clone()))
}

async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    AuthedCourier(caller): AuthedCourier,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<Json<Courier>, AppError> {
    if caller.id != id {
        return Err(AppError::Forbidden(
            "couriers may only update their own availability".to_string(),
        ));
    }

    let mut courier = state
        .couriers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("courier {id} not found")))?;

    courier.is_available = payload.is_available;
    courier.updated_at = Utc::now();

    Ok(Json(courier.clone()))
}
