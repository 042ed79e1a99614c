use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::models::courier::Courier;
use crate::state::AppState;

/// Courier resolved from the `Authorization: Bearer <token>` header. Tokens
/// are minted at registration and live in the token table.
pub struct AuthedCourier(pub Courier);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthedCourier {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("malformed authorization header".to_string()))?;

        let courier_id = state
            .courier_tokens
            .get(token)
            .map(|entry| *entry.value())
            .ok_or_else(|| AppError::Unauthorized("unknown token".to_string()))?;

        let courier = state
            .couriers
            .get(&courier_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::Unauthorized("courier no longer registered".to_string()))?;

        Ok(AuthedCourier(courier))
    }
}
