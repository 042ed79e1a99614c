use std::time::Instant;

use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::notify::notify_assignment;
use crate::error::AppError;
use crate::geo::{is_within_radius, MATCH_RADIUS_KM};
use crate::models::courier::{Courier, GeoPoint};
use crate::models::order::AssignedOrder;
use crate::state::AppState;

/// Order handed over by the commerce side once it is paid. Carries either a
/// destination address, pre-resolved coordinates, or both.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingOrder {
    pub order_id: Uuid,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentOutcome {
    pub order: AssignedOrder,
    /// Matched couriers a notification was dispatched to. Zero is a valid
    /// outcome, not an error.
    pub notified_count: usize,
}

pub async fn assign(state: &AppState, incoming: IncomingOrder) -> Result<AssignmentOutcome, AppError> {
    let start = Instant::now();

    match assign_order(state, incoming).await {
        Ok(outcome) => {
            record_outcome(state, "success", start);
            Ok(outcome)
        }
        Err(err) => {
            let outcome = match &err {
                AppError::Geocode(_) => "geocode_error",
                AppError::Conflict(_) => "duplicate",
                _ => "error",
            };
            record_outcome(state, outcome, start);
            Err(err)
        }
    }
}

async fn assign_order(
    state: &AppState,
    incoming: IncomingOrder,
) -> Result<AssignmentOutcome, AppError> {
    let customer_location = resolve_location(state, &incoming).await?;

    // Claimed only after geocoding succeeds, so a failed resolution leaves no
    // partial state behind.
    let order = AssignedOrder::new(incoming.order_id, customer_location);
    match state.order_index.entry(incoming.order_id) {
        Entry::Occupied(_) => {
            return Err(AppError::Conflict(format!(
                "order {} is already assigned",
                incoming.order_id
            )));
        }
        Entry::Vacant(vacant) => {
            vacant.insert(order.id);
        }
    }

    state.orders.insert(order.id, order.clone());

    let matched: Vec<Courier> = state
        .couriers
        .iter()
        .filter_map(|entry| {
            let courier = entry.value();
            let in_reach = courier.is_available
                && is_within_radius(&customer_location, &courier.location, MATCH_RADIUS_KM);

            if in_reach {
                Some(courier.clone())
            } else {
                None
            }
        })
        .collect();

    for courier in &matched {
        notify_assignment(state, courier, order.id, &customer_location).await;
    }

    state.publish_order_event(&order);

    info!(
        order_id = %order.order_id,
        delivery_id = %order.id,
        notified = matched.len(),
        "order assigned to delivery pool"
    );

    Ok(AssignmentOutcome {
        order,
        notified_count: matched.len(),
    })
}

async fn resolve_location(
    state: &AppState,
    incoming: &IncomingOrder,
) -> Result<GeoPoint, AppError> {
    if let Some(location) = incoming.location {
        return Ok(location);
    }

    let address = incoming
        .address
        .as_deref()
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest("order needs a destination address or coordinates".to_string())
        })?;

    state
        .geocoder
        .forward(address)
        .await?
        .ok_or_else(|| AppError::Geocode(format!("no result for address '{address}'")))
}

fn record_outcome(state: &AppState, outcome: &str, start: Instant) {
    state
        .metrics
        .assignment_latency_seconds
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());
    state
        .metrics
        .assignments_total
        .with_label_values(&[outcome])
        .inc();
}
