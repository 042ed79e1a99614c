use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::geo::{is_within_radius, MATCH_RADIUS_KM};
use crate::models::courier::Courier;
use crate::models::order::{AssignedOrder, DeliveryStatus};
use crate::state::AppState;

/// Pending orders within the match radius of the courier's current location.
pub fn list_available(state: &AppState, courier: &Courier) -> Vec<AssignedOrder> {
    state
        .orders
        .iter()
        .filter_map(|entry| {
            let order = entry.value();
            let offerable = order.status == DeliveryStatus::Pending
                && is_within_radius(&order.customer_location, &courier.location, MATCH_RADIUS_KM);

            if offerable {
                Some(order.clone())
            } else {
                None
            }
        })
        .collect()
}

/// The courier's own in-flight orders (`accepted` or `pickedUp`).
pub fn list_assigned(state: &AppState, courier_id: Uuid) -> Vec<AssignedOrder> {
    state
        .orders
        .iter()
        .filter_map(|entry| {
            let order = entry.value();
            let in_flight = order.delivery_person == Some(courier_id)
                && matches!(
                    order.status,
                    DeliveryStatus::Accepted | DeliveryStatus::PickedUp
                );

            if in_flight {
                Some(order.clone())
            } else {
                None
            }
        })
        .collect()
}

/// The one contended transition. The `get_mut` guard holds the shard write
/// lock for the whole check-and-set, so at most one caller ever sees
/// `pending`; the loser gets `Conflict` and re-polls.
pub fn accept(
    state: &AppState,
    order_id: Uuid,
    courier_id: Uuid,
) -> Result<AssignedOrder, AppError> {
    let snapshot = {
        let mut order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| AppError::NotFound(format!("order {order_id} not found")))?;

        if order.status != DeliveryStatus::Pending {
            state
                .metrics
                .accept_attempts_total
                .with_label_values(&["conflict"])
                .inc();
            return Err(AppError::Conflict(format!(
                "order {order_id} has already been taken"
            )));
        }

        order.status = DeliveryStatus::Accepted;
        order.delivery_person = Some(courier_id);
        order.updated_at = Utc::now();
        order.clone()
    };

    state
        .metrics
        .accept_attempts_total
        .with_label_values(&["accepted"])
        .inc();
    state.publish_order_event(&snapshot);

    Ok(snapshot)
}

pub fn mark_picked_up(
    state: &AppState,
    order_id: Uuid,
    courier_id: Uuid,
) -> Result<AssignedOrder, AppError> {
    let snapshot = {
        let mut order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| AppError::NotFound(format!("order {order_id} not found")))?;

        if order.delivery_person != Some(courier_id) {
            return Err(AppError::Forbidden(format!(
                "order {order_id} is not assigned to this courier"
            )));
        }

        if order.status != DeliveryStatus::Accepted {
            return Err(AppError::InvalidTransition(format!(
                "order {order_id} cannot be picked up from its current status"
            )));
        }

        order.status = DeliveryStatus::PickedUp;
        order.updated_at = Utc::now();
        order.clone()
    };

    state.publish_order_event(&snapshot);
    Ok(snapshot)
}

/// Ownership is the only precondition: an `accepted` order may be completed
/// without a pickup step. `delivered` is terminal.
pub fn complete(
    state: &AppState,
    order_id: Uuid,
    courier_id: Uuid,
) -> Result<AssignedOrder, AppError> {
    let snapshot = {
        let mut order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| AppError::NotFound(format!("order {order_id} not found")))?;

        if order.status.is_terminal() {
            return Err(AppError::InvalidTransition(format!(
                "order {order_id} is already delivered"
            )));
        }

        if order.delivery_person != Some(courier_id) {
            return Err(AppError::Forbidden(format!(
                "order {order_id} is not assigned to this courier"
            )));
        }

        order.status = DeliveryStatus::Delivered;
        order.updated_at = Utc::now();
        order.clone()
    };

    state.publish_order_event(&snapshot);
    Ok(snapshot)
}
