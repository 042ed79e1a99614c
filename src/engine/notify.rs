use tracing::warn;
use uuid::Uuid;

use crate::models::courier::{Courier, GeoPoint};
use crate::state::AppState;

/// Best-effort assignment notice over both contact channels. Nothing here can
/// fail the assignment that already happened; every error is logged and
/// absorbed.
pub async fn notify_assignment(
    state: &AppState,
    courier: &Courier,
    order_id: Uuid,
    customer_location: &GeoPoint,
) {
    let address = match state.geocoder.reverse(customer_location).await {
        Ok(address) => address,
        Err(err) => {
            warn!(order_id = %order_id, error = %err, "reverse geocoding failed; using raw coordinates");
            format!("{:.5}, {:.5}", customer_location.lat, customer_location.lng)
        }
    };

    let text = format!(
        "New delivery order {order_id} is waiting near you. Deliver to: {address}. \
         Open the courier app to accept it."
    );

    match state.notifier.sms(&courier.phone, &text).await {
        Ok(()) => {
            state
                .metrics
                .notifications_total
                .with_label_values(&["sms", "success"])
                .inc();
        }
        Err(err) => {
            state
                .metrics
                .notifications_total
                .with_label_values(&["sms", "error"])
                .inc();
            warn!(courier_id = %courier.id, order_id = %order_id, error = %err, "sms notification failed");
        }
    }

    match state
        .notifier
        .email(&courier.email, "New delivery order", &text)
        .await
    {
        Ok(()) => {
            state
                .metrics
                .notifications_total
                .with_label_values(&["email", "success"])
                .inc();
        }
        Err(err) => {
            state
                .metrics
                .notifications_total
                .with_label_values(&["email", "error"])
                .inc();
            warn!(courier_id = %courier.id, order_id = %order_id, error = %err, "email notification failed");
        }
    }
}
