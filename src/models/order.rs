use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::courier::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryStatus {
    Pending,
    Accepted,
    PickedUp,
    Delivered,
}

impl DeliveryStatus {
    pub fn is_terminal(self) -> bool {
        self == DeliveryStatus::Delivered
    }
}

/// Delivery-lifecycle record, keyed by its own `id` and linked 1:1 to the
/// commerce order via `order_id`. Never deleted; `delivered` is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedOrder {
    pub id: Uuid,
    pub order_id: Uuid,
    pub customer_location: GeoPoint,
    pub delivery_person: Option<Uuid>,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssignedOrder {
    pub fn new(order_id: Uuid, customer_location: GeoPoint) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_id,
            customer_location,
            delivery_person: None,
            status: DeliveryStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
