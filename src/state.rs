use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::integrations::geocoder::Geocoder;
use crate::integrations::notifier::Notifier;
use crate::models::chat::ChatMessage;
use crate::models::courier::Courier;
use crate::models::order::AssignedOrder;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub couriers: DashMap<Uuid, Courier>,
    /// Bearer token -> courier id, minted at registration.
    pub courier_tokens: DashMap<String, Uuid>,
    /// AssignedOrder id -> record. The single source of truth for delivery state.
    pub orders: DashMap<Uuid, AssignedOrder>,
    /// Commerce order id -> AssignedOrder id; claiming an entry here enforces
    /// the one-record-per-commerce-order invariant.
    pub order_index: DashMap<Uuid, Uuid>,
    pub chats: DashMap<Uuid, Vec<ChatMessage>>,
    /// Snapshot of the order after every lifecycle transition, for in-process
    /// consumers (the surrounding commerce modules).
    pub order_events_tx: broadcast::Sender<AssignedOrder>,
    pub geocoder: Arc<dyn Geocoder>,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        notifier: Arc<dyn Notifier>,
        event_buffer_size: usize,
    ) -> Self {
        let (order_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            couriers: DashMap::new(),
            courier_tokens: DashMap::new(),
            orders: DashMap::new(),
            order_index: DashMap::new(),
            chats: DashMap::new(),
            order_events_tx,
            geocoder,
            notifier,
            metrics: Metrics::new(),
        }
    }

    pub fn publish_order_event(&self, order: &AssignedOrder) {
        let _ = self.order_events_tx.send(order.clone());
    }
}
