//! Shared fixtures for the unit tests: canned collaborators and builders.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::integrations::geocoder::Geocoder;
use crate::integrations::notifier::Notifier;
use crate::models::courier::{Courier, GeoPoint};
use crate::state::AppState;

/// Colombo Fort, the fixture location used across the scenario tests.
pub fn colombo_fort() -> GeoPoint {
    GeoPoint {
        lat: 6.9271,
        lng: 79.8612,
    }
}

pub fn courier_at(id: Uuid, lat: f64, lng: f64, is_available: bool) -> Courier {
    Courier {
        id,
        name: format!("courier-{id}"),
        phone: "+94110000000".to_string(),
        email: "courier@example.test".to_string(),
        location: GeoPoint { lat, lng },
        is_available,
        updated_at: Utc::now(),
    }
}

/// Geocoder with a single canned forward answer; reverse always resolves.
pub struct TestGeocoder {
    pub forward: Option<GeoPoint>,
}

#[async_trait]
impl Geocoder for TestGeocoder {
    async fn forward(&self, _address: &str) -> Result<Option<GeoPoint>, AppError> {
        Ok(self.forward)
    }

    async fn reverse(&self, _point: &GeoPoint) -> Result<String, AppError> {
        Ok("42 Galle Road, Colombo".to_string())
    }
}

/// Records every send instead of talking to a gateway.
#[derive(Default)]
pub struct TestNotifier {
    sms: Mutex<Vec<(String, String)>>,
    emails: Mutex<Vec<(String, String)>>,
}

impl TestNotifier {
    pub fn sms_log(&self) -> Vec<(String, String)> {
        self.sms.lock().unwrap().clone()
    }

    pub fn email_log(&self) -> Vec<(String, String)> {
        self.emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for TestNotifier {
    async fn sms(&self, phone: &str, text: &str) -> Result<(), AppError> {
        self.sms
            .lock()
            .unwrap()
            .push((phone.to_string(), text.to_string()));
        Ok(())
    }

    async fn email(&self, to: &str, _subject: &str, text: &str) -> Result<(), AppError> {
        self.emails
            .lock()
            .unwrap()
            .push((to.to_string(), text.to_string()));
        Ok(())
    }
}

pub fn test_state(forward: Option<GeoPoint>) -> (Arc<AppState>, Arc<TestNotifier>) {
    let notifier = Arc::new(TestNotifier::default());
    let state = AppState::new(Arc::new(TestGeocoder { forward }), notifier.clone(), 16);
    (Arc::new(state), notifier)
}
