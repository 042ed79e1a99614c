use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::courier::GeoPoint;

/// Address resolution seam. The engine never talks to a mapping provider
/// directly; a failed forward lookup is fatal to assignment, a failed
/// reverse lookup only degrades notification text.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address to coordinates. `Ok(None)` means the
    /// provider answered but found nothing.
    async fn forward(&self, address: &str) -> Result<Option<GeoPoint>, AppError>;

    /// Resolve coordinates to a human-readable address.
    async fn reverse(&self, point: &GeoPoint) -> Result<String, AppError>;
}

/// Nominatim-style JSON geocoder over a timeout-bound HTTP client.
pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

#[derive(Deserialize)]
struct ReverseResult {
    display_name: String,
}

impl HttpGeocoder {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn forward(&self, address: &str) -> Result<Option<GeoPoint>, AppError> {
        let url = format!("{}/search", self.base_url);
        let hits: Vec<SearchHit> = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|err| AppError::Geocode(format!("forward request failed: {err}")))?
            .error_for_status()
            .map_err(|err| AppError::Geocode(format!("forward request failed: {err}")))?
            .json()
            .await
            .map_err(|err| AppError::Geocode(format!("forward response invalid: {err}")))?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        let lat = hit
            .lat
            .parse::<f64>()
            .map_err(|err| AppError::Geocode(format!("bad latitude in response: {err}")))?;
        let lng = hit
            .lon
            .parse::<f64>()
            .map_err(|err| AppError::Geocode(format!("bad longitude in response: {err}")))?;

        Ok(Some(GeoPoint { lat, lng }))
    }

    async fn reverse(&self, point: &GeoPoint) -> Result<String, AppError> {
        let url = format!("{}/reverse", self.base_url);
        let result: ReverseResult = self
            .client
            .get(&url)
            .query(&[
                ("lat", point.lat.to_string()),
                ("lon", point.lng.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(|err| AppError::Geocode(format!("reverse request failed: {err}")))?
            .error_for_status()
            .map_err(|err| AppError::Geocode(format!("reverse request failed: {err}")))?
            .json()
            .await
            .map_err(|err| AppError::Geocode(format!("reverse response invalid: {err}")))?;

        Ok(result.display_name)
    }
}
