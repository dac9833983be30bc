use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{Geocoder, GeocoderError};
use crate::domain::Coordinates;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// OpenStreetMap Nominatim search, restricted to US results.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

// Nominatim returns coordinates as strings.
#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, GeocoderError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| GeocoderError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocoderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("format", "json"),
                ("q", address),
                ("limit", "1"),
                ("countrycodes", "us"),
            ])
            .send()
            .await
            .map_err(|e| GeocoderError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocoderError::UnexpectedStatus(response.status().as_u16()));
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| GeocoderError::InvalidResponse(e.to_string()))?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        let lat = hit
            .lat
            .parse::<f64>()
            .map_err(|e| GeocoderError::InvalidResponse(format!("lat {:?}: {}", hit.lat, e)))?;
        let lon = hit
            .lon
            .parse::<f64>()
            .map_err(|e| GeocoderError::InvalidResponse(format!("lon {:?}: {}", hit.lon, e)))?;

        Ok(Some(Coordinates::new(lat, lon)))
    }
}
