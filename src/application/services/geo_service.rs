use std::sync::Arc;

use crate::application::ports::{Geocoder, GeocoderError};
use crate::domain::{City, Coordinates, GeocodeResult, NearbyCity, fallback_geocode};

pub const NEARBY_RADIUS_MILES: f64 = 100.0;
pub const MAX_NEARBY_CITIES: usize = 10;

pub struct GeoService {
    geocoder: Arc<dyn Geocoder>,
    cities: Arc<[City]>,
}

impl GeoService {
    pub fn new(geocoder: Arc<dyn Geocoder>, cities: Arc<[City]>) -> Self {
        Self { geocoder, cities }
    }

    /// Resolves an address, falling back to the static city table when the provider
    /// errors or has no match. Provider failures never reach the caller.
    #[tracing::instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> GeocodeResult {
        match self.geocoder.geocode(address).await {
            Ok(Some(coordinates)) if coordinates.is_valid() => GeocodeResult::found(coordinates),
            Ok(_) => {
                tracing::debug!("Provider had no match, using fallback table");
                fallback_geocode(address)
            }
            Err(GeocoderError::Disabled) => fallback_geocode(address),
            Err(e) => {
                tracing::warn!(error = %e, "Geocoding provider failed, using fallback table");
                fallback_geocode(address)
            }
        }
    }

    /// Up to ten known cities within 100 miles of `target`, nearest first.
    pub fn nearby_cities(&self, target: Coordinates) -> Vec<NearbyCity> {
        let mut nearby: Vec<NearbyCity> = self
            .cities
            .iter()
            .filter_map(|city| {
                let distance = target.distance_miles(&city.location);
                (distance <= NEARBY_RADIUS_MILES).then(|| NearbyCity {
                    name: city.name.clone(),
                    state: city.state.clone(),
                    population: city.population,
                    lat: city.location.lat,
                    lon: city.location.lon,
                    distance_miles: (distance * 10.0).round() / 10.0,
                })
            })
            .collect();

        nearby.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
        nearby.truncate(MAX_NEARBY_CITIES);
        nearby
    }
}
