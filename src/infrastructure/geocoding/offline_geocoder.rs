use async_trait::async_trait;

use crate::application::ports::{Geocoder, GeocoderError};
use crate::domain::Coordinates;

/// Stands in for the provider when outbound geocoding is switched off.
pub struct OfflineGeocoder;

#[async_trait]
impl Geocoder for OfflineGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>, GeocoderError> {
        Err(GeocoderError::Disabled)
    }
}
