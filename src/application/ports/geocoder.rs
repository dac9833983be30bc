use async_trait::async_trait;

use crate::domain::Coordinates;

/// Address lookup backed by an external provider.
///
/// `Ok(None)` means the provider answered but had no match.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GeocoderError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("provider returned status {0}")]
    UnexpectedStatus(u16),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("geocoding provider disabled")]
    Disabled,
}
