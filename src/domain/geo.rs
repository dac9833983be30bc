use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_MILES: f64 = 3959.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great-circle distance in miles (haversine).
    pub fn distance_miles(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_MILES * c
    }
}

/// Outcome of a geocoding lookup. `success` is false when the location is a default guess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lon: f64,
    pub success: bool,
}

impl GeocodeResult {
    pub fn found(coordinates: Coordinates) -> Self {
        Self {
            lat: coordinates.lat,
            lon: coordinates.lon,
            success: true,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub state: String,
    pub population: u64,
    pub location: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyCity {
    pub name: String,
    pub state: String,
    pub population: u64,
    pub lat: f64,
    pub lon: f64,
    pub distance_miles: f64,
}
