use super::{Coordinates, GeocodeResult};

/// Geographic center of the contiguous United States.
pub const US_GEOGRAPHIC_CENTER: Coordinates = Coordinates::new(39.8283, -98.5795);

// Checked in order; first substring hit wins.
const FALLBACK_CITIES: [(&str, Coordinates); 30] = [
    ("new york", Coordinates::new(40.7128, -74.0060)),
    ("los angeles", Coordinates::new(34.0522, -118.2437)),
    ("chicago", Coordinates::new(41.8781, -87.6298)),
    ("houston", Coordinates::new(29.7604, -95.3698)),
    ("phoenix", Coordinates::new(33.4484, -112.0740)),
    ("philadelphia", Coordinates::new(39.9526, -75.1652)),
    ("san antonio", Coordinates::new(29.4241, -98.4936)),
    ("san diego", Coordinates::new(32.7157, -117.1611)),
    ("dallas", Coordinates::new(32.7767, -96.7970)),
    ("san jose", Coordinates::new(37.3382, -121.8863)),
    ("seattle", Coordinates::new(47.6062, -122.3321)),
    ("denver", Coordinates::new(39.7392, -104.9903)),
    ("boston", Coordinates::new(42.3601, -71.0589)),
    ("miami", Coordinates::new(25.7617, -80.1918)),
    ("atlanta", Coordinates::new(33.7490, -84.3880)),
    ("detroit", Coordinates::new(42.3314, -83.0458)),
    ("las vegas", Coordinates::new(36.1699, -115.1398)),
    ("memphis", Coordinates::new(35.1495, -90.0490)),
    ("baltimore", Coordinates::new(39.2904, -76.6122)),
    ("milwaukee", Coordinates::new(43.0389, -87.9065)),
    ("albuquerque", Coordinates::new(35.0844, -106.6504)),
    ("tucson", Coordinates::new(32.2226, -110.9747)),
    ("fresno", Coordinates::new(36.7378, -119.7871)),
    ("sacramento", Coordinates::new(38.5816, -121.4944)),
    ("mesa", Coordinates::new(33.4152, -111.8315)),
    ("kansas city", Coordinates::new(39.0997, -94.5786)),
    ("virginia beach", Coordinates::new(36.8529, -75.9780)),
    ("omaha", Coordinates::new(41.2565, -95.9345)),
    ("colorado springs", Coordinates::new(38.8339, -104.8214)),
    ("raleigh", Coordinates::new(35.7796, -78.6382)),
];

/// City-level lookup used when the geocoding provider cannot answer.
pub fn fallback_geocode(address: &str) -> GeocodeResult {
    let normalized = address.to_lowercase();

    FALLBACK_CITIES
        .iter()
        .find(|(city, _)| normalized.contains(*city))
        .map(|(_, coordinates)| GeocodeResult::found(*coordinates))
        .unwrap_or(GeocodeResult {
            lat: US_GEOGRAPHIC_CENTER.lat,
            lon: US_GEOGRAPHIC_CENTER.lon,
            success: false,
        })
}
