mod city_dataset;
mod nominatim_geocoder;
mod offline_geocoder;

pub use city_dataset::{
    CityDatasetError, load_cities_from_path, load_embedded_cities, parse_cities,
};
pub use nominatim_geocoder::{DEFAULT_NOMINATIM_URL, NominatimGeocoder};
pub use offline_geocoder::OfflineGeocoder;
