use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{City, Coordinates};

/// About 130 large and metro-area US cities. Far smaller than a full
/// top-1000 table, so sparse regions get few neighbours; point
/// `cities.dataset_path` at a larger file in the same format for full coverage.
const EMBEDDED_CITIES: &str = include_str!("../../../data/us_cities.csv");

#[derive(Deserialize)]
struct CityRecord {
    #[serde(alias = "city", alias = "name")]
    #[serde(rename = "City")]
    name: String,
    #[serde(alias = "state")]
    #[serde(rename = "State")]
    state: String,
    #[serde(alias = "population")]
    #[serde(rename = "Population", default)]
    population: Option<u64>,
    lat: f64,
    lon: f64,
}

/// Parses a `City,State,Population,lat,lon` table. Rows without usable
/// coordinates are dropped.
pub fn parse_cities<R: std::io::Read>(reader: R) -> Result<Vec<City>, CityDatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cities = Vec::new();
    for (index, result) in rdr.deserialize::<CityRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(row = index + 1, error = %e, "Skipping city row");
                continue;
            }
        };

        let location = Coordinates::new(record.lat, record.lon);
        if !location.is_valid() {
            continue;
        }

        cities.push(City {
            name: record.name,
            state: record.state,
            population: record.population.unwrap_or(0),
            location,
        });
    }

    if cities.is_empty() {
        return Err(CityDatasetError::Empty);
    }
    Ok(cities)
}

pub fn load_embedded_cities() -> Result<Arc<[City]>, CityDatasetError> {
    parse_cities(EMBEDDED_CITIES.as_bytes()).map(Arc::from)
}

pub fn load_cities_from_path(path: &Path) -> Result<Arc<[City]>, CityDatasetError> {
    let file = std::fs::File::open(path).map_err(|e| CityDatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_cities(std::io::BufReader::new(file)).map(Arc::from)
}

#[derive(Debug, thiserror::Error)]
pub enum CityDatasetError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("city dataset has no usable rows")]
    Empty,
}
