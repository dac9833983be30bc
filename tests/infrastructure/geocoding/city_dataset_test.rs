use std::io::Write;

use scoutout::infrastructure::geocoding::{
    CityDatasetError, load_cities_from_path, load_embedded_cities, parse_cities,
};

#[test]
fn given_embedded_dataset_when_loading_then_cities_available() {
    let cities = load_embedded_cities().unwrap();

    assert!(cities.len() > 100);
    assert!(cities.iter().any(|c| c.name == "Detroit" && c.state == "Michigan"));
}

#[test]
fn given_rows_with_bad_coordinates_when_parsing_then_they_are_skipped() {
    let csv = "City,State,Population,lat,lon\n\
               Good,Ohio,1000,40.0,-82.0\n\
               NoLat,Ohio,1000,,-82.0\n\
               OffPlanet,Ohio,1000,140.0,-82.0\n\
               Unknown,Ohio,,41.0,-81.0\n";

    let cities = parse_cities(csv.as_bytes()).unwrap();

    let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Good", "Unknown"]);
    assert_eq!(cities[1].population, 0);
}

#[test]
fn given_no_usable_rows_when_parsing_then_empty_error() {
    let result = parse_cities("City,State,Population,lat,lon\n".as_bytes());

    assert!(matches!(result, Err(CityDatasetError::Empty)));
}

#[test]
fn given_dataset_file_when_loading_from_path_then_parsed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "City,State,Population,lat,lon").unwrap();
    writeln!(file, "Toledo,Ohio,270871,41.6528,-83.5379").unwrap();

    let cities = load_cities_from_path(file.path()).unwrap();

    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].population, 270_871);
}

#[test]
fn given_missing_file_when_loading_from_path_then_io_error() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = load_cities_from_path(&dir.path().join("absent.csv"));

    assert!(matches!(result, Err(CityDatasetError::Io { .. })));
}
