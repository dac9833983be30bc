#[path = "../../helpers/mod.rs"]
mod helpers;

use scoutout::application::services::{MAX_NEARBY_CITIES, NEARBY_RADIUS_MILES};
use scoutout::domain::{Coordinates, US_GEOGRAPHIC_CENTER};

use helpers::{StubGeocoder, geo_service};

const DETROIT: Coordinates = Coordinates::new(42.3314, -83.0458);

#[tokio::test]
async fn given_provider_unreachable_when_geocoding_known_city_then_fallback_succeeds() {
    let service = geo_service(StubGeocoder::Unreachable);

    let result = service.geocode("Detroit, MI").await;

    assert!(result.success);
    assert_eq!((result.lat, result.lon), (42.3314, -83.0458));
}

#[tokio::test]
async fn given_provider_unreachable_when_geocoding_unknown_place_then_us_center_returned() {
    let service = geo_service(StubGeocoder::Unreachable);

    let result = service.geocode("Nowhereville").await;

    assert!(!result.success);
    assert_eq!(result.coordinates(), US_GEOGRAPHIC_CENTER);
}

#[tokio::test]
async fn given_provider_answer_when_geocoding_then_provider_coordinates_win() {
    let spot = Coordinates::new(42.2808, -83.7430);
    let service = geo_service(StubGeocoder::Found(spot));

    let result = service.geocode("Detroit, MI").await;

    assert!(result.success);
    assert_eq!(result.coordinates(), spot);
}

#[tokio::test]
async fn given_provider_without_match_when_geocoding_then_fallback_used() {
    let service = geo_service(StubGeocoder::NoMatch);

    let result = service.geocode("somewhere in Chicago").await;

    assert!(result.success);
    assert_eq!((result.lat, result.lon), (41.8781, -87.6298));
}

#[tokio::test]
async fn given_provider_returns_invalid_coordinates_when_geocoding_then_fallback_used() {
    let service = geo_service(StubGeocoder::Found(Coordinates::new(120.0, 500.0)));

    let result = service.geocode("Nowhereville").await;

    assert!(!result.success);
}

#[test]
fn given_detroit_when_finding_nearby_cities_then_sorted_bounded_and_close() {
    let service = geo_service(StubGeocoder::NoMatch);

    let nearby = service.nearby_cities(DETROIT);

    assert!(!nearby.is_empty());
    assert!(nearby.len() <= MAX_NEARBY_CITIES);
    assert_eq!(nearby[0].name, "Detroit");
    assert_eq!(nearby[0].distance_miles, 0.0);
    for pair in nearby.windows(2) {
        assert!(pair[0].distance_miles <= pair[1].distance_miles);
    }
    assert!(nearby.iter().all(|c| c.distance_miles <= NEARBY_RADIUS_MILES));
}

#[test]
fn given_open_ocean_when_finding_nearby_cities_then_empty() {
    let service = geo_service(StubGeocoder::NoMatch);

    let nearby = service.nearby_cities(Coordinates::new(30.0, -45.0));

    assert!(nearby.is_empty());
}

#[test]
fn given_distances_when_reported_then_rounded_to_tenths() {
    let service = geo_service(StubGeocoder::NoMatch);

    let nearby = service.nearby_cities(DETROIT);

    for city in nearby {
        let scaled = city.distance_miles * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-9, "{}", city.distance_miles);
    }
}
