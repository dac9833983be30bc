use std::str::FromStr;

use scoutout::domain::{
    BatchJob, BatchJobId, BatchJobStatus, Coordinates, Horizon, PropertyFeatures, StoragePath,
    US_GEOGRAPHIC_CENTER, fallback_geocode,
};

#[test]
fn given_features_inside_ranges_when_checking_then_ok() {
    let features = PropertyFeatures::new(75_000.0, 5.0, 7.0, 4.0, 35_000.0);

    assert!(features.check().is_ok());
}

#[test]
fn given_several_bad_features_when_checking_then_every_field_is_reported() {
    let features = PropertyFeatures::new(600_000.0, 120.0, 0.0, 4.0, 50.0);

    let err = features.check().unwrap_err();

    assert!(err.has_field("avgAreaIncome"));
    assert!(err.has_field("avgAreaHouseAge"));
    assert!(err.has_field("avgAreaNumberOfRooms"));
    assert!(err.has_field("areaPopulation"));
    assert!(!err.has_field("avgAreaNumberOfBedrooms"));
}

#[test]
fn given_camel_case_json_when_deserializing_features_then_fields_map() {
    let json = r#"{
        "avgAreaIncome": 75000,
        "avgAreaHouseAge": 5,
        "avgAreaNumberOfRooms": 7,
        "avgAreaNumberOfBedrooms": 4,
        "areaPopulation": 35000
    }"#;

    let features: PropertyFeatures = serde_json::from_str(json).unwrap();

    assert_eq!(features.as_array(), [75_000.0, 5.0, 7.0, 4.0, 35_000.0]);
}

#[test]
fn given_horizon_bounds_when_constructing_then_only_one_to_thirty_accepted() {
    assert!(Horizon::new(0).is_err());
    assert!(Horizon::new(31).unwrap_err().has_field("years"));
    assert_eq!(Horizon::new(1).unwrap().years(), 1);
    assert_eq!(Horizon::new(30).unwrap().years(), 30);
    assert_eq!(Horizon::default().years(), 10);
}

#[test]
fn given_new_batch_job_when_created_then_processing_with_zero_counts() {
    let job = BatchJob::new("homes.csv".to_string());

    assert_eq!(job.status, BatchJobStatus::Processing);
    assert_eq!(job.total_records, 0);
    assert_eq!(job.processed_records, 0);
    assert_eq!(job.failed_records, 0);
    assert!(job.completed_at.is_none());
    assert!(!job.is_terminal());
}

#[test]
fn given_status_strings_when_parsing_then_round_trip_lowercase() {
    for status in [
        BatchJobStatus::Processing,
        BatchJobStatus::Completed,
        BatchJobStatus::Failed,
    ] {
        assert_eq!(BatchJobStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(BatchJobStatus::from_str("queued").is_err());
    assert!(BatchJobStatus::Failed.is_terminal());
}

#[test]
fn given_file_name_with_directories_when_building_storage_path_then_only_base_name_kept() {
    let job_id = BatchJobId::new();

    let path = StoragePath::new(&job_id, "../../etc/my homes.csv");

    assert_eq!(
        path.as_str(),
        format!("{}/my_homes.csv", job_id.as_uuid())
    );
}

#[test]
fn given_hidden_or_empty_name_when_building_storage_path_then_falls_back() {
    let job_id = BatchJobId::new();

    let path = StoragePath::new(&job_id, "...");

    assert!(path.as_str().ends_with("/upload.csv"));
}

#[test]
fn given_known_city_in_address_when_falling_back_then_city_coordinates_returned() {
    let result = fallback_geocode("123 Woodward Ave, Detroit, MI");

    assert!(result.success);
    assert_eq!((result.lat, result.lon), (42.3314, -83.0458));
}

#[test]
fn given_unknown_place_when_falling_back_then_us_center_without_success() {
    let result = fallback_geocode("Nowhereville");

    assert!(!result.success);
    assert_eq!(result.coordinates(), US_GEOGRAPHIC_CENTER);
}

#[test]
fn given_out_of_range_latitude_when_validating_coordinates_then_invalid() {
    assert!(!Coordinates::new(91.0, 0.0).is_valid());
    assert!(!Coordinates::new(0.0, f64::INFINITY).is_valid());
    assert!(Coordinates::new(-33.9, 151.2).is_valid());
}
