use std::time::Duration;

use scoutout::infrastructure::observability::DEFAULT_LOG_FILTER;
use scoutout::presentation::config::{Environment, Settings};

#[test]
fn given_no_overrides_when_loading_defaults_then_documented_values() {
    let settings = Settings::defaults().unwrap();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.upload.max_upload_mb, 50);
    assert_eq!(settings.upload.max_upload_bytes(), 50 * 1024 * 1024);
    assert_eq!(settings.batch.max_concurrent_jobs, 4);
    assert_eq!(settings.batch.progress_interval, 10);
    assert_eq!(settings.batch.projection_years, 10);
    assert!(settings.batch.job_timeout_secs.is_none());
    assert!(settings.scoring.random_seed.is_none());
    assert!(settings.geocoding.enabled);
    assert!(settings.cities.dataset_path().is_none());
    assert_eq!(settings.logging.level, DEFAULT_LOG_FILTER);
}

#[test]
fn given_default_batch_settings_when_building_worker_config_then_values_carried() {
    let mut settings = Settings::defaults().unwrap();
    settings.batch.job_timeout_secs = Some(90);

    let config = settings.batch.worker_config().unwrap();

    assert_eq!(config.max_concurrent_jobs, 4);
    assert_eq!(config.projection_horizon.years(), 10);
    assert_eq!(config.job_timeout, Some(Duration::from_secs(90)));
}

#[test]
fn given_projection_years_out_of_range_when_building_worker_config_then_error() {
    let mut settings = Settings::defaults().unwrap();
    settings.batch.projection_years = 0;

    assert!(settings.batch.worker_config().is_err());
}

#[test]
fn given_blank_dataset_path_when_resolving_then_treated_as_unset() {
    let mut settings = Settings::defaults().unwrap();
    settings.cities.dataset_path = Some("   ".to_string());

    assert!(settings.cities.dataset_path().is_none());
}

#[test]
fn given_environment_names_when_parsing_then_aliases_accepted() {
    assert_eq!(
        Environment::try_from("Production".to_string()).unwrap(),
        Environment::Prod
    );
    assert_eq!(
        Environment::try_from("dev".to_string()).unwrap(),
        Environment::Local
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
    assert_eq!(Environment::Test.settings_file(), "appsettings.test");
}

#[test]
fn given_settings_when_building_tracing_config_then_filter_and_environment_set() {
    let settings = Settings::defaults().unwrap();

    let tracing = settings.tracing_config(Environment::Prod);

    assert_eq!(tracing.environment, "prod");
    assert_eq!(tracing.filter, DEFAULT_LOG_FILTER);
}
