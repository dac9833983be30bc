use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

use crate::application::services::BatchWorkerConfig;
use crate::domain::{FeatureValidationError, Horizon};
use crate::infrastructure::geocoding::DEFAULT_NOMINATIM_URL;
use crate::infrastructure::observability::{DEFAULT_LOG_FILTER, TracingConfig};
use crate::presentation::config::Environment;

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub upload: UploadSettings,
    pub batch: BatchSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub cities: CitySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub local_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSettings {
    pub max_concurrent_jobs: usize,
    pub queue_capacity: usize,
    pub progress_interval: u32,
    pub projection_years: u32,
    #[serde(default)]
    pub job_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    /// Pins every random draw when set.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    pub enabled: bool,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CitySettings {
    #[serde(default)]
    pub dataset_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.{env}.toml` if present, then `APP_*` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        with_defaults()?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only.
    pub fn defaults() -> Result<Self, ConfigError> {
        with_defaults()?.build()?.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig::new(
            environment.as_str(),
            self.logging.enable_json,
            Some(self.logging.level.as_str()),
        )
    }
}

impl UploadSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl BatchSettings {
    pub fn worker_config(&self) -> Result<BatchWorkerConfig, FeatureValidationError> {
        Ok(BatchWorkerConfig {
            max_concurrent_jobs: self.max_concurrent_jobs,
            progress_interval: self.progress_interval,
            projection_horizon: Horizon::new(self.projection_years)?,
            job_timeout: self.job_timeout_secs.map(Duration::from_secs),
        })
    }
}

impl GeocodingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CitySettings {
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.dataset_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000_i64)?
        .set_default("storage.local_path", "./data/uploads")?
        .set_default("upload.max_upload_mb", 50_i64)?
        .set_default("batch.max_concurrent_jobs", 4_i64)?
        .set_default("batch.queue_capacity", 100_i64)?
        .set_default("batch.progress_interval", 10_i64)?
        .set_default("batch.projection_years", i64::from(Horizon::DEFAULT_YEARS))?
        .set_default("geocoding.enabled", true)?
        .set_default("geocoding.base_url", DEFAULT_NOMINATIM_URL)?
        .set_default("geocoding.user_agent", "scoutout/0.1 (property valuation)")?
        .set_default("geocoding.timeout_secs", 5_i64)?
        .set_default("logging.level", DEFAULT_LOG_FILTER)?
        .set_default("logging.enable_json", false)
}
