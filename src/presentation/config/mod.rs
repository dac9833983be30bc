mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    BatchSettings, CitySettings, GeocodingSettings, LoggingSettings, ScoringSettings,
    ServerSettings, Settings, StorageSettings, UploadSettings,
};
