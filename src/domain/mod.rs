mod batch_job;
mod batch_job_status;
mod fallback_geocoding;
mod geo;
mod horizon;
mod market_trends;
mod prediction;
mod property_features;
mod storage_path;
mod validation_error;

pub use batch_job::{BatchJob, BatchJobId};
pub use batch_job_status::BatchJobStatus;
pub use fallback_geocoding::{US_GEOGRAPHIC_CENTER, fallback_geocode};
pub use geo::{City, Coordinates, EARTH_RADIUS_MILES, GeocodeResult, NearbyCity};
pub use horizon::Horizon;
pub use market_trends::{FeatureCorrelation, MarketTrends, MonthlyPrice};
pub use prediction::{MarketFactors, Prediction, PredictionId, PredictionResult, YearProjection};
pub use property_features::PropertyFeatures;
pub use storage_path::StoragePath;
pub use validation_error::{FeatureValidationError, FieldViolation};
