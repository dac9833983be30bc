mod batch_job_repository;
mod geocoder;
mod prediction_repository;
mod random_source;
mod repository_error;
mod staging_store;

pub use batch_job_repository::BatchJobRepository;
pub use geocoder::{Geocoder, GeocoderError};
pub use prediction_repository::PredictionRepository;
pub use random_source::RandomSource;
pub use repository_error::RepositoryError;
pub use staging_store::{StagingStore, StagingStoreError};
