mod in_memory_batch_job_repository;
mod in_memory_prediction_repository;

pub use in_memory_batch_job_repository::InMemoryBatchJobRepository;
pub use in_memory_prediction_repository::InMemoryPredictionRepository;
