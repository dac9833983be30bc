mod repositories;

pub use repositories::InMemoryBatchJobRepository;
pub use repositories::InMemoryPredictionRepository;
