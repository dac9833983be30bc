use async_trait::async_trait;

use crate::domain::{BatchJobId, Prediction, PredictionId};

use super::RepositoryError;

#[async_trait]
pub trait PredictionRepository: Send + Sync {
    async fn create(&self, prediction: &Prediction) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: PredictionId) -> Result<Option<Prediction>, RepositoryError>;

    /// Newest first, optionally capped.
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Prediction>, RepositoryError>;

    async fn list_by_batch_job(
        &self,
        batch_job_id: BatchJobId,
    ) -> Result<Vec<Prediction>, RepositoryError>;
}
