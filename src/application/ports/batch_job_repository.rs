use async_trait::async_trait;

use crate::domain::{BatchJob, BatchJobId, BatchJobStatus};

use super::RepositoryError;

#[async_trait]
pub trait BatchJobRepository: Send + Sync {
    async fn create(&self, job: &BatchJob) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: BatchJobId) -> Result<Option<BatchJob>, RepositoryError>;

    /// All jobs, newest first.
    async fn list(&self) -> Result<Vec<BatchJob>, RepositoryError>;

    async fn set_total_records(&self, id: BatchJobId, total: u32) -> Result<(), RepositoryError>;

    /// Adds `by` to the processed counter and returns the new value.
    async fn increment_processed(&self, id: BatchJobId, by: u32) -> Result<u32, RepositoryError>;

    /// Adds `by` to the failed-row counter and returns the new value.
    async fn increment_failed(&self, id: BatchJobId, by: u32) -> Result<u32, RepositoryError>;

    /// Moves the job to a terminal status and stamps `completed_at`.
    async fn finish(
        &self,
        id: BatchJobId,
        status: BatchJobStatus,
        error_message: Option<&str>,
    ) -> Result<BatchJob, RepositoryError>;
}
