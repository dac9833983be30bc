use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{BatchJobRepository, RepositoryError};
use crate::domain::{BatchJob, BatchJobId, BatchJobStatus};

/// Batch job store guarded by a single lock, so every counter update is an
/// atomic read-modify-write.
#[derive(Default)]
pub struct InMemoryBatchJobRepository {
    jobs: RwLock<HashMap<BatchJobId, BatchJob>>,
}

impl InMemoryBatchJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: BatchJobId) -> RepositoryError {
    RepositoryError::NotFound(format!("batch job {}", id.as_uuid()))
}

fn ensure_running(job: &BatchJob) -> Result<(), RepositoryError> {
    if job.is_terminal() {
        return Err(RepositoryError::ConstraintViolation(format!(
            "batch job {} is already {}",
            job.id.as_uuid(),
            job.status
        )));
    }
    Ok(())
}

fn ensure_within_total(job: &BatchJob, processed: u32, failed: u32) -> Result<(), RepositoryError> {
    match processed.checked_add(failed) {
        Some(counted) if counted <= job.total_records => Ok(()),
        _ => Err(RepositoryError::ConstraintViolation(format!(
            "batch job {}: {} processed + {} failed exceeds {} total records",
            job.id.as_uuid(),
            processed,
            failed,
            job.total_records
        ))),
    }
}

#[async_trait]
impl BatchJobRepository for InMemoryBatchJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id.as_uuid()))]
    async fn create(&self, job: &BatchJob) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "batch job {} already exists",
                job.id.as_uuid()
            )));
        }
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: BatchJobId) -> Result<Option<BatchJob>, RepositoryError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<BatchJob>, RepositoryError> {
        let mut jobs: Vec<BatchJob> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    #[instrument(skip(self), fields(job_id = %id.as_uuid()))]
    async fn set_total_records(&self, id: BatchJobId, total: u32) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or_else(|| not_found(id))?;
        ensure_running(job)?;
        if job.processed_records + job.failed_records > total {
            return Err(RepositoryError::ConstraintViolation(format!(
                "batch job {} already counted more than {} records",
                id.as_uuid(),
                total
            )));
        }
        job.total_records = total;
        Ok(())
    }

    async fn increment_processed(&self, id: BatchJobId, by: u32) -> Result<u32, RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or_else(|| not_found(id))?;
        ensure_running(job)?;
        let processed = job.processed_records.saturating_add(by);
        ensure_within_total(job, processed, job.failed_records)?;
        job.processed_records = processed;
        Ok(processed)
    }

    async fn increment_failed(&self, id: BatchJobId, by: u32) -> Result<u32, RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or_else(|| not_found(id))?;
        ensure_running(job)?;
        let failed = job.failed_records.saturating_add(by);
        ensure_within_total(job, job.processed_records, failed)?;
        job.failed_records = failed;
        Ok(failed)
    }

    #[instrument(skip(self, error_message), fields(job_id = %id.as_uuid(), status = %status))]
    async fn finish(
        &self,
        id: BatchJobId,
        status: BatchJobStatus,
        error_message: Option<&str>,
    ) -> Result<BatchJob, RepositoryError> {
        if !status.is_terminal() {
            return Err(RepositoryError::ConstraintViolation(format!(
                "{} is not a terminal status",
                status
            )));
        }

        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or_else(|| not_found(id))?;
        ensure_running(job)?;
        job.status = status;
        job.error_message = error_message.map(str::to_string);
        job.completed_at = Some(Utc::now());
        Ok(job.clone())
    }
}
