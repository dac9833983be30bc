use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use tokio::sync::mpsc;

use crate::application::ports::{
    BatchJobRepository, RepositoryError, StagingStore, StagingStoreError,
};
use crate::application::services::BatchMessage;
use crate::domain::{BatchJob, BatchJobId, BatchJobStatus, StoragePath};

/// Accepts uploads and hands them to the ingestion worker without waiting on it.
pub struct BatchService {
    jobs: Arc<dyn BatchJobRepository>,
    staging_store: Arc<dyn StagingStore>,
    sender: mpsc::Sender<BatchMessage>,
}

impl BatchService {
    pub fn new(
        jobs: Arc<dyn BatchJobRepository>,
        staging_store: Arc<dyn StagingStore>,
        sender: mpsc::Sender<BatchMessage>,
    ) -> Self {
        Self {
            jobs,
            staging_store,
            sender,
        }
    }

    #[tracing::instrument(skip(self, stream))]
    pub async fn submit(
        &self,
        file_name: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<BatchJob, BatchUploadError> {
        let job = BatchJob::new(file_name.to_string());
        let storage_path = StoragePath::new(&job.id, file_name);

        let bytes = self.staging_store.store(&storage_path, stream).await?;
        tracing::debug!(bytes, path = %storage_path, "Upload staged");

        if let Err(e) = self.jobs.create(&job).await {
            self.discard(&storage_path).await;
            return Err(e.into());
        }

        let msg = BatchMessage {
            job_id: job.id,
            storage_path: storage_path.clone(),
        };

        if let Err(e) = self.sender.try_send(msg) {
            tracing::error!(error = %e, "Failed to enqueue batch job");
            self.discard(&storage_path).await;
            self.jobs
                .finish(
                    job.id,
                    BatchJobStatus::Failed,
                    Some("ingestion queue full or worker unavailable"),
                )
                .await?;
            return Err(BatchUploadError::QueueUnavailable);
        }

        tracing::info!(job_id = %job.id.as_uuid(), "Batch job enqueued");
        Ok(job)
    }

    pub async fn status(&self, id: BatchJobId) -> Result<Option<BatchJob>, RepositoryError> {
        self.jobs.get_by_id(id).await
    }

    pub async fn list(&self) -> Result<Vec<BatchJob>, RepositoryError> {
        self.jobs.list().await
    }

    async fn discard(&self, path: &StoragePath) {
        if let Err(e) = self.staging_store.delete(path).await {
            tracing::warn!(error = %e, path = %path, "Failed to delete staged upload");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchUploadError {
    #[error("staging store: {0}")]
    Staging(#[from] StagingStoreError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("ingestion queue full or worker unavailable")]
    QueueUnavailable,
}
