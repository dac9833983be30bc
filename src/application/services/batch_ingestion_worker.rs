use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::time::Instant;
use tracing::Instrument;

use crate::application::ports::{
    BatchJobRepository, PredictionRepository, RepositoryError, StagingStore, StagingStoreError,
};
use crate::application::services::batch_sheet::{BatchSheet, RowParseError, SheetError};
use crate::application::services::ScoringEngine;
use crate::domain::{
    BatchJob, BatchJobId, BatchJobStatus, FeatureValidationError, Horizon, Prediction,
    StoragePath,
};

pub struct BatchMessage {
    pub job_id: BatchJobId,
    pub storage_path: StoragePath,
}

#[derive(Debug, Clone)]
pub struct BatchWorkerConfig {
    pub max_concurrent_jobs: usize,
    pub progress_interval: u32,
    pub projection_horizon: Horizon,
    pub job_timeout: Option<Duration>,
}

impl Default for BatchWorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 4,
            progress_interval: 10,
            projection_horizon: Horizon::default(),
            job_timeout: None,
        }
    }
}

/// Receives queued jobs and runs each one on its own task.
///
/// Jobs run concurrently up to `max_concurrent_jobs`; rows inside a job are
/// always scored one after another.
pub struct BatchIngestionWorker {
    receiver: mpsc::Receiver<BatchMessage>,
    processor: Arc<BatchJobProcessor>,
    limiter: Arc<Semaphore>,
}

impl BatchIngestionWorker {
    pub fn new(
        receiver: mpsc::Receiver<BatchMessage>,
        processor: Arc<BatchJobProcessor>,
        max_concurrent_jobs: usize,
    ) -> Self {
        Self {
            receiver,
            processor,
            limiter: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Batch ingestion worker started");
        while let Some(msg) = self.receiver.recv().await {
            let permit = match Arc::clone(&self.limiter).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let processor = Arc::clone(&self.processor);
            let span = tracing::info_span!(
                "batch_job",
                job_id = %msg.job_id.as_uuid(),
                path = %msg.storage_path,
            );

            tokio::spawn(
                async move {
                    if let Err(e) = processor.process(msg).await {
                        tracing::error!(error = %e, "Failed to record batch job outcome");
                    }
                    drop(permit);
                }
                .instrument(span),
            );
        }
        tracing::info!("Batch ingestion worker stopped: channel closed");
    }
}

/// Runs one batch job from staged file to terminal status.
pub struct BatchJobProcessor {
    scoring_engine: Arc<ScoringEngine>,
    jobs: Arc<dyn BatchJobRepository>,
    predictions: Arc<dyn PredictionRepository>,
    staging_store: Arc<dyn StagingStore>,
    progress_interval: u32,
    projection_horizon: Horizon,
    job_timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    limit: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RowTally {
    processed: u32,
    failed: u32,
}

impl RowTally {
    fn pending(&self) -> u32 {
        self.processed + self.failed
    }
}

impl BatchJobProcessor {
    pub fn new(
        scoring_engine: Arc<ScoringEngine>,
        jobs: Arc<dyn BatchJobRepository>,
        predictions: Arc<dyn PredictionRepository>,
        staging_store: Arc<dyn StagingStore>,
        config: &BatchWorkerConfig,
    ) -> Self {
        Self {
            scoring_engine,
            jobs,
            predictions,
            staging_store,
            progress_interval: config.progress_interval.max(1),
            projection_horizon: config.projection_horizon,
            job_timeout: config.job_timeout,
        }
    }

    /// Scores every row, releases the staged file and records the terminal status.
    ///
    /// The returned error only covers failing to write that final status.
    pub async fn process(&self, msg: BatchMessage) -> Result<BatchJob, RepositoryError> {
        let job_id = msg.job_id;

        let deadline = self.job_timeout.map(|limit| Deadline {
            at: Instant::now() + limit,
            limit,
        });
        let outcome = self.score_file(&msg, deadline).await;

        if let Err(e) = self.staging_store.delete(&msg.storage_path).await {
            tracing::warn!(error = %e, path = %msg.storage_path, "Failed to delete staged upload");
        }

        match outcome {
            Ok(()) => {
                let job = self
                    .jobs
                    .finish(job_id, BatchJobStatus::Completed, None)
                    .await?;
                tracing::info!(
                    total = job.total_records,
                    processed = job.processed_records,
                    failed = job.failed_records,
                    "Batch job completed"
                );
                Ok(job)
            }
            Err(e) => {
                tracing::error!(error = %e, "Batch job failed");
                self.jobs
                    .finish(job_id, BatchJobStatus::Failed, Some(&e.to_string()))
                    .await
            }
        }
    }

    /// Rows already scored are always flushed, including when the deadline cuts the file short.
    async fn score_file(
        &self,
        msg: &BatchMessage,
        deadline: Option<Deadline>,
    ) -> Result<(), BatchJobError> {
        let job_id = msg.job_id;

        let data = within(deadline, self.staging_store.fetch(&msg.storage_path))
            .await?
            .map_err(BatchJobError::Staging)?;
        let text = std::str::from_utf8(&data)
            .map_err(|e| BatchJobError::InvalidEncoding(e.to_string()))?;

        let sheet = BatchSheet::parse(text)?;
        let total = u32::try_from(sheet.rows.len()).map_err(|_| BatchJobError::TooManyRows)?;

        self.jobs.set_total_records(job_id, total).await?;
        tracing::debug!(
            total,
            header_matched = sheet.layout.matched_by_header(),
            "Batch file parsed"
        );

        let mut pending = RowTally::default();
        for (index, record) in sheet.rows.iter().enumerate() {
            let row = index + 1;
            let scored = match expired(deadline) {
                Some(e) => Err(e),
                None => within(deadline, self.score_row(job_id, &sheet, record)).await,
            };
            let scored = match scored {
                Ok(scored) => scored,
                Err(e) => {
                    tracing::warn!(row, "Batch job deadline reached");
                    self.flush_progress(job_id, &mut pending).await?;
                    return Err(e);
                }
            };

            match scored {
                Ok(()) => pending.processed += 1,
                Err(e) => {
                    tracing::warn!(row, error = %e, "Skipping batch row");
                    pending.failed += 1;
                }
            }

            if pending.pending() >= self.progress_interval {
                self.flush_progress(job_id, &mut pending).await?;
            }
        }
        self.flush_progress(job_id, &mut pending).await?;

        Ok(())
    }

    async fn score_row(
        &self,
        job_id: BatchJobId,
        sheet: &BatchSheet,
        record: &csv::StringRecord,
    ) -> Result<(), RowError> {
        let features = sheet.layout.parse_row(record)?;
        let result = self
            .scoring_engine
            .score(&features, self.projection_horizon)?;

        let prediction = Prediction::new(features, None, result, Some(job_id));
        self.predictions.create(&prediction).await?;
        Ok(())
    }

    async fn flush_progress(
        &self,
        job_id: BatchJobId,
        pending: &mut RowTally,
    ) -> Result<(), BatchJobError> {
        if pending.processed > 0 {
            let processed = self
                .jobs
                .increment_processed(job_id, pending.processed)
                .await?;
            tracing::debug!(processed, "Batch progress");
        }
        if pending.failed > 0 {
            self.jobs.increment_failed(job_id, pending.failed).await?;
        }
        *pending = RowTally::default();
        Ok(())
    }
}

fn expired(deadline: Option<Deadline>) -> Option<BatchJobError> {
    deadline
        .filter(|d| Instant::now() >= d.at)
        .map(|d| BatchJobError::TimedOut(d.limit))
}

/// A step cut off by the deadline is dropped before it completes.
async fn within<F: Future>(
    deadline: Option<Deadline>,
    step: F,
) -> Result<F::Output, BatchJobError> {
    match deadline {
        Some(d) => tokio::time::timeout_at(d.at, step)
            .await
            .map_err(|_| BatchJobError::TimedOut(d.limit)),
        None => Ok(step.await),
    }
}

#[derive(Debug, thiserror::Error)]
enum RowError {
    #[error("parse: {0}")]
    Parse(#[from] RowParseError),
    #[error("validation: {0}")]
    Validation(#[from] FeatureValidationError),
    #[error("persist: {0}")]
    Persist(#[from] RepositoryError),
}

#[derive(Debug, thiserror::Error)]
pub enum BatchJobError {
    #[error("staging store: {0}")]
    Staging(StagingStoreError),
    #[error("file is not valid UTF-8 text: {0}")]
    InvalidEncoding(String),
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error("file has too many rows")]
    TooManyRows,
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}
