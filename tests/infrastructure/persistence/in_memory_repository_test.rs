#[path = "../../helpers/mod.rs"]
mod helpers;

use scoutout::application::ports::{BatchJobRepository, PredictionRepository, RepositoryError};
use scoutout::domain::{BatchJob, BatchJobId, BatchJobStatus, Horizon, Prediction};
use scoutout::infrastructure::persistence::{
    InMemoryBatchJobRepository, InMemoryPredictionRepository,
};

use helpers::{sample_features, scoring_engine};

async fn running_job(repo: &InMemoryBatchJobRepository, total: u32) -> BatchJob {
    let job = BatchJob::new("homes.csv".to_string());
    repo.create(&job).await.unwrap();
    repo.set_total_records(job.id, total).await.unwrap();
    job
}

fn prediction(batch_job_id: Option<BatchJobId>) -> Prediction {
    let result = scoring_engine(0.5)
        .score(&sample_features(), Horizon::default())
        .unwrap();
    Prediction::new(sample_features(), None, result, batch_job_id)
}

#[tokio::test]
async fn given_duplicate_job_when_creating_then_constraint_violation() {
    let repo = InMemoryBatchJobRepository::new();
    let job = BatchJob::new("homes.csv".to_string());
    repo.create(&job).await.unwrap();

    let result = repo.create(&job).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
async fn given_increments_when_applied_then_new_values_returned() {
    let repo = InMemoryBatchJobRepository::new();
    let job = running_job(&repo, 10).await;

    assert_eq!(repo.increment_processed(job.id, 4).await.unwrap(), 4);
    assert_eq!(repo.increment_processed(job.id, 3).await.unwrap(), 7);
    assert_eq!(repo.increment_failed(job.id, 2).await.unwrap(), 2);

    let stored = repo.get_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.remaining_records(), 1);
}

#[tokio::test]
async fn given_increment_past_total_when_applied_then_rejected_and_unchanged() {
    let repo = InMemoryBatchJobRepository::new();
    let job = running_job(&repo, 3).await;
    repo.increment_processed(job.id, 2).await.unwrap();

    let result = repo.increment_failed(job.id, 2).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
    let stored = repo.get_by_id(job.id).await.unwrap().unwrap();
    assert_eq!((stored.processed_records, stored.failed_records), (2, 0));
}

#[tokio::test]
async fn given_concurrent_increments_when_applied_then_none_lost() {
    let repo = std::sync::Arc::new(InMemoryBatchJobRepository::new());
    let job_id = running_job(&repo, 100).await.id;

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let repo = std::sync::Arc::clone(&repo);
            tokio::spawn(async move { repo.increment_processed(job_id, 2).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stored = repo.get_by_id(job_id).await.unwrap().unwrap();
    assert_eq!(stored.processed_records, 100);
}

#[tokio::test]
async fn given_finished_job_when_mutating_then_rejected() {
    let repo = InMemoryBatchJobRepository::new();
    let job = running_job(&repo, 5).await;
    repo.finish(job.id, BatchJobStatus::Completed, None)
        .await
        .unwrap();

    assert!(repo.increment_processed(job.id, 1).await.is_err());
    assert!(repo.set_total_records(job.id, 6).await.is_err());
    assert!(
        repo.finish(job.id, BatchJobStatus::Failed, Some("late"))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn given_non_terminal_status_when_finishing_then_rejected() {
    let repo = InMemoryBatchJobRepository::new();
    let job = running_job(&repo, 1).await;

    let result = repo.finish(job.id, BatchJobStatus::Processing, None).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
async fn given_failure_when_finishing_then_message_and_timestamp_recorded() {
    let repo = InMemoryBatchJobRepository::new();
    let job = running_job(&repo, 1).await;

    let finished = repo
        .finish(job.id, BatchJobStatus::Failed, Some("file unreadable"))
        .await
        .unwrap();

    assert_eq!(finished.status, BatchJobStatus::Failed);
    assert_eq!(finished.error_message.as_deref(), Some("file unreadable"));
    assert!(finished.completed_at.is_some());
}

#[tokio::test]
async fn given_unknown_job_when_incrementing_then_not_found() {
    let repo = InMemoryBatchJobRepository::new();

    let result = repo.increment_processed(BatchJobId::new(), 1).await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
async fn given_predictions_when_listing_with_limit_then_newest_first_and_truncated() {
    let repo = InMemoryPredictionRepository::new();
    let mut ids = Vec::new();
    for _ in 0..3 {
        let p = prediction(None);
        ids.push(p.id);
        repo.create(&p).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let listed = repo.list(Some(2)).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, ids[2]);
    assert_eq!(listed[1].id, ids[1]);
}

#[tokio::test]
async fn given_mixed_predictions_when_listing_by_batch_then_only_that_batch() {
    let repo = InMemoryPredictionRepository::new();
    let batch = BatchJobId::new();
    repo.create(&prediction(Some(batch))).await.unwrap();
    repo.create(&prediction(Some(BatchJobId::new()))).await.unwrap();
    repo.create(&prediction(None)).await.unwrap();

    let listed = repo.list_by_batch_job(batch).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].batch_job_id, Some(batch));
}
