use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{PredictionRepository, RepositoryError};
use crate::domain::{BatchJobId, Prediction, PredictionId};

#[derive(Default)]
pub struct InMemoryPredictionRepository {
    predictions: RwLock<HashMap<PredictionId, Prediction>>,
}

impl InMemoryPredictionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sorted(&self, filter: impl Fn(&Prediction) -> bool) -> Vec<Prediction> {
        let mut predictions: Vec<Prediction> = self
            .predictions
            .read()
            .await
            .values()
            .filter(|p| filter(p))
            .cloned()
            .collect();
        predictions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        predictions
    }
}

#[async_trait]
impl PredictionRepository for InMemoryPredictionRepository {
    #[instrument(skip(self, prediction), fields(prediction_id = %prediction.id.as_uuid()))]
    async fn create(&self, prediction: &Prediction) -> Result<(), RepositoryError> {
        let mut predictions = self.predictions.write().await;
        if predictions.contains_key(&prediction.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "prediction {} already exists",
                prediction.id.as_uuid()
            )));
        }
        predictions.insert(prediction.id, prediction.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: PredictionId) -> Result<Option<Prediction>, RepositoryError> {
        Ok(self.predictions.read().await.get(&id).cloned())
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<Prediction>, RepositoryError> {
        let mut predictions = self.sorted(|_| true).await;
        if let Some(limit) = limit {
            predictions.truncate(limit);
        }
        Ok(predictions)
    }

    async fn list_by_batch_job(
        &self,
        batch_job_id: BatchJobId,
    ) -> Result<Vec<Prediction>, RepositoryError> {
        Ok(self
            .sorted(|p| p.batch_job_id == Some(batch_job_id))
            .await)
    }
}
