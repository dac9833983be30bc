use std::sync::Arc;

use crate::application::ports::{PredictionRepository, RepositoryError};
use crate::application::services::ScoringEngine;
use crate::domain::{
    FeatureValidationError, Horizon, Prediction, PredictionId, PropertyFeatures,
};

#[derive(Debug, Clone)]
pub struct PredictionRequest {
    pub features: PropertyFeatures,
    pub address: Option<String>,
    pub years: Option<u32>,
}

pub struct PredictionService {
    scoring_engine: Arc<ScoringEngine>,
    repository: Arc<dyn PredictionRepository>,
}

impl PredictionService {
    pub fn new(
        scoring_engine: Arc<ScoringEngine>,
        repository: Arc<dyn PredictionRepository>,
    ) -> Self {
        Self {
            scoring_engine,
            repository,
        }
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn predict(
        &self,
        request: PredictionRequest,
    ) -> Result<Prediction, PredictionServiceError> {
        let horizon = validate(&request)?;

        let result = self.scoring_engine.score(&request.features, horizon)?;
        let address = request
            .address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let prediction = Prediction::new(request.features, address, result, None);
        self.repository.create(&prediction).await?;

        tracing::info!(
            prediction_id = %prediction.id.as_uuid(),
            predicted_price = prediction.result.predicted_price,
            years = horizon.years(),
            "Prediction stored"
        );

        Ok(prediction)
    }

    pub async fn get(&self, id: PredictionId) -> Result<Option<Prediction>, RepositoryError> {
        self.repository.get_by_id(id).await
    }

    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<Prediction>, RepositoryError> {
        self.repository.list(limit).await
    }
}

// Reports feature and horizon problems together.
fn validate(request: &PredictionRequest) -> Result<Horizon, FeatureValidationError> {
    let horizon = Horizon::new(request.years.unwrap_or(Horizon::DEFAULT_YEARS));

    match (request.features.check(), horizon) {
        (Ok(()), Ok(horizon)) => Ok(horizon),
        (Err(e), Ok(_)) | (Ok(()), Err(e)) => Err(e),
        (Err(mut features), Err(horizon)) => {
            features.violations.extend(horizon.violations);
            Err(features)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionServiceError {
    #[error(transparent)]
    Validation(#[from] FeatureValidationError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
