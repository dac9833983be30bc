use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{BatchJobId, PropertyFeatures};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PredictionId(Uuid);

impl PredictionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PredictionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Growth inputs behind a single projected year, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFactors {
    pub base_rate: f64,
    pub cycle_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    pub year: i32,
    pub projected_price: f64,
    pub confidence_level: f64,
    pub market_factors: MarketFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub predicted_price: f64,
    pub confidence: f64,
    pub investment_score: f64,
    pub appreciation_potential: f64,
    pub risk_score: f64,
    pub projections: Vec<YearProjection>,
}

/// A scored valuation as it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub id: PredictionId,
    pub features: PropertyFeatures,
    pub address: Option<String>,
    pub result: PredictionResult,
    pub batch_job_id: Option<BatchJobId>,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(
        features: PropertyFeatures,
        address: Option<String>,
        result: PredictionResult,
        batch_job_id: Option<BatchJobId>,
    ) -> Self {
        Self {
            id: PredictionId::new(),
            features,
            address,
            result,
            batch_job_id,
            created_at: Utc::now(),
        }
    }
}
