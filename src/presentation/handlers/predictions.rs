use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Prediction, PredictionId, PropertyFeatures, YearProjection};
use crate::presentation::handlers::error::error_response;
use crate::presentation::state::AppState;

/// Wire shape of a stored prediction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub id: String,
    #[serde(flatten)]
    pub features: PropertyFeatures,
    pub address: Option<String>,
    pub predicted_price: f64,
    pub confidence: f64,
    pub investment_score: f64,
    pub appreciation_potential: f64,
    pub risk_score: f64,
    pub price_projections: Vec<YearProjection>,
    pub batch_job_id: Option<String>,
    pub created_at: String,
}

impl From<Prediction> for PredictionResponse {
    fn from(prediction: Prediction) -> Self {
        let result = prediction.result;
        Self {
            id: prediction.id.as_uuid().to_string(),
            features: prediction.features,
            address: prediction.address,
            predicted_price: result.predicted_price,
            confidence: result.confidence,
            investment_score: result.investment_score,
            appreciation_potential: result.appreciation_potential,
            risk_score: result.risk_score,
            price_projections: result.projections,
            batch_job_id: prediction.batch_job_id.map(|id| id.as_uuid().to_string()),
            created_at: prediction.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListPredictionsQuery {
    pub limit: Option<usize>,
}

#[tracing::instrument(skip(state))]
pub async fn list_predictions_handler(
    State(state): State<AppState>,
    Query(query): Query<ListPredictionsQuery>,
) -> Response {
    match state.prediction_service.list(query.limit).await {
        Ok(predictions) => {
            let body: Vec<PredictionResponse> =
                predictions.into_iter().map(PredictionResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list predictions");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to list predictions: {}", e),
            )
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_prediction_handler(
    State(state): State<AppState>,
    Path(prediction_id): Path<String>,
) -> Response {
    let uuid = match Uuid::parse_str(&prediction_id) {
        Ok(u) => u,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid prediction ID: {}", prediction_id),
            );
        }
    };

    match state
        .prediction_service
        .get(PredictionId::from_uuid(uuid))
        .await
    {
        Ok(Some(prediction)) => {
            (StatusCode::OK, Json(PredictionResponse::from(prediction))).into_response()
        }
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("Prediction not found: {}", prediction_id),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch prediction");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch prediction: {}", e),
            )
        }
    }
}
