use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::application::services::{PredictionRequest, PredictionServiceError};
use crate::domain::PropertyFeatures;
use crate::presentation::handlers::error::{error_response, validation_response};
use crate::presentation::handlers::predictions::PredictionResponse;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(flatten)]
    pub features: PropertyFeatures,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "timelineYears")]
    pub years: Option<u32>,
}

impl From<PredictRequest> for PredictionRequest {
    fn from(body: PredictRequest) -> Self {
        Self {
            features: body.features,
            address: body.address,
            years: body.years,
        }
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected prediction request body");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    match state.prediction_service.predict(body.into()).await {
        Ok(prediction) => {
            (StatusCode::OK, Json(PredictionResponse::from(prediction))).into_response()
        }
        Err(PredictionServiceError::Validation(e)) => {
            tracing::debug!(error = %e, "Prediction input failed validation");
            validation_response(e)
        }
        Err(PredictionServiceError::Repository(e)) => {
            tracing::error!(error = %e, "Failed to store prediction");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to store prediction: {}", e),
            )
        }
    }
}
