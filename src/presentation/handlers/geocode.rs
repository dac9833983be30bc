use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::presentation::handlers::error::error_response;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub address: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn geocode_handler(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Response {
    let address = match query.address.as_deref().map(str::trim) {
        Some(a) if !a.is_empty() => a,
        _ => return error_response(StatusCode::BAD_REQUEST, "Address parameter is required"),
    };

    let result = state.geo_service.geocode(address).await;
    tracing::debug!(success = result.success, lat = result.lat, lon = result.lon, "Geocoded");

    (StatusCode::OK, Json(result)).into_response()
}
