use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, NearbyCity};
use crate::presentation::handlers::error::error_response;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NearbyCitiesQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize)]
pub struct TargetLocation {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyCitiesResponse {
    pub target_location: TargetLocation,
    pub nearby_cities: Vec<NearbyCity>,
}

#[tracing::instrument(skip(state))]
pub async fn nearby_cities_handler(
    State(state): State<AppState>,
    Query(query): Query<NearbyCitiesQuery>,
) -> Response {
    let target = match (parse_coordinate(&query.lat), parse_coordinate(&query.lon)) {
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Valid latitude and longitude are required",
            );
        }
    };

    if !target.is_valid() {
        return error_response(StatusCode::BAD_REQUEST, "Coordinates out of range");
    }

    let nearby_cities = state.geo_service.nearby_cities(target);
    tracing::debug!(count = nearby_cities.len(), "Nearby cities resolved");

    let response = NearbyCitiesResponse {
        target_location: TargetLocation {
            lat: target.lat,
            lon: target.lon,
            address: query.address.filter(|a| !a.trim().is_empty()),
        },
        nearby_cities,
    };

    (StatusCode::OK, Json(response)).into_response()
}

fn parse_coordinate(raw: &Option<String>) -> Option<f64> {
    raw.as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
