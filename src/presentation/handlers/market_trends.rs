use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::presentation::state::AppState;

pub async fn market_trends_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.market_trends_service.current()))
}
