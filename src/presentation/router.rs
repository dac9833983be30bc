use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    batch_list_handler, batch_status_handler, batch_upload_handler, geocode_handler,
    get_prediction_handler, health_handler, list_predictions_handler, market_trends_handler,
    nearby_cities_handler, predict_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    let api = Router::new()
        .route("/predict", post(predict_handler))
        .route("/predictions", get(list_predictions_handler))
        .route("/predictions/{prediction_id}", get(get_prediction_handler))
        .route(
            "/batch-predict",
            post(batch_upload_handler).layer(upload_limit),
        )
        .route("/batch-jobs", get(batch_list_handler))
        .route("/batch-jobs/{job_id}", get(batch_status_handler))
        .route("/geocode", get(geocode_handler))
        .route("/nearby-cities", get(nearby_cities_handler))
        .route("/market-trends", get(market_trends_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
