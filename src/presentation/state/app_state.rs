use std::sync::Arc;

use crate::application::services::{
    BatchService, GeoService, MarketTrendsService, PredictionService,
};

#[derive(Clone)]
pub struct AppState {
    pub prediction_service: Arc<PredictionService>,
    pub batch_service: Arc<BatchService>,
    pub geo_service: Arc<GeoService>,
    pub market_trends_service: Arc<MarketTrendsService>,
    pub max_upload_bytes: usize,
}
