mod batch_ingestion_worker;
mod batch_service;
mod batch_sheet;
mod geo_service;
mod market_trends;
mod prediction_service;
mod scoring_engine;

pub use batch_ingestion_worker::{
    BatchIngestionWorker, BatchJobError, BatchJobProcessor, BatchMessage, BatchWorkerConfig,
};
pub use batch_service::{BatchService, BatchUploadError};
pub use batch_sheet::{BatchSheet, ColumnLayout, RowParseError, SheetError};
pub use geo_service::{GeoService, MAX_NEARBY_CITIES, NEARBY_RADIUS_MILES};
pub use market_trends::MarketTrendsService;
pub use prediction_service::{PredictionRequest, PredictionService, PredictionServiceError};
pub use scoring_engine::{
    ScoringEngine, appreciation_potential, base_price, investment_score, project_prices,
    risk_score,
};
