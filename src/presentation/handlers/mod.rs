mod batch;
mod error;
mod geocode;
mod health;
mod market_trends;
mod nearby_cities;
mod predict;
mod predictions;

pub use batch::{
    BatchJobResponse, BatchUploadResponse, batch_list_handler, batch_status_handler,
    batch_upload_handler,
};
pub use error::{ErrorResponse, ValidationErrorResponse};
pub use geocode::geocode_handler;
pub use health::health_handler;
pub use market_trends::market_trends_handler;
pub use nearby_cities::nearby_cities_handler;
pub use predict::{PredictRequest, predict_handler};
pub use predictions::{PredictionResponse, get_prediction_handler, list_predictions_handler};
