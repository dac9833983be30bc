use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use scoutout::application::ports::{
    BatchJobRepository, Geocoder, PredictionRepository, RandomSource, StagingStore,
};
use scoutout::application::services::{
    BatchIngestionWorker, BatchJobProcessor, BatchService, GeoService, MarketTrendsService,
    PredictionService, ScoringEngine,
};
use scoutout::infrastructure::geocoding::{
    NominatimGeocoder, OfflineGeocoder, load_cities_from_path, load_embedded_cities,
};
use scoutout::infrastructure::observability::init_tracing;
use scoutout::infrastructure::persistence::{
    InMemoryBatchJobRepository, InMemoryPredictionRepository,
};
use scoutout::infrastructure::random::{SeededRandom, ThreadRandom};
use scoutout::infrastructure::storage::LocalStagingStore;
use scoutout::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&settings.tracing_config(environment));
    tracing::info!(environment = %environment, "Application starting");

    let random: Arc<dyn RandomSource> = match settings.scoring.random_seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded random source");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom),
    };

    let geocoder: Arc<dyn Geocoder> = if settings.geocoding.enabled {
        Arc::new(
            NominatimGeocoder::new(
                settings.geocoding.base_url.clone(),
                &settings.geocoding.user_agent,
                settings.geocoding.timeout(),
            )
            .context("Failed to build geocoding client")?,
        )
    } else {
        tracing::info!("Geocoding provider disabled, fallback table only");
        Arc::new(OfflineGeocoder)
    };

    let cities = match settings.cities.dataset_path() {
        Some(path) => load_cities_from_path(&path)
            .with_context(|| format!("Failed to load city dataset from {}", path.display()))?,
        None => load_embedded_cities().context("Failed to load embedded city dataset")?,
    };
    tracing::info!(cities = cities.len(), "City dataset loaded");

    let staging_store: Arc<dyn StagingStore> = Arc::new(
        LocalStagingStore::new(PathBuf::from(&settings.storage.local_path))
            .context("Failed to initialise staging store")?,
    );
    let jobs: Arc<dyn BatchJobRepository> = Arc::new(InMemoryBatchJobRepository::new());
    let predictions: Arc<dyn PredictionRepository> = Arc::new(InMemoryPredictionRepository::new());

    let scoring_engine = Arc::new(ScoringEngine::new(Arc::clone(&random)));
    let worker_config = settings
        .batch
        .worker_config()
        .context("Invalid batch settings")?;

    let (batch_tx, batch_rx) = mpsc::channel(settings.batch.queue_capacity.max(1));

    let processor = Arc::new(BatchJobProcessor::new(
        Arc::clone(&scoring_engine),
        Arc::clone(&jobs),
        Arc::clone(&predictions),
        Arc::clone(&staging_store),
        &worker_config,
    ));
    let worker = BatchIngestionWorker::new(batch_rx, processor, worker_config.max_concurrent_jobs);
    tokio::spawn(worker.run());

    let state = AppState {
        prediction_service: Arc::new(PredictionService::new(
            Arc::clone(&scoring_engine),
            Arc::clone(&predictions),
        )),
        batch_service: Arc::new(BatchService::new(
            Arc::clone(&jobs),
            Arc::clone(&staging_store),
            batch_tx,
        )),
        geo_service: Arc::new(GeoService::new(geocoder, cities)),
        market_trends_service: Arc::new(MarketTrendsService::new(random)),
        max_upload_bytes: settings.upload.max_upload_bytes(),
    };

    let router = create_router(state);

    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
