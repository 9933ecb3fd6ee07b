pub mod extract;
pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    analyzer::{Analyzer, DistilBertClassifier},
    config::Config,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let model_config = config
        .model
        .clone()
        .with_local_dir_override(std::env::var("MODEL_DIR").ok());

    // The model must be ready before the first request is accepted
    let started = Instant::now();
    let classifier = tokio::task::spawn_blocking(move || DistilBertClassifier::load(&model_config))
        .await
        .map_err(|e| Error::internal(format!("Model loading task failed: {}", e)))??;
    info!(
        "Sentiment model loaded in {:.2?} with labels {:?}",
        started.elapsed(),
        classifier.labels()
    );

    let app_state = AppState {
        analyzer: Arc::new(Analyzer::new(Arc::new(classifier))),
    };
    let app = router(app_state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
