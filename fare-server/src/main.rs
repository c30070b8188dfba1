use fare_server::config::ServerConfig;
use fare_server::data::DataClient;
use fare_server::engine::FareEngine;
use fare_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Load network data once (fail fast if unavailable)
    let client = DataClient::new(config.data.clone()).expect("Failed to create data client");
    let data = client.load().await.expect("Failed to load network data");

    let engine = FareEngine::new(data.registry, data.fares, &config.engine)
        .expect("Invalid correction factor");
    info!(
        correction_factor = engine.estimator().correction_factor(),
        schema = %engine.schema(),
        "fare engine ready"
    );

    let state = AppState::new(engine, config.time_zone);
    let app = create_router(state, client.directory());

    let addr = config.bind_addr;
    info!("Fare server listening on http://{addr}");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/lines            - Lines and colors");
    info!("  GET  /api/stations?line=   - Stations, optionally by line");
    info!("  GET  /api/stations/:code   - One station");
    info!("  GET  /api/fare?from=&to=   - Price a journey");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
