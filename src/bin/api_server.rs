// src/bin/api_server.rs

use review_service::infra::{config::Config, logging};
use review_service::transport;
use review_service::PgReviewStore;
use std::net::SocketAddr;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env()?;

    // --- Store Initialization ---
    tracing::info!(database = %config.database.redacted(), "connecting to PostgreSQL");
    let options = config.database.connect_options()?;
    let store = PgReviewStore::connect(options, config.max_connections)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "store initialization failed");
            e
        })?;
    tracing::info!("connected; reviews table ready");

    let app_state = transport::http::AppState::new(Arc::new(store.clone()));

    // --- API Server Initialization ---
    let app = transport::http::create_router(app_state).merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
    );
    let app = transport::http::with_http_layers(app);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("database pool closed; shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    tracing::info!("shutdown signal received");
}
