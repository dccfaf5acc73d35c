//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        DocumentTextExtractor, MemoryDbAdapter, OpenAiDocumentAdapter, OpenAiLegalAdapter,
        OpenAiSstAdapter,
    },
    config::{Config, ConfigError},
    error::ApiError,
    web::{build_router, rest::ApiDoc, state::AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::Router;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the Message Store ---
    let db_adapter = if config.seed_data {
        MemoryDbAdapter::with_seed_data()
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to seed store: {}", e)))?
    } else {
        warn!("SEED_DATA is off; starting with an empty store.");
        MemoryDbAdapter::new()
    };

    // --- 3. Initialize Service Adapters ---
    let api_key = config
        .openai_api_key
        .as_ref()
        .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;
    let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));

    let sst_adapter = Arc::new(OpenAiSstAdapter::new(
        openai_client.clone(),
        config.sst_model.clone(),
    ));
    let legal_adapter = Arc::new(OpenAiLegalAdapter::new(
        openai_client.clone(),
        config.chat_model.clone(),
    ));
    let document_adapter = Arc::new(OpenAiDocumentAdapter::new(
        openai_client,
        config.analysis_model.clone(),
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        db: Arc::new(db_adapter),
        config: config.clone(),
        sst_adapter,
        legal_adapter,
        document_adapter,
        extractor: Arc::new(DocumentTextExtractor::new()),
    });

    // --- 5. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(build_router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
