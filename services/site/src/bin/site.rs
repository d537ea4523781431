//! services/site/src/bin/site.rs

use najm_site_lib::{
    adapters::{GeminiAdviceAdapter, JsonFileStore, RootClassDisplay},
    config::{Config, StorageLocation},
    error::ApiError,
    web::{rest::ApiDoc, router, AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method};
use axum::Router;
use najm_core::{KeyValueStore, MemoryStore, SiteCoordinator};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open Storage ---
    let storage: Arc<dyn KeyValueStore> = match &config.storage {
        StorageLocation::File(path) => {
            info!("Using storage file {}", path.display());
            Arc::new(JsonFileStore::open(path))
        }
        StorageLocation::Memory => {
            info!("Using in-memory storage; nothing will survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    // --- 3. Initialize Service Adapters ---
    let openai_config = OpenAIConfig::new()
        .with_api_base(config.advice_api_base.clone())
        .with_api_key(
            config
                .gemini_api_key
                .as_ref()
                .ok_or_else(|| ApiError::Internal("GEMINI_API_KEY is required".to_string()))?,
        );
    let advice_client = Client::with_config(openai_config);
    let advice_adapter = Arc::new(GeminiAdviceAdapter::new(
        advice_client,
        config.advice_model.clone(),
    ));
    let display = Arc::new(RootClassDisplay::new(config.preferred_scheme));

    // --- 4. Boot the Page Session ---
    let site = SiteCoordinator::new(
        storage,
        display.clone(),
        advice_adapter,
        config.advice_timeout,
    );
    let context = site.boot()?;
    info!(
        "Session ready: language={}, theme={}, visitor={}",
        context.language,
        context.theme,
        context.identity.as_ref().map_or("<none>", |identity| identity.name.as_str())
    );

    let app_state = Arc::new(AppState {
        site: Arc::new(site),
        display,
    });

    // --- 5. Create the Web Router ---
    let allowed_origin = config.allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid ALLOWED_ORIGIN '{}': {}",
            config.allowed_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
