//! Main Entrypoint for the Board Tutor API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the curriculum registry.
//! 3. Initializing the completion client and the tutor pipeline.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tutor_api::{
    config::{Config, Provider},
    router::create_router,
    state::AppState,
};
use tutor_core::{
    CompletionClient, CurriculumRegistry, TutorPipeline,
    completion::{GeminiClient, OpenAICompatibleClient},
};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

/// Loads the curriculum override file if one is configured, else the built-in data.
fn load_registry(config: &Config) -> anyhow::Result<CurriculumRegistry> {
    match &config.curriculum_path {
        Some(path) => {
            info!(path = %path.display(), "Loading curriculum from file.");
            CurriculumRegistry::from_json_file(path)
                .with_context(|| format!("Failed to load curriculum from {}", path.display()))
        }
        None => Ok(CurriculumRegistry::builtin()),
    }
}

fn build_client(config: &Config) -> anyhow::Result<Arc<dyn CompletionClient>> {
    match &config.provider {
        Provider::Gemini => {
            info!("Using Gemini provider.");
            let api_key = config
                .gemini_api_key
                .clone()
                .context("GEMINI_API_KEY must be set for 'gemini' provider")?;
            let client = GeminiClient::new(
                api_key,
                config.chat_model.clone(),
                config.upstream_timeout,
            )
            .context("Failed to build Gemini HTTP client")?;
            Ok(Arc::new(client))
        }
        Provider::OpenAI => {
            info!("Using OpenAI-compatible provider.");
            let api_key = config
                .openai_api_key
                .as_ref()
                .context("OPENAI_API_KEY must be set for 'openai' provider")?;
            let openai_config = OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base(&config.openai_api_base);
            Ok(Arc::new(OpenAICompatibleClient::new(
                openai_config,
                config.chat_model.clone(),
                config.upstream_timeout,
            )))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load Curriculum ---
    let registry = Arc::new(load_registry(&config)?);
    info!(
        board = %config.board,
        subjects = registry.subjects(config.board).len(),
        "Curriculum registry ready."
    );

    // --- 4. Initialize Pipeline ---
    let client = build_client(&config)?;
    let pipeline =
        TutorPipeline::with_policy(config.board, config.validation_policy, registry, client);
    let app_state = Arc::new(AppState::new(pipeline));

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        provider = ?config.provider,
        model = %config.chat_model,
        board = %config.board,
        policy = config.validation_policy.name(),
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
