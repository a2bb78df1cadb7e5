pub mod analysis;
pub mod api;
pub mod config;
pub mod explanation;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub use analysis::{classify, Analysis, Highlight, PatternClassifier, Technique};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(std::io::Error),

    #[error("Server error: {0}")]
    Server(#[from] api::ServerError),

    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Initialize logging, load configuration and serve until Ctrl-C.
pub fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let app_config = config::AppConfig::from_env()?;

    // Blocking HTTP clients are built and probed outside the async runtime.
    let explainer = explanation::select_provider(&app_config.explanation);
    explainer.probe();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;

    runtime.block_on(async move {
        let ctx = api::ApiContext::new(explainer).with_max_text_bytes(app_config.max_text_bytes);
        let server = api::start_api_server(ctx, app_config.bind_addr).await?;

        tracing::info!(addr = %server.session.server_addr, "Listening, press Ctrl-C to stop");

        tokio::signal::ctrl_c().await.map_err(StartupError::Signal)?;
        server.stop().await;
        Ok::<(), StartupError>(())
    })
}
