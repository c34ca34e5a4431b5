pub mod api;
pub mod config;
pub mod core_state; // Services + stores shared by every request
pub mod directory; // Static doctor directory, slot availability
pub mod llm; // Gemini, Translate, Speech clients
pub mod models;
pub mod pipeline;
pub mod store; // JSON documents and uploads on disk
pub mod wellness;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("HealthBot starting v{}", config::APP_VERSION);

    // The blocking HTTP clients own a runtime of their own, so they are
    // built before ours and dropped after it.
    let core = Arc::new(core_state::CoreState::from_config(
        config::AppConfig::from_env(),
    )?);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(api::server::serve(core.clone()));
    drop(runtime);
    drop(core);

    result.map_err(Into::into)
}
