use anyhow::{Context, Result};
use product::{config::myconfig::Config, handler::AppRouter, state::AppState};
use shared::utils::{LogOptions, init_logger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::init().context("Failed to load configuration")?;

    let _guard = init_logger(
        "product-service",
        &LogOptions {
            is_dev: config.log.dev_mode,
            enable_file: config.log.enable_file,
            json: config.log.json,
            log_dir: config.log.log_dir.clone(),
        },
    );

    info!(
        "🚀 Starting {} v{} ({})",
        config.app_name, config.app_version, config.environment
    );

    let state = AppState::from_config(&config)
        .await
        .context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");

    AppRouter::serve(config.port, state).await?;

    info!("✅ Product Service shutdown complete.");
    Ok(())
}
