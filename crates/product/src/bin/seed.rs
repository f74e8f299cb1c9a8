use anyhow::{Context, Result};
use product::{
    config::myconfig::Config,
    domain::requests::query::ProductQuery,
    state::AppState,
};
use shared::utils::{LogOptions, init_logger};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::init().context("Failed to load configuration")?;

    let _guard = init_logger(
        "product-seed",
        &LogOptions {
            is_dev: config.log.dev_mode,
            enable_file: false,
            json: config.log.json,
            log_dir: None,
        },
    );

    let source = std::env::args().nth(1).unwrap_or_else(|| "dummy".to_string());

    info!("🌱 Seeding catalog from {source}");

    let state = AppState::from_config(&config)
        .await
        .context("Failed to create AppState")?;

    let summary = state
        .di_container
        .product_sync
        .sync(&source)
        .await
        .context("Sync failed")?;

    for item in &summary.errors {
        warn!("⚠️ Skipped {:?}: {}", item.external_id, item.error);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to encode summary")?
    );

    let catalog = state
        .di_container
        .product_query
        .find_all(&ProductQuery::default())
        .await
        .context("Failed to count catalog")?;

    info!("📦 Catalog now holds {} active products", catalog.total);
    Ok(())
}
