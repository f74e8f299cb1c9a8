use crate::{
    config::myconfig::{Config, DatabaseBackend},
    di::{DependenciesInject, DependenciesInjectDeps},
    external::HttpCatalogClient,
    repository::ProductRepository,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::{ConnectionManager, ConnectionPool};
use std::{fmt, sync::Arc};
use tracing::info;

#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub app_info: AppInfo,
    pub allowed_origins: Vec<String>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("app_info", &self.app_info)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl AppState {
    pub fn new(deps: DependenciesInjectDeps, app_info: AppInfo, allowed_origins: Vec<String>) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(deps, &mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
            app_info,
            allowed_origins,
        }
    }

    /// Wires the configured store and the HTTP catalog client.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let repository = match &config.database {
            DatabaseBackend::Postgres(url) => {
                let pool = ConnectionManager::new_pool(url, config.db_min_conn, config.db_max_conn)
                    .await
                    .context("Failed to initialize database pool")?;

                if config.run_migrations {
                    run_migrations(&pool)
                        .await
                        .context("Failed to run database migrations")?;
                }

                ProductRepository::postgres(pool)
            }
            DatabaseBackend::Memory => {
                info!("🧪 Using in-memory catalog store");
                ProductRepository::in_memory()
            }
        };

        let catalog_client = Arc::new(
            HttpCatalogClient::new(&config.external).context("Failed to create catalog client")?,
        );

        let deps = DependenciesInjectDeps {
            repository,
            catalog_client,
        };

        let app_info = AppInfo {
            name: config.app_name.clone(),
            version: config.app_version.clone(),
            environment: config.environment.clone(),
        };

        Ok(Self::new(deps, app_info, config.allowed_origins.clone()))
    }
}

pub async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("📜 Applying database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
