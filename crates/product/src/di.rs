use crate::{
    abstract_trait::{
        external::DynExternalCatalogClient,
        product::service::{DynProductCommandService, DynProductQueryService, DynProductSyncService},
    },
    repository::ProductRepository,
    service::{command::ProductCommandService, query::ProductQueryService, sync::ProductSyncService},
};
use prometheus_client::registry::Registry;
use shared::utils::Metrics;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub product_sync: DynProductSyncService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("product_sync", &"ProductSyncService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repository: ProductRepository,
    pub catalog_client: DynExternalCatalogClient,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            repository,
            catalog_client,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(registry);

        let product_query: DynProductQueryService = Arc::new(ProductQueryService::new(
            repository.query.clone(),
            metrics.clone(),
        ));

        let product_command: DynProductCommandService = Arc::new(ProductCommandService::new(
            repository.command.clone(),
            metrics.clone(),
        ));

        let product_sync: DynProductSyncService = Arc::new(ProductSyncService::new(
            catalog_client,
            repository.query,
            repository.command,
            metrics,
        ));

        Self {
            product_query,
            product_command,
            product_sync,
        }
    }
}
