use crate::{
    abstract_trait::product::{
        repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
};
use async_trait::async_trait;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, metrics: Metrics) -> Self {
        Self { command, metrics }
    }

    fn start_tracing(&self, operation: &'static str) -> TracingContext {
        info!("Starting operation: {operation}");
        TracingContext::start(operation)
    }

    fn complete_tracing(&self, ctx: &TracingContext, method: Method, result: Result<&str, &str>) {
        let elapsed = ctx.elapsed_secs();
        let status = match result {
            Ok(message) => {
                info!("✅ {} completed in {elapsed:.4}s: {message}", ctx.operation);
                StatusUtils::Success
            }
            Err(message) => {
                error!("❌ {} failed in {elapsed:.4}s: {message}", ctx.operation);
                StatusUtils::Error
            }
        };
        self.metrics.record(ctx.operation, method, status, elapsed);
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🏗️ Creating product: {}", req.title);

        let tracing_ctx = self.start_tracing("product_create");

        match self.command.create_product(req).await {
            Ok(product) => {
                self.complete_tracing(&tracing_ctx, Method::Post, Ok("Product created"));
                Ok(ProductResponse::from(product))
            }
            Err(e) => {
                let msg = format!("Failed to create product '{}': {e:?}", req.title);
                self.complete_tracing(&tracing_ctx, Method::Post, Err(&msg));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🔄 Updating product ID: {id}");

        let tracing_ctx = self.start_tracing("product_update");

        match self.command.update_product(id, req).await {
            Ok(Some(product)) => {
                self.complete_tracing(&tracing_ctx, Method::Put, Ok("Product updated"));
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                self.complete_tracing(&tracing_ctx, Method::Put, Err("Product not found"));
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                let msg = format!("Failed to update product {id}: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Put, Err(&msg));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        info!("🧨 Deleting product ID: {id}");

        let tracing_ctx = self.start_tracing("product_delete");

        match self.command.delete_product(id).await {
            Ok(true) => {
                self.complete_tracing(&tracing_ctx, Method::Delete, Ok("Product deleted"));
                Ok(())
            }
            Ok(false) => {
                self.complete_tracing(&tracing_ctx, Method::Delete, Err("Product not found"));
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                let msg = format!("Failed to delete product {id}: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Delete, Err(&msg));
                Err(ServiceError::Repo(e))
            }
        }
    }
}
