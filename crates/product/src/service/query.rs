use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::{
        requests::query::ProductQuery,
        response::{
            pagination::ProductListResponse,
            product::{PriceRangeResponse, ProductResponse},
        },
    },
};
use async_trait::async_trait;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, metrics: Metrics) -> Self {
        Self { query, metrics }
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
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self, query: &ProductQuery) -> Result<ProductListResponse, ServiceError> {
        info!(
            "🔍 Finding products | Page: {}, Size: {}, Sort: {}:{}",
            query.pagination.page,
            query.pagination.size,
            query.sort.field.as_sql(),
            query.sort.order.as_sql()
        );

        let tracing_ctx = self.start_tracing("product_find_all");

        let (products, total) = match self.query.find_all(query).await {
            Ok(res) => {
                self.complete_tracing(&tracing_ctx, Method::Get, Ok("Products retrieved"));
                res
            }
            Err(e) => {
                let msg = format!("Failed to fetch products: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, Err(&msg));
                return Err(ServiceError::Repo(e));
            }
        };

        let items: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        info!("✅ Found {} products (total: {total})", items.len());

        Ok(ProductListResponse::new(items, total, &query.pagination))
    }

    async fn find_by_id(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let tracing_ctx = self.start_tracing("product_find_by_id");

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                self.complete_tracing(&tracing_ctx, Method::Get, Ok("Product found"));
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                self.complete_tracing(&tracing_ctx, Method::Get, Err("Product not found"));
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(e) => {
                let msg = format!("Failed to fetch product {id}: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, Err(&msg));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_categories(&self) -> Result<Vec<String>, ServiceError> {
        let tracing_ctx = self.start_tracing("product_find_categories");

        match self.query.distinct_categories().await {
            Ok(categories) => {
                self.complete_tracing(&tracing_ctx, Method::Get, Ok("Categories retrieved"));
                Ok(categories)
            }
            Err(e) => {
                let msg = format!("Failed to fetch categories: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, Err(&msg));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_brands(&self) -> Result<Vec<String>, ServiceError> {
        let tracing_ctx = self.start_tracing("product_find_brands");

        match self.query.distinct_brands().await {
            Ok(brands) => {
                self.complete_tracing(&tracing_ctx, Method::Get, Ok("Brands retrieved"));
                Ok(brands)
            }
            Err(e) => {
                let msg = format!("Failed to fetch brands: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, Err(&msg));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_price_range(&self) -> Result<PriceRangeResponse, ServiceError> {
        let tracing_ctx = self.start_tracing("product_price_range");

        match self.query.price_range().await {
            Ok((min_price, max_price)) => {
                self.complete_tracing(&tracing_ctx, Method::Get, Ok("Price range computed"));
                Ok(PriceRangeResponse {
                    min_price,
                    max_price,
                })
            }
            Err(e) => {
                let msg = format!("Failed to compute price range: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, Err(&msg));
                Err(ServiceError::Repo(e))
            }
        }
    }
}
