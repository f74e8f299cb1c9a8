use crate::domain::{
    requests::query::ProductQuery,
    response::{
        pagination::ProductListResponse,
        product::{PriceRangeResponse, ProductResponse},
    },
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(&self, query: &ProductQuery) -> Result<ProductListResponse, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ProductResponse, ServiceError>;
    async fn find_categories(&self) -> Result<Vec<String>, ServiceError>;
    async fn find_brands(&self) -> Result<Vec<String>, ServiceError>;
    async fn find_price_range(&self) -> Result<PriceRangeResponse, ServiceError>;
}
