use crate::{domain::requests::query::ProductQuery, model::product::Product as ProductModel};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(
        &self,
        query: &ProductQuery,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_external_key(
        &self,
        external_id: i64,
        source: &str,
    ) -> Result<Option<ProductModel>, RepositoryError>;
    async fn distinct_categories(&self) -> Result<Vec<String>, RepositoryError>;
    async fn distinct_brands(&self) -> Result<Vec<String>, RepositoryError>;
    async fn price_range(&self) -> Result<(Decimal, Decimal), RepositoryError>;
}
