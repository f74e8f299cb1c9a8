use crate::domain::requests::sync::SyncSource;
use async_trait::async_trait;
use serde_json::Value;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynExternalCatalogClient = Arc<dyn ExternalCatalogClientTrait + Send + Sync>;

#[async_trait]
pub trait ExternalCatalogClientTrait {
    /// Fetches the complete batch of raw records published by `source`.
    ///
    /// Any transport or decoding failure is reported as
    /// `ServiceError::ExternalFetch`.
    async fn fetch_batch(&self, source: SyncSource) -> Result<Vec<Value>, ServiceError>;
}
