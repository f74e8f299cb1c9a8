use crate::domain::response::sync::SyncSummary;
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductSyncService = Arc<dyn ProductSyncServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductSyncServiceTrait {
    /// Pulls one batch from `source` and upserts it by external key.
    ///
    /// Unknown sources fail before any network call. Per-record failures are
    /// reported in the summary rather than aborting the run.
    async fn sync(&self, source: &str) -> Result<SyncSummary, ServiceError>;
}
