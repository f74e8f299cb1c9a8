mod mapper;

pub use self::mapper::map_record;

use crate::{
    abstract_trait::{
        external::DynExternalCatalogClient,
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::ProductSyncServiceTrait,
        },
    },
    domain::{
        requests::sync::SyncSource,
        response::sync::{SyncItemError, SyncSummary},
    },
};
use async_trait::async_trait;
use serde_json::Value;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tracing::{error, info, warn};

enum SyncOutcome {
    Created,
    Updated,
    Failed(SyncItemError),
}

#[derive(Default)]
struct SyncTally {
    created: usize,
    updated: usize,
    errors: Vec<SyncItemError>,
}

impl SyncTally {
    fn absorb(mut self, outcome: SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Created => self.created += 1,
            SyncOutcome::Updated => self.updated += 1,
            SyncOutcome::Failed(err) => self.errors.push(err),
        }
        self
    }
}

#[derive(Clone)]
pub struct ProductSyncService {
    pub client: DynExternalCatalogClient,
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductSyncService {
    pub fn new(
        client: DynExternalCatalogClient,
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        metrics: Metrics,
    ) -> Self {
        Self {
            client,
            query,
            command,
            metrics,
        }
    }

    async fn sync_record(&self, source: SyncSource, record: &Value) -> SyncOutcome {
        let record_id = mapper::external_id(record);

        let failed = |error: String| {
            warn!("⚠️ Failed to sync {source} product {record_id:?}: {error}");
            SyncOutcome::Failed(SyncItemError {
                external_id: record_id,
                error,
            })
        };

        let req = match map_record(source, record) {
            Ok(req) => req,
            Err(reason) => return failed(reason),
        };
        let Some(external_id) = req.external_id else {
            return failed("Missing external id".to_string());
        };

        match self
            .query
            .find_by_external_key(external_id, source.as_str())
            .await
        {
            Ok(Some(existing)) => match self.command.replace_synced(existing.id, &req).await {
                Ok(Some(_)) => SyncOutcome::Updated,
                Ok(None) => failed(format!("Product {} vanished during sync", existing.id)),
                Err(e) => failed(e.to_string()),
            },
            Ok(None) => match self.command.create_product(&req).await {
                Ok(_) => SyncOutcome::Created,
                Err(e) => failed(e.to_string()),
            },
            Err(e) => failed(e.to_string()),
        }
    }
}

#[async_trait]
impl ProductSyncServiceTrait for ProductSyncService {
    async fn sync(&self, source: &str) -> Result<SyncSummary, ServiceError> {
        let source: SyncSource = source.parse().map_err(ServiceError::UnsupportedSource)?;

        info!("🔁 Syncing products from {source}");

        let tracing_ctx = TracingContext::start("product_sync");

        let records = match self.client.fetch_batch(source).await {
            Ok(records) => records,
            Err(e) => {
                let elapsed = tracing_ctx.elapsed_secs();
                error!("❌ Sync from {source} aborted after {elapsed:.4}s: {e}");
                self.metrics
                    .record(tracing_ctx.operation, Method::Post, StatusUtils::Error, elapsed);
                return Err(e);
            }
        };

        let mut outcomes = Vec::with_capacity(records.len());
        for record in &records {
            outcomes.push(self.sync_record(source, record).await);
        }

        let tally = outcomes
            .into_iter()
            .fold(SyncTally::default(), SyncTally::absorb);

        let elapsed = tracing_ctx.elapsed_secs();
        self.metrics
            .record(tracing_ctx.operation, Method::Post, StatusUtils::Success, elapsed);
        self.metrics.record_sync(
            source.as_str(),
            tally.created as u64,
            tally.updated as u64,
            tally.errors.len() as u64,
        );

        info!(
            "✅ Sync from {source} finished in {elapsed:.4}s | fetched: {}, created: {}, updated: {}, failed: {}",
            records.len(),
            tally.created,
            tally.updated,
            tally.errors.len()
        );

        Ok(SyncSummary {
            source: source.as_str().to_string(),
            total_fetched: records.len(),
            created_count: tally.created,
            updated_count: tally.updated,
            errors: tally.errors,
        })
    }
}
