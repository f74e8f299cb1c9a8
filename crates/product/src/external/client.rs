use crate::{
    abstract_trait::external::ExternalCatalogClientTrait, config::myconfig::ExternalApiConfig,
    domain::requests::sync::SyncSource,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::errors::ServiceError;
use std::time::Duration;
use tracing::{info, warn};

const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Reads product batches from the public DummyJSON and FakeStore APIs.
#[derive(Clone)]
pub struct HttpCatalogClient {
    http: Client,
    dummy_api_url: String,
    fakestore_api_url: String,
    retry_attempts: u32,
}

enum Attempt {
    Retry(String),
    Fail(String),
}

impl HttpCatalogClient {
    pub fn new(config: &ExternalApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("product-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            dummy_api_url: config.dummy_api_url.clone(),
            fakestore_api_url: config.fakestore_api_url.clone(),
            retry_attempts: config.retry_attempts.max(1),
        })
    }

    fn url_for(&self, source: SyncSource) -> &str {
        match source {
            SyncSource::Dummy => &self.dummy_api_url,
            SyncSource::FakeStore => &self.fakestore_api_url,
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<Value, Attempt> {
        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                Attempt::Retry(e.to_string())
            } else {
                Attempt::Fail(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(Attempt::Retry(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(Attempt::Fail(format!("HTTP {status}")));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                Attempt::Retry(e.to_string())
            } else {
                Attempt::Fail(format!("Undecodable response body: {e}"))
            }
        })
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, ServiceError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(Attempt::Retry(reason)) if attempt < self.retry_attempts => {
                    warn!(
                        "⚠️ Fetch {url} failed (attempt {attempt}/{}): {reason}, retrying",
                        self.retry_attempts
                    );
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(Attempt::Retry(reason)) | Err(Attempt::Fail(reason)) => {
                    return Err(ServiceError::ExternalFetch(format!("{url}: {reason}")));
                }
            }
        }
    }
}

/// Pulls the record array out of a source payload.
pub fn extract_records(source: SyncSource, body: Value) -> Result<Vec<Value>, ServiceError> {
    let records = match (source, body) {
        (SyncSource::Dummy, Value::Object(mut map)) => map.remove("products"),
        (SyncSource::FakeStore, array @ Value::Array(_)) => Some(array),
        _ => None,
    };

    match records {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(ServiceError::ExternalFetch(format!(
            "Unexpected payload shape from {source}"
        ))),
    }
}

#[async_trait]
impl ExternalCatalogClientTrait for HttpCatalogClient {
    async fn fetch_batch(&self, source: SyncSource) -> Result<Vec<Value>, ServiceError> {
        let url = self.url_for(source);
        info!("🌐 Fetching {source} catalog from {url}");

        let body = self.fetch_json(url).await?;
        let records = extract_records(source, body)?;

        info!("📦 Received {} records from {source}", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dummy_payload_is_unwrapped() {
        let body = json!({ "products": [{ "id": 1 }, { "id": 2 }], "total": 2 });
        let records = extract_records(SyncSource::Dummy, body).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn fakestore_payload_is_a_bare_array() {
        let body = json!([{ "id": 1 }]);
        assert_eq!(extract_records(SyncSource::FakeStore, body).unwrap().len(), 1);
    }

    #[test]
    fn wrong_shape_is_a_fetch_error() {
        let err = extract_records(SyncSource::Dummy, json!([])).unwrap_err();
        assert!(matches!(err, ServiceError::ExternalFetch(_)));

        let err = extract_records(SyncSource::FakeStore, json!({ "products": [] })).unwrap_err();
        assert!(matches!(err, ServiceError::ExternalFetch(_)));
    }

    #[tokio::test]
    async fn unreachable_host_surfaces_as_fetch_error() {
        let client = HttpCatalogClient::new(&ExternalApiConfig {
            dummy_api_url: "http://127.0.0.1:9/products".into(),
            fakestore_api_url: "http://127.0.0.1:9/products".into(),
            timeout: Duration::from_secs(2),
            retry_attempts: 1,
        })
        .unwrap();

        let err = client.fetch_batch(SyncSource::Dummy).await.unwrap_err();
        assert!(matches!(err, ServiceError::ExternalFetch(_)));
    }
}
