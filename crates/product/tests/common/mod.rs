#![allow(dead_code)]

use async_trait::async_trait;
use product::{
    abstract_trait::external::ExternalCatalogClientTrait,
    di::DependenciesInjectDeps,
    domain::requests::{product::CreateProductRequest, sync::SyncSource},
    repository::ProductRepository,
    state::{AppInfo, AppState},
};
use serde_json::{Value, json};
use shared::errors::ServiceError;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Serves a canned batch instead of calling the network.
#[derive(Default)]
pub struct StubCatalogClient {
    records: Mutex<Vec<Value>>,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl StubCatalogClient {
    pub fn with_records(records: Vec<Value>) -> Arc<Self> {
        let stub = Self::default();
        *stub.records.lock().unwrap() = records;
        Arc::new(stub)
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        let stub = Self::default();
        *stub.failure.lock().unwrap() = Some(reason.to_string());
        Arc::new(stub)
    }

    pub fn set_records(&self, records: Vec<Value>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExternalCatalogClientTrait for StubCatalogClient {
    async fn fetch_batch(&self, _source: SyncSource) -> Result<Vec<Value>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.failure.lock().unwrap().clone() {
            return Err(ServiceError::ExternalFetch(reason));
        }
        Ok(self.records.lock().unwrap().clone())
    }
}

pub fn test_state(client: Arc<StubCatalogClient>) -> AppState {
    test_state_with_repository(client).0
}

/// Like `test_state`, also handing back the store the services write to.
pub fn test_state_with_repository(client: Arc<StubCatalogClient>) -> (AppState, ProductRepository) {
    let repository = ProductRepository::in_memory();
    let deps = DependenciesInjectDeps {
        repository: repository.clone(),
        catalog_client: client,
    };
    let app_info = AppInfo {
        name: "Product Management API".into(),
        version: "test".into(),
        environment: "test".into(),
    };
    (AppState::new(deps, app_info, vec!["*".into()]), repository)
}

pub fn dummy_record(id: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "description": format!("Description of product {id}"),
        "category": if id % 2 == 0 { "beauty" } else { "groceries" },
        "price": 10.5 + id as f64,
        "discountPercentage": 5.25,
        "rating": 4.1,
        "stock": id * 3,
        "brand": format!("Brand {}", id % 3),
        "thumbnail": format!("https://cdn.example.com/{id}/thumb.png"),
        "images": [format!("https://cdn.example.com/{id}/1.png")]
    })
}

pub fn new_product(title: &str, category: &str, price: &str) -> CreateProductRequest {
    CreateProductRequest {
        title: title.to_string(),
        description: None,
        price: price.parse().unwrap(),
        discount_percentage: None,
        rating: None,
        stock: 1,
        brand: None,
        category: category.to_string(),
        thumbnail: None,
        images: Vec::new(),
        external_id: None,
        external_source: None,
        is_active: None,
    }
}
