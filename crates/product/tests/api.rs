mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use common::{StubCatalogClient, dummy_record, test_state};
use http_body_util::BodyExt;
use product::handler::AppRouter;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app(client: Arc<StubCatalogClient>) -> Router {
    AppRouter::build(test_state(client))
}

fn empty_app() -> Router {
    app(StubCatalogClient::with_records(Vec::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

fn sample_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A sample",
        "price": 19.99,
        "discount_percentage": 10,
        "rating": 4.5,
        "stock": 3,
        "brand": "Acme",
        "category": "tools",
        "thumbnail": "https://cdn.example.com/t.png",
        "images": ["https://cdn.example.com/1.png"]
    })
}

#[tokio::test]
async fn create_then_fetch_product() {
    let app = empty_app();

    let (status, created) = send(&app, Method::POST, "/api/v1/products", Some(sample_body("Hammer"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Hammer");
    assert_eq!(created["is_active"], true);
    assert_eq!(created["discounted_price"].as_f64(), Some(17.99));

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["images"], json!(["https://cdn.example.com/1.png"]));
}

#[tokio::test]
async fn invalid_image_url_is_rejected() {
    let app = empty_app();
    let mut body = sample_body("Saw");
    body["images"] = json!(["ftp://bad"]);

    let (status, error) = send(&app, Method::POST, "/api/v1/products", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["status"], "error");
    assert!(
        error["details"]
            .as_array()
            .unwrap()
            .iter()
            .any(|d| d.as_str().unwrap().starts_with("images"))
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = empty_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let app = empty_app();

    let (status, error) = send(&app, Method::GET, "/api/v1/products/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "Product not found");

    let (status, _) = send(&app, Method::PUT, "/api/v1/products/42", Some(json!({"stock": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = empty_app();
    let (_, created) = send(&app, Method::POST, "/api/v1/products", Some(sample_body("Drill"))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/products/{id}"),
        Some(json!({"price": 25, "brand": null})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"].as_f64(), Some(25.0));
    assert_eq!(updated["brand"], "Acme");
    assert_eq!(updated["title"], "Drill");
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let app = empty_app();
    let (_, created) = send(&app, Method::POST, "/api/v1/products", Some(sample_body("Level"))).await;
    let uri = format!("/api/v1/products/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inverted_price_range_is_rejected() {
    let app = empty_app();

    let (status, error) = send(&app, Method::GET, "/api/v1/products?min_price=10&max_price=5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        error["details"]
            .as_array()
            .unwrap()
            .iter()
            .any(|d| d.as_str().unwrap().starts_with("max_price"))
    );
}

#[tokio::test]
async fn oversized_page_is_clamped() {
    let app = empty_app();

    let (status, page) = send(&app, Method::GET, "/api/v1/products?size=150&page=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["size"], 100);
    assert_eq!(page["page"], 1);
    assert_eq!(page["total"], 0);
    assert_eq!(page["pages"], 0);
    assert_eq!(page["has_next"], false);
    assert_eq!(page["has_prev"], false);
}

#[tokio::test]
async fn placeholder_params_are_ignored() {
    let app = empty_app();
    send(&app, Method::POST, "/api/v1/products", Some(sample_body("Wrench"))).await;

    let (status, page) = send(
        &app,
        Method::GET,
        "/api/v1/products?category=null&brand=undefined&min_price=&search=%20",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn responses_carry_process_time() {
    let app = empty_app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let header = response.headers().get("x-process-time").unwrap();
    assert!(header.to_str().unwrap().parse::<f64>().unwrap() >= 0.0);
}

#[tokio::test]
async fn health_reports_app_info() {
    let app = empty_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "test");
}

#[tokio::test]
async fn sync_endpoint_reports_summary() {
    let app = app(StubCatalogClient::with_records(vec![
        dummy_record(1),
        dummy_record(2),
        json!({"title": "no id"}),
    ]));

    let (status, summary) = send(&app, Method::POST, "/api/v1/products/sync/dummy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["source"], "dummy");
    assert_eq!(summary["total_fetched"], 3);
    assert_eq!(summary["created_count"], 2);
    assert_eq!(summary["updated_count"], 0);
    assert_eq!(summary["errors"].as_array().unwrap().len(), 1);

    let (_, categories) = send(&app, Method::GET, "/api/v1/products/categories/list", None).await;
    assert_eq!(categories, json!(["beauty", "groceries"]));

    let (_, range) = send(&app, Method::GET, "/api/v1/products/price-range", None).await;
    assert_eq!(range["min_price"].as_f64(), Some(11.5));
    assert_eq!(range["max_price"].as_f64(), Some(12.5));
}

#[tokio::test]
async fn sync_errors_map_to_statuses() {
    let stub = StubCatalogClient::failing("connection refused");
    let app = app(stub.clone());

    let (status, error) = send(&app, Method::POST, "/api/v1/products/sync/acme", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Unsupported source: acme");
    assert_eq!(stub.calls(), 0);

    let (status, _) = send(&app, Method::POST, "/api/v1/products/sync/dummy", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn metrics_endpoint_exposes_operation_counters() {
    let app = empty_app();
    send(&app, Method::GET, "/api/v1/products", None).await;

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("catalog_operations"));
}
