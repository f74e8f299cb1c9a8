use crate::{
    abstract_trait::product::service::{
        DynProductCommandService, DynProductQueryService, DynProductSyncService,
    },
    domain::{
        requests::{
            product::{CreateProductRequest, UpdateProductRequest},
            query::ProductListParams,
        },
        response::{
            pagination::ProductListResponse,
            product::{PriceRangeResponse, ProductResponse},
            sync::SyncSummary,
        },
    },
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::errors::{ErrorResponse, HttpError, ServiceError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Product",
    params(ProductListParams),
    responses(
        (status = 200, description = "Filtered, sorted page of products", body = ProductListResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<ProductListParams>,
) -> Result<impl IntoResponse, HttpError> {
    let query = params.into_query().map_err(ServiceError::from)?;
    let response = service.find_all(&query).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "External key already linked", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_product(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_product(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/products/categories/list",
    tag = "Product",
    responses(
        (status = 200, description = "Distinct categories of active products", body = Vec<String>)
    )
)]
pub async fn get_categories(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_categories().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/brands/list",
    tag = "Product",
    responses(
        (status = 200, description = "Distinct brands of active products", body = Vec<String>)
    )
)]
pub async fn get_brands(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_brands().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/price-range",
    tag = "Product",
    responses(
        (status = 200, description = "Lowest and highest active price", body = PriceRangeResponse)
    )
)]
pub async fn get_price_range(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_price_range().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/products/sync/{source}",
    tag = "Product",
    params(("source" = String, Path, description = "External source: dummy or fakestore")),
    responses(
        (status = 200, description = "Sync summary, possibly with per-item errors", body = SyncSummary),
        (status = 400, description = "Unsupported source", body = ErrorResponse),
        (status = 502, description = "External source unavailable", body = ErrorResponse)
    )
)]
pub async fn sync_products(
    Extension(service): Extension<DynProductSyncService>,
    Path(source): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.sync(&source).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/v1/products", get(get_products).post(create_product))
        .route("/api/v1/products/categories/list", get(get_categories))
        .route("/api/v1/products/brands/list", get(get_brands))
        .route("/api/v1/products/price-range", get(get_price_range))
        .route("/api/v1/products/sync/{source}", post(sync_products))
        .route(
            "/api/v1/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
        .layer(Extension(app_state.di_container.product_sync.clone()))
}
