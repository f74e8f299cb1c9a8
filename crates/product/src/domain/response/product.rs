use crate::model::product::Product as ProductModel;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ProductResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[schema(value_type = Option<f64>)]
    pub discount_percentage: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub rating: Option<Decimal>,
    pub stock: i32,
    pub brand: Option<String>,
    pub category: String,
    pub thumbnail: Option<String>,
    pub images: Vec<String>,
    pub external_id: Option<i64>,
    pub external_source: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = f64)]
    pub discounted_price: Decimal,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        let discounted_price = value.discounted_price();
        ProductResponse {
            id: value.id,
            title: value.title,
            description: value.description,
            price: value.price,
            discount_percentage: value.discount_percentage,
            rating: value.rating,
            stock: value.stock,
            brand: value.brand,
            category: value.category,
            thumbnail: value.thumbnail,
            images: value.images.0,
            external_id: value.external_id,
            external_source: value.external_source,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
            discounted_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct PriceRangeResponse {
    #[schema(value_type = f64)]
    pub min_price: Decimal,
    #[schema(value_type = f64)]
    pub max_price: Decimal,
}
