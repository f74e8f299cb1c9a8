use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[schema(example = "iPhone 9")]
    pub title: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 549.99)]
    pub price: Decimal,

    #[validate(custom(function = "validate_discount"))]
    #[schema(value_type = Option<f64>, example = 12.96)]
    pub discount_percentage: Option<Decimal>,

    #[validate(custom(function = "validate_rating"))]
    #[schema(value_type = Option<f64>, example = 4.69)]
    pub rating: Option<Decimal>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 94)]
    pub stock: i32,

    #[validate(length(max = 100, message = "Brand must be at most 100 characters"))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    #[schema(example = "smartphones")]
    pub category: String,

    #[validate(
        length(max = 500, message = "Thumbnail must be at most 500 characters"),
        custom(function = "validate_http_url")
    )]
    pub thumbnail: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Vec<String>,

    pub external_id: Option<i64>,

    #[validate(length(max = 50, message = "External source must be at most 50 characters"))]
    pub external_source: Option<String>,

    pub is_active: Option<bool>,
}

/// Partial update. Absent and `null` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,

    #[validate(custom(function = "validate_discount"))]
    #[schema(value_type = Option<f64>)]
    pub discount_percentage: Option<Decimal>,

    #[validate(custom(function = "validate_rating"))]
    #[schema(value_type = Option<f64>)]
    pub rating: Option<Decimal>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    #[validate(length(max = 100, message = "Brand must be at most 100 characters"))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,

    #[validate(
        length(max = 500, message = "Thumbnail must be at most 500 characters"),
        custom(function = "validate_http_url")
    )]
    pub thumbnail: Option<String>,

    #[validate(custom(function = "validate_image_urls"))]
    pub images: Option<Vec<String>>,

    pub is_active: Option<bool>,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn has_cents_precision(value: &Decimal) -> bool {
    value.normalize().scale() <= 2
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(invalid("range", "Price cannot be negative"));
    }
    if *price > Decimal::new(9_999_999_999, 2) {
        return Err(invalid("range", "Price is too large"));
    }
    if !has_cents_precision(price) {
        return Err(invalid(
            "precision",
            "Price must have at most 2 decimal places",
        ));
    }
    Ok(())
}

fn validate_discount(discount: &Decimal) -> Result<(), ValidationError> {
    if *discount < Decimal::ZERO || *discount > Decimal::ONE_HUNDRED {
        return Err(invalid(
            "range",
            "Discount percentage must be between 0 and 100",
        ));
    }
    if !has_cents_precision(discount) {
        return Err(invalid(
            "precision",
            "Discount percentage must have at most 2 decimal places",
        ));
    }
    Ok(())
}

fn validate_rating(rating: &Decimal) -> Result<(), ValidationError> {
    if *rating < Decimal::ZERO || *rating > Decimal::from(5) {
        return Err(invalid("range", "Rating must be between 0 and 5"));
    }
    if !has_cents_precision(rating) {
        return Err(invalid(
            "precision",
            "Rating must have at most 2 decimal places",
        ));
    }
    Ok(())
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));

    matches!(rest, Some(host) if !host.is_empty() && !host.contains(char::is_whitespace))
}

fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    if is_http_url(value) {
        Ok(())
    } else {
        Err(invalid("url", "URL must start with http:// or https://"))
    }
}

fn validate_image_urls(images: &[String]) -> Result<(), ValidationError> {
    if images.iter().all(|url| is_http_url(url)) {
        Ok(())
    } else {
        Err(invalid(
            "url",
            "Each image URL must start with http:// or https://",
        ))
    }
}
