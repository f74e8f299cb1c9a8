use crate::domain::requests::{product::CreateProductRequest, sync::SyncSource};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde_json::Value;
use shared::errors::format_validation_errors;
use std::str::FromStr;
use validator::Validate;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNCATEGORIZED: &str = "Uncategorized";

fn text(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn decimal(value: Option<&Value>) -> Option<Decimal> {
    let parsed = match value? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    parsed.map(|d| d.round_dp(2))
}

fn stock(value: Option<&Value>) -> i32 {
    value
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0)
}

/// External id of a raw record, if it has a usable one.
pub fn external_id(record: &Value) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

/// Maps one raw record to the fields of an internal product.
///
/// Missing required fields get placeholder values first; a record still
/// carrying a placeholder title or category afterwards, or violating any
/// product constraint, is rejected with a readable reason.
pub fn map_record(source: SyncSource, record: &Value) -> Result<CreateProductRequest, String> {
    let external_id = external_id(record).ok_or_else(|| "Missing external id".to_string())?;

    let title = text(record, "title").unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let category = text(record, "category").unwrap_or_else(|| UNCATEGORIZED.to_string());
    let price = decimal(record.get("price")).unwrap_or(Decimal::ZERO);

    let req = match source {
        SyncSource::Dummy => CreateProductRequest {
            title,
            description: text(record, "description"),
            price,
            discount_percentage: Some(
                decimal(record.get("discountPercentage")).unwrap_or(Decimal::ZERO),
            ),
            rating: Some(decimal(record.get("rating")).unwrap_or(Decimal::ZERO)),
            stock: stock(record.get("stock")),
            brand: text(record, "brand"),
            category,
            thumbnail: text(record, "thumbnail"),
            images: record
                .get("images")
                .and_then(Value::as_array)
                .map(|images| {
                    images
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            external_id: Some(external_id),
            external_source: Some(source.as_str().to_string()),
            is_active: Some(true),
        },
        SyncSource::FakeStore => {
            let image = text(record, "image");
            CreateProductRequest {
                title,
                description: text(record, "description"),
                price,
                discount_percentage: Some(Decimal::ZERO),
                rating: Some(decimal(record.pointer("/rating/rate")).unwrap_or(Decimal::ZERO)),
                stock: 0,
                brand: None,
                category,
                thumbnail: image.clone(),
                images: image.into_iter().collect(),
                external_id: Some(external_id),
                external_source: Some(source.as_str().to_string()),
                is_active: Some(true),
            }
        }
    };

    if req.title == UNKNOWN_TITLE {
        return Err("Missing or invalid title".to_string());
    }
    if req.category == UNCATEGORIZED {
        return Err("Missing or invalid category".to_string());
    }

    req.validate()
        .map_err(|errors| format_validation_errors(&errors))?;

    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dummy_record() -> Value {
        json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Popular mascara",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.175,
            "rating": 4.94,
            "stock": 5,
            "brand": "Essence",
            "thumbnail": "https://cdn.dummyjson.com/products/1/thumbnail.png",
            "images": ["https://cdn.dummyjson.com/products/1/1.png"]
        })
    }

    #[test]
    fn maps_dummy_fields_and_rounds_decimals() {
        let req = map_record(SyncSource::Dummy, &dummy_record()).unwrap();

        assert_eq!(req.title, "Essence Mascara Lash Princess");
        assert_eq!(req.price, Decimal::from_str("9.99").unwrap());
        assert_eq!(req.discount_percentage, Some(Decimal::from_str("7.18").unwrap()));
        assert_eq!(req.stock, 5);
        assert_eq!(req.brand.as_deref(), Some("Essence"));
        assert_eq!(req.images.len(), 1);
        assert_eq!(req.external_id, Some(1));
        assert_eq!(req.external_source.as_deref(), Some("dummy"));
    }

    #[test]
    fn maps_fakestore_nested_rating_and_single_image() {
        let record = json!({
            "id": 7,
            "title": "White Gold Plated Princess",
            "price": 9.99,
            "description": "Classic ring",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71YAIFU48IL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 3, "count": 400 }
        });

        let req = map_record(SyncSource::FakeStore, &record).unwrap();

        assert_eq!(req.rating, Some(Decimal::from(3)));
        assert_eq!(req.stock, 0);
        assert!(req.brand.is_none());
        assert_eq!(req.thumbnail.as_deref(), req.images.first().map(String::as_str));
        assert_eq!(req.external_source.as_deref(), Some("fakestore"));
    }

    #[test]
    fn missing_title_or_category_is_rejected() {
        let mut record = dummy_record();
        record.as_object_mut().unwrap().remove("title");
        assert_eq!(
            map_record(SyncSource::Dummy, &record).unwrap_err(),
            "Missing or invalid title"
        );

        let mut record = dummy_record();
        record["category"] = json!("");
        assert_eq!(
            map_record(SyncSource::Dummy, &record).unwrap_err(),
            "Missing or invalid category"
        );
    }

    #[test]
    fn constraint_violations_are_reported_per_record() {
        let mut record = dummy_record();
        record["rating"] = json!(9.5);

        let err = map_record(SyncSource::Dummy, &record).unwrap_err();
        assert!(err.contains("rating"), "{err}");
    }

    #[test]
    fn records_without_an_id_cannot_be_linked() {
        let mut record = dummy_record();
        record.as_object_mut().unwrap().remove("id");
        assert!(map_record(SyncSource::Dummy, &record).is_err());
    }
}
