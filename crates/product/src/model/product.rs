use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, types::Json};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_percentage: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub stock: i32,
    pub brand: Option<String>,
    pub category: String,
    pub thumbnail: Option<String>,
    pub images: Json<Vec<String>>,
    pub external_id: Option<i64>,
    pub external_source: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price after discount, rounded to cents. Never persisted.
    pub fn discounted_price(&self) -> Decimal {
        match self.discount_percentage {
            Some(discount) if discount > Decimal::ZERO => {
                let factor = Decimal::ONE - discount / Decimal::ONE_HUNDRED;
                (self.price * factor).round_dp(2)
            }
            _ => self.price.round_dp(2),
        }
    }
}
