use crate::model::product::Product;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{cmp::Ordering, num::IntErrorKind, str::FromStr};
use utoipa::IntoParams;
use validator::{ValidationError, ValidationErrors};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw list parameters exactly as they arrive on the query string.
///
/// Everything is kept as text so that junk values can be normalised instead
/// of failing extraction; `into_query` does the actual parsing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// Case-insensitive substring of the category
    pub category: Option<String>,
    /// Case-insensitive substring of the brand
    pub brand: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// 0 to 5
    pub min_rating: Option<String>,
    /// 0 to 5
    pub max_rating: Option<String>,
    /// true/1/yes/on or false/0/no/off
    pub in_stock: Option<String>,
    /// Matched against title, description, category and brand
    pub search: Option<String>,
    /// id, title, price, rating, stock, created_at or updated_at
    pub sort_by: Option<String>,
    /// asc or desc
    pub sort_order: Option<String>,
    pub page: Option<String>,
    /// 1 to 100, default 20
    pub size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<Decimal>,
    pub max_rating: Option<Decimal>,
    pub in_stock: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Id,
    Title,
    Price,
    Rating,
    Stock,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub sort: ProductSort,
    pub pagination: Pagination,
}

impl SortField {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Price => "price",
            SortField::Rating => "rating",
            SortField::Stock => "stock",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "price" => Ok(SortField::Price),
            "rating" => Ok(SortField::Rating),
            "stock" => Ok(SortField::Stock),
            "created_at" => Ok(SortField::CreatedAt),
            "updated_at" => Ok(SortField::UpdatedAt),
            _ => Err(()),
        }
    }
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

fn normalize(raw: Option<&str>) -> Option<&str> {
    let value = raw?.trim();
    match value {
        "" | "null" | "undefined" => None,
        _ => Some(value),
    }
}

fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    normalize(raw).and_then(|v| Decimal::from_str(v).ok())
}

fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match normalize(raw)?.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Integer text that overflows `i64` saturates instead of being dropped.
fn parse_integer(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn parse_page(raw: Option<&str>) -> u32 {
    normalize(raw)
        .and_then(parse_integer)
        .filter(|page| *page > 0)
        .map(|page| u32::try_from(page).unwrap_or(u32::MAX))
        .unwrap_or(DEFAULT_PAGE)
}

fn parse_size(raw: Option<&str>) -> u32 {
    normalize(raw)
        .and_then(parse_integer)
        .map(|size| size.clamp(1, i64::from(MAX_PAGE_SIZE)) as u32)
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn check_bounds(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<Decimal>,
    min: Decimal,
    max: Option<Decimal>,
) {
    let Some(value) = value else { return };
    let out_of_range = value < min || max.is_some_and(|max| value > max);
    if out_of_range {
        let message = match max {
            Some(max) => format!("{field} must be between {min} and {max}"),
            None => format!("{field} cannot be negative"),
        };
        errors.add(field, field_error("range", message));
    }
}

fn check_pair(
    errors: &mut ValidationErrors,
    field: &'static str,
    lower_name: &str,
    lower: Option<Decimal>,
    upper: Option<Decimal>,
) {
    if let (Some(lower), Some(upper)) = (lower, upper) {
        if upper <= lower {
            errors.add(
                field,
                field_error(
                    "range_order",
                    format!("{field} must be greater than {lower_name}"),
                ),
            );
        }
    }
}

impl ProductListParams {
    /// Normalises and validates the raw parameters.
    ///
    /// Unparseable numbers are treated as absent, while inconsistent or
    /// out-of-domain values are rejected.
    pub fn into_query(self) -> Result<ProductQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let filter = ProductFilter {
            category: normalize(self.category.as_deref()).map(str::to_string),
            brand: normalize(self.brand.as_deref()).map(str::to_string),
            min_price: parse_decimal(self.min_price.as_deref()),
            max_price: parse_decimal(self.max_price.as_deref()),
            min_rating: parse_decimal(self.min_rating.as_deref()),
            max_rating: parse_decimal(self.max_rating.as_deref()),
            in_stock: parse_flag(self.in_stock.as_deref()),
            search: normalize(self.search.as_deref()).map(str::to_string),
        };

        let five = Decimal::from(5);
        check_bounds(&mut errors, "min_price", filter.min_price, Decimal::ZERO, None);
        check_bounds(&mut errors, "max_price", filter.max_price, Decimal::ZERO, None);
        check_bounds(&mut errors, "min_rating", filter.min_rating, Decimal::ZERO, Some(five));
        check_bounds(&mut errors, "max_rating", filter.max_rating, Decimal::ZERO, Some(five));
        check_pair(&mut errors, "max_price", "min_price", filter.min_price, filter.max_price);
        check_pair(&mut errors, "max_rating", "min_rating", filter.min_rating, filter.max_rating);

        let field = match normalize(self.sort_by.as_deref()) {
            None => SortField::default(),
            Some(raw) => raw.parse::<SortField>().unwrap_or_else(|_| {
                errors.add(
                    "sort_by",
                    field_error(
                        "sort_by",
                        format!(
                            "sort_by must be one of id, title, price, rating, stock, created_at, updated_at (got '{raw}')"
                        ),
                    ),
                );
                SortField::default()
            }),
        };

        let order = match normalize(self.sort_order.as_deref()) {
            None => SortOrder::default(),
            Some(raw) => raw.parse::<SortOrder>().unwrap_or_else(|_| {
                errors.add(
                    "sort_order",
                    field_error(
                        "sort_order",
                        format!("sort_order must be 'asc' or 'desc' (got '{raw}')"),
                    ),
                );
                SortOrder::default()
            }),
        };

        let pagination = Pagination {
            page: parse_page(self.page.as_deref()),
            size: parse_size(self.size.as_deref()),
        };

        // Second guard; parse_size already clamps.
        if pagination.size > MAX_PAGE_SIZE {
            errors.add(
                "size",
                field_error("range", format!("size must not exceed {MAX_PAGE_SIZE}")),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProductQuery {
            filter,
            sort: ProductSort { field, order },
            pagination,
        })
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl ProductFilter {
    /// In-process evaluation of the filter, including the implicit
    /// active-only condition.
    pub fn matches(&self, product: &Product) -> bool {
        if !product.is_active {
            return false;
        }

        if let Some(category) = &self.category {
            if !contains_ci(&product.category, category) {
                return false;
            }
        }

        if let Some(brand) = &self.brand {
            match &product.brand {
                Some(b) if contains_ci(b, brand) => {}
                _ => return false,
            }
        }

        if self.min_price.is_some_and(|min| product.price < min)
            || self.max_price.is_some_and(|max| product.price > max)
        {
            return false;
        }

        if self.min_rating.is_some() || self.max_rating.is_some() {
            let Some(rating) = product.rating else {
                return false;
            };
            if self.min_rating.is_some_and(|min| rating < min)
                || self.max_rating.is_some_and(|max| rating > max)
            {
                return false;
            }
        }

        match self.in_stock {
            Some(true) if product.stock <= 0 => return false,
            Some(false) if product.stock != 0 => return false,
            _ => {}
        }

        if let Some(term) = &self.search {
            let hit = contains_ci(&product.title, term)
                || product
                    .description
                    .as_deref()
                    .is_some_and(|d| contains_ci(d, term))
                || contains_ci(&product.category, term)
                || product.brand.as_deref().is_some_and(|b| contains_ci(b, term));
            if !hit {
                return false;
            }
        }

        true
    }
}

impl ProductSort {
    /// Total order used by the in-memory store: requested field first, NULL
    /// ratings last in either direction, then `id` in the same direction.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let directed = |ord: Ordering| match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        };

        let primary = match self.field {
            SortField::Id => Ordering::Equal,
            SortField::Title => directed(a.title.cmp(&b.title)),
            SortField::Price => directed(a.price.cmp(&b.price)),
            SortField::Stock => directed(a.stock.cmp(&b.stock)),
            SortField::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
            SortField::UpdatedAt => directed(a.updated_at.cmp(&b.updated_at)),
            SortField::Rating => match (a.rating, b.rating) {
                (Some(x), Some(y)) => directed(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };

        primary.then_with(|| directed(a.id.cmp(&b.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::product::fixtures::product;

    fn params(pairs: &[(&str, &str)]) -> ProductListParams {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn defaults_apply_when_nothing_is_given() {
        let query = ProductListParams::default().into_query().unwrap();

        assert_eq!(query.filter, ProductFilter::default());
        assert_eq!(query.sort.field, SortField::Id);
        assert_eq!(query.sort.order, SortOrder::Desc);
        assert_eq!(query.pagination, Pagination { page: 1, size: 20 });
    }

    #[test]
    fn placeholder_and_junk_values_are_ignored() {
        let query = params(&[
            ("category", "  null "),
            ("brand", "undefined"),
            ("search", "   "),
            ("min_price", "abc"),
            ("in_stock", "maybe"),
        ])
        .into_query()
        .unwrap();

        assert_eq!(query.filter, ProductFilter::default());
    }

    #[test]
    fn stock_flag_accepts_common_spellings() {
        for raw in ["true", "1", "YES", "On"] {
            let q = params(&[("in_stock", raw)]).into_query().unwrap();
            assert_eq!(q.filter.in_stock, Some(true), "{raw}");
        }
        for raw in ["false", "0", "no", "OFF"] {
            let q = params(&[("in_stock", raw)]).into_query().unwrap();
            assert_eq!(q.filter.in_stock, Some(false), "{raw}");
        }
    }

    #[test]
    fn inverted_price_range_is_rejected_not_swapped() {
        let errors = params(&[("min_price", "10"), ("max_price", "5")])
            .into_query()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("max_price"));

        let equal = params(&[("min_price", "5"), ("max_price", "5")]).into_query();
        assert!(equal.is_err());
    }

    #[test]
    fn out_of_domain_bounds_are_rejected() {
        let errors = params(&[("min_price", "-1"), ("max_rating", "7")])
            .into_query()
            .unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("min_price"));
        assert!(fields.contains_key("max_rating"));
    }

    #[test]
    fn sort_values_are_checked_against_allow_list() {
        assert!(params(&[("sort_by", "password")]).into_query().is_err());
        assert!(params(&[("sort_order", "DESC")]).into_query().is_err());

        let q = params(&[("sort_by", "rating"), ("sort_order", "asc")])
            .into_query()
            .unwrap();
        assert_eq!(q.sort, ProductSort { field: SortField::Rating, order: SortOrder::Asc });
    }

    #[test]
    fn page_and_size_are_normalised() {
        let q = params(&[("page", "-3"), ("size", "150")]).into_query().unwrap();
        assert_eq!(q.pagination, Pagination { page: 1, size: 100 });

        let q = params(&[("page", "x"), ("size", "0")]).into_query().unwrap();
        assert_eq!(q.pagination, Pagination { page: 1, size: 1 });

        let q = params(&[("page", "4"), ("size", "2.5")]).into_query().unwrap();
        assert_eq!(q.pagination, Pagination { page: 4, size: 20 });
        assert_eq!(q.pagination.offset(), 60);
    }

    #[test]
    fn overflowing_integers_saturate() {
        let q = params(&[("page", "99999999999999999999"), ("size", "99999999999999999999")])
            .into_query()
            .unwrap();
        assert_eq!(q.pagination, Pagination { page: u32::MAX, size: 100 });

        let q = params(&[("page", "-99999999999999999999"), ("size", "-99999999999999999999")])
            .into_query()
            .unwrap();
        assert_eq!(q.pagination, Pagination { page: 1, size: 1 });
    }

    #[test]
    fn filter_matches_each_condition() {
        let mut p = product(1, "Red Lipstick", "12.50");
        p.category = "beauty".into();
        p.brand = Some("Glamour".into());
        p.rating = Some("4.5".parse().unwrap());
        p.stock = 3;

        let filter = ProductFilter {
            category: Some("BEAU".into()),
            brand: Some("glam".into()),
            min_price: Some("10".parse().unwrap()),
            max_price: Some("20".parse().unwrap()),
            min_rating: Some("4".parse().unwrap()),
            in_stock: Some(true),
            search: Some("lipstick".into()),
            ..Default::default()
        };
        assert!(filter.matches(&p));

        let out_of_stock = ProductFilter {
            in_stock: Some(false),
            ..Default::default()
        };
        assert!(!out_of_stock.matches(&p));

        p.is_active = false;
        assert!(!ProductFilter::default().matches(&p));
    }

    #[test]
    fn null_ratings_sort_last_both_ways() {
        let mut a = product(1, "a", "1");
        let mut b = product(2, "b", "1");
        let c = product(3, "c", "1");
        a.rating = Some("2".parse().unwrap());
        b.rating = Some("4".parse().unwrap());

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let sort = ProductSort { field: SortField::Rating, order };
            let mut items = vec![c.clone(), a.clone(), b.clone()];
            items.sort_by(|x, y| sort.compare(x, y));
            assert_eq!(items.last().map(|p| p.id), Some(3));
        }
    }

    #[test]
    fn ties_break_on_id_in_the_same_direction() {
        let sort = ProductSort { field: SortField::Price, order: SortOrder::Desc };
        let mut items = vec![product(1, "a", "5"), product(3, "b", "5"), product(2, "c", "5")];
        items.sort_by(|x, y| sort.compare(x, y));

        let ids: Vec<i32> = items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
