use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    domain::requests::{
        product::{CreateProductRequest, UpdateProductRequest},
        query::ProductQuery,
    },
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use sqlx::types::Json;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, ProductModel>,
}

impl Table {
    fn external_key_taken(&self, external_id: Option<i64>, source: Option<&str>) -> bool {
        let (Some(external_id), Some(source)) = (external_id, source) else {
            return false;
        };
        self.rows.values().any(|p| {
            p.external_id == Some(external_id) && p.external_source.as_deref() == Some(source)
        })
    }
}

/// Process-local catalog store with the same semantics as the Postgres
/// repositories. Selected with `DATABASE_URL=memory://`.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProductStore {
    async fn find_all(
        &self,
        query: &ProductQuery,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        let table = self.table.read().await;

        let mut matched: Vec<&ProductModel> = table
            .rows
            .values()
            .filter(|p| query.filter.matches(p))
            .collect();
        matched.sort_by(|a, b| query.sort.compare(a, b));

        let total = matched.len() as i64;
        let offset = usize::try_from(query.pagination.offset()).unwrap_or(usize::MAX);
        let page = matched
            .into_iter()
            .skip(offset)
            .take(query.pagination.size as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_external_key(
        &self,
        external_id: i64,
        source: &str,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|p| {
                p.external_id == Some(external_id) && p.external_source.as_deref() == Some(source)
            })
            .cloned())
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let table = self.table.read().await;
        let categories: BTreeSet<String> = table
            .rows
            .values()
            .filter(|p| p.is_active)
            .map(|p| p.category.clone())
            .collect();
        Ok(categories.into_iter().collect())
    }

    async fn distinct_brands(&self) -> Result<Vec<String>, RepositoryError> {
        let table = self.table.read().await;
        let brands: BTreeSet<String> = table
            .rows
            .values()
            .filter(|p| p.is_active)
            .filter_map(|p| p.brand.clone())
            .collect();
        Ok(brands.into_iter().collect())
    }

    async fn price_range(&self) -> Result<(Decimal, Decimal), RepositoryError> {
        let table = self.table.read().await;
        let mut prices = table.rows.values().filter(|p| p.is_active).map(|p| p.price);

        let Some(first) = prices.next() else {
            return Ok((Decimal::ZERO, Decimal::ZERO));
        };
        Ok(prices.fold((first, first), |(min, max), price| {
            (min.min(price), max.max(price))
        }))
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProductStore {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut table = self.table.write().await;

        if table.external_key_taken(req.external_id, req.external_source.as_deref()) {
            return Err(RepositoryError::AlreadyExists(format!(
                "Product with external key ({}, {}) already exists",
                req.external_id.unwrap_or_default(),
                req.external_source.as_deref().unwrap_or_default()
            )));
        }

        table.last_id += 1;
        let now = Utc::now();
        let product = ProductModel {
            id: table.last_id,
            title: req.title.clone(),
            description: req.description.clone(),
            price: req.price,
            discount_percentage: req.discount_percentage,
            rating: req.rating,
            stock: req.stock,
            brand: req.brand.clone(),
            category: req.category.clone(),
            thumbnail: req.thumbnail.clone(),
            images: Json(req.images.clone()),
            external_id: req.external_id,
            external_source: req.external_source.clone(),
            is_active: req.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(product.id, product.clone());

        info!("✅ Created product ID {} ({})", product.id, product.title);
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut table = self.table.write().await;
        let Some(product) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &req.title {
            product.title = title.clone();
        }
        if let Some(description) = &req.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(discount) = req.discount_percentage {
            product.discount_percentage = Some(discount);
        }
        if let Some(rating) = req.rating {
            product.rating = Some(rating);
        }
        if let Some(stock) = req.stock {
            product.stock = stock;
        }
        if let Some(brand) = &req.brand {
            product.brand = Some(brand.clone());
        }
        if let Some(category) = &req.category {
            product.category = category.clone();
        }
        if let Some(thumbnail) = &req.thumbnail {
            product.thumbnail = Some(thumbnail.clone());
        }
        if let Some(images) = &req.images {
            product.images = Json(images.clone());
        }
        if let Some(is_active) = req.is_active {
            product.is_active = is_active;
        }
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    async fn replace_synced(
        &self,
        id: i32,
        req: &CreateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut table = self.table.write().await;
        let Some(product) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        product.title = req.title.clone();
        product.description = req.description.clone();
        product.price = req.price;
        product.discount_percentage = req.discount_percentage;
        product.rating = req.rating;
        product.stock = req.stock;
        product.brand = req.brand.clone();
        product.category = req.category.clone();
        product.thumbnail = req.thumbnail.clone();
        product.images = Json(req.images.clone());
        product.is_active = req.is_active.unwrap_or(true);
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: i32) -> Result<bool, RepositoryError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
