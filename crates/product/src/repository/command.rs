use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
    repository::filter::{PRODUCT_COLUMNS, build_update_query},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        product: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO products (
                title, description, price, discount_percentage, rating, stock,
                brand, category, thumbnail, images, external_id, external_source,
                is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW(), NOW())
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.discount_percentage)
            .bind(product.rating)
            .bind(product.stock)
            .bind(&product.brand)
            .bind(&product.category)
            .bind(&product.thumbnail)
            .bind(Json(&product.images))
            .bind(product.external_id)
            .bind(&product.external_source)
            .bind(product.is_active.unwrap_or(true))
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                error!("❌ Failed to create product {}: {:?}", product.title, err);
                RepositoryError::from(err)
            })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("✅ Created product ID {} ({})", result.id, result.title);
        Ok(result)
    }

    async fn update_product(
        &self,
        id: i32,
        product: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let result = build_update_query(id, product)
            .build_query_as::<ProductModel>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(|err| {
                error!("❌ Failed to update product ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        if result.is_some() {
            info!("🔄 Updated product ID {}", id);
        }
        Ok(result)
    }

    async fn replace_synced(
        &self,
        id: i32,
        product: &CreateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE products
            SET title = $2,
                description = $3,
                price = $4,
                discount_percentage = $5,
                rating = $6,
                stock = $7,
                brand = $8,
                category = $9,
                thumbnail = $10,
                images = $11,
                is_active = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.discount_percentage)
            .bind(product.rating)
            .bind(product.stock)
            .bind(&product.brand)
            .bind(&product.category)
            .bind(&product.thumbnail)
            .bind(Json(&product.images))
            .bind(product.is_active.unwrap_or(true))
            .fetch_optional(&mut *tx)
            .await
            .map_err(|err| {
                error!("❌ Failed to replace synced product ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn delete_product(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete product ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted product ID {}", id);
        }
        Ok(deleted)
    }
}
