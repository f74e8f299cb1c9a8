use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    domain::requests::query::ProductQuery,
    model::product::Product as ProductModel,
    repository::filter::{PRODUCT_COLUMNS, build_count_query, build_list_query},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        query: &ProductQuery,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching products | page: {}, size: {}, filter: {:?}",
            query.pagination.page, query.pagination.size, query.filter
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = build_count_query(&query.filter)
            .build_query_scalar::<i64>()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?;

        let products = build_list_query(query)
            .build_query_as::<ProductModel>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok((products, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let result = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_by_external_key(
        &self,
        external_id: i64,
        source: &str,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE external_id = $1 AND external_source = $2"
        );
        let result = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(external_id)
            .bind(source)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!(
                    "❌ Failed to look up external product ({external_id}, {source}): {:?}",
                    e
                );
                RepositoryError::from(e)
            })?;

        Ok(result)
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM products WHERE is_active = TRUE ORDER BY category",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch categories: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn distinct_brands(&self) -> Result<Vec<String>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT brand
            FROM products
            WHERE is_active = TRUE AND brand IS NOT NULL
            ORDER BY brand
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch brands: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn price_range(&self) -> Result<(Decimal, Decimal), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            SELECT COALESCE(MIN(price), 0), COALESCE(MAX(price), 0)
            FROM products
            WHERE is_active = TRUE
            "#,
        )
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to compute price range: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
