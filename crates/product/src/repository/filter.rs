use crate::domain::requests::{
    product::UpdateProductRequest,
    query::{ProductFilter, ProductQuery, SortField},
};
use sqlx::{Postgres, QueryBuilder, types::Json};

pub const PRODUCT_COLUMNS: &str = "id, title, description, price, discount_percentage, rating, \
     stock, brand, category, thumbnail, images, external_id, external_source, is_active, \
     created_at, updated_at";

/// Escapes LIKE metacharacters so user text matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

pub fn push_filter(builder: &mut QueryBuilder<'static, Postgres>, filter: &ProductFilter) {
    builder.push(" WHERE is_active = TRUE");

    if let Some(category) = &filter.category {
        builder
            .push(" AND category ILIKE ")
            .push_bind(contains_pattern(category));
    }

    if let Some(brand) = &filter.brand {
        builder
            .push(" AND brand ILIKE ")
            .push_bind(contains_pattern(brand));
    }

    if let Some(min_price) = filter.min_price {
        builder.push(" AND price >= ").push_bind(min_price);
    }

    if let Some(max_price) = filter.max_price {
        builder.push(" AND price <= ").push_bind(max_price);
    }

    if let Some(min_rating) = filter.min_rating {
        builder.push(" AND rating >= ").push_bind(min_rating);
    }

    if let Some(max_rating) = filter.max_rating {
        builder.push(" AND rating <= ").push_bind(max_rating);
    }

    match filter.in_stock {
        Some(true) => {
            builder.push(" AND stock > 0");
        }
        Some(false) => {
            builder.push(" AND stock = 0");
        }
        None => {}
    }

    if let Some(term) = &filter.search {
        let pattern = contains_pattern(term);
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR category ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR brand ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub fn build_count_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filter(&mut builder, filter);
    builder
}

pub fn build_list_query(query: &ProductQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
    push_filter(&mut builder, &query.filter);

    let direction = query.sort.order.as_sql();
    let order_by = match query.sort.field {
        SortField::Id => format!(" ORDER BY id {direction}"),
        field => format!(
            " ORDER BY {} {direction} NULLS LAST, id {direction}",
            field.as_sql()
        ),
    };
    builder.push(order_by);

    builder
        .push(" LIMIT ")
        .push_bind(query.pagination.limit())
        .push(" OFFSET ")
        .push_bind(query.pagination.offset());

    builder
}

/// `UPDATE` touching only the fields present in `req`; `updated_at` is
/// always refreshed.
pub fn build_update_query(id: i32, req: &UpdateProductRequest) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE products SET updated_at = NOW()");

    if let Some(title) = &req.title {
        builder.push(", title = ").push_bind(title.clone());
    }
    if let Some(description) = &req.description {
        builder.push(", description = ").push_bind(description.clone());
    }
    if let Some(price) = req.price {
        builder.push(", price = ").push_bind(price);
    }
    if let Some(discount) = req.discount_percentage {
        builder.push(", discount_percentage = ").push_bind(discount);
    }
    if let Some(rating) = req.rating {
        builder.push(", rating = ").push_bind(rating);
    }
    if let Some(stock) = req.stock {
        builder.push(", stock = ").push_bind(stock);
    }
    if let Some(brand) = &req.brand {
        builder.push(", brand = ").push_bind(brand.clone());
    }
    if let Some(category) = &req.category {
        builder.push(", category = ").push_bind(category.clone());
    }
    if let Some(thumbnail) = &req.thumbnail {
        builder.push(", thumbnail = ").push_bind(thumbnail.clone());
    }
    if let Some(images) = &req.images {
        builder.push(", images = ").push_bind(Json(images.clone()));
    }
    if let Some(is_active) = req.is_active {
        builder.push(", is_active = ").push_bind(is_active);
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(format!(" RETURNING {PRODUCT_COLUMNS}"));
    builder
}
