use crate::domain::{requests::query::Pagination, response::product::ProductResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductListResponse {
    pub items: Vec<ProductResponse>,
    pub total: i64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl ProductListResponse {
    pub fn new(items: Vec<ProductResponse>, total: i64, pagination: &Pagination) -> Self {
        let size = i64::from(pagination.size.max(1));
        let pages = u32::try_from((total.max(0) + size - 1) / size).unwrap_or(u32::MAX);

        Self {
            items,
            total,
            page: pagination.page,
            size: pagination.size,
            pages,
            has_next: pagination.page < pages,
            has_prev: pagination.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        let page = ProductListResponse::new(Vec::new(), 41, &Pagination { page: 2, size: 20 });
        assert_eq!(page.pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn empty_catalog_has_no_pages() {
        let page = ProductListResponse::new(Vec::new(), 0, &Pagination { page: 1, size: 20 });
        assert_eq!(page.pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn last_page_has_no_next() {
        let page = ProductListResponse::new(Vec::new(), 40, &Pagination { page: 2, size: 20 });
        assert_eq!(page.pages, 2);
        assert!(!page.has_next);
    }
}
