use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct SyncItemError {
    pub external_id: Option<i64>,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct SyncSummary {
    pub source: String,
    pub total_fetched: usize,
    pub created_count: usize,
    pub updated_count: usize,
    pub errors: Vec<SyncItemError>,
}
