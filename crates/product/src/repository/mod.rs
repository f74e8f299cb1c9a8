mod command;
pub mod filter;
mod memory;
mod query;

pub use self::command::ProductCommandRepository;
pub use self::memory::InMemoryProductStore;
pub use self::query::ProductQueryRepository;

use crate::abstract_trait::product::repository::{
    DynProductCommandRepository, DynProductQueryRepository,
};
use shared::config::ConnectionPool;
use std::sync::Arc;

/// Read and write halves of one catalog store.
#[derive(Clone)]
pub struct ProductRepository {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
}

impl ProductRepository {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            query: Arc::new(ProductQueryRepository::new(pool.clone())),
            command: Arc::new(ProductCommandRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = InMemoryProductStore::new();
        Self {
            query: Arc::new(store.clone()),
            command: Arc::new(store),
        }
    }
}
