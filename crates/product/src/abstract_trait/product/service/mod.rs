mod command;
mod query;
mod sync;

pub use self::command::{DynProductCommandService, ProductCommandServiceTrait};
pub use self::query::{DynProductQueryService, ProductQueryServiceTrait};
pub use self::sync::{DynProductSyncService, ProductSyncServiceTrait};
