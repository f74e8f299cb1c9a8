pub mod command;
pub mod query;
pub mod sync;
