pub mod process_time;
pub mod validate;
