pub mod external;
pub mod product;
