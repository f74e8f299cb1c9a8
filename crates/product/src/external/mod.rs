mod client;

pub use self::client::HttpCatalogClient;
