use anyhow::{Context, Result, anyhow};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres(String),
    Memory,
}

#[derive(Debug, Clone)]
pub struct ExternalApiConfig {
    pub dummy_api_url: String,
    pub fakestore_api_url: String,
    pub timeout: Duration,
    pub retry_attempts: u32,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub dev_mode: bool,
    pub enable_file: bool,
    pub json: bool,
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub environment: String,
    pub port: u16,
    pub database: DatabaseBackend,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub run_migrations: bool,
    pub external: ExternalApiConfig,
    pub allowed_origins: Vec<String>,
    pub log: LogConfig,
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}

fn parse_database_url(url: &str) -> Result<DatabaseBackend> {
    let url = url.trim();
    if url.starts_with("memory://") {
        Ok(DatabaseBackend::Memory)
    } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(DatabaseBackend::Postgres(url.to_string()))
    } else {
        Err(anyhow!(
            "DATABASE_URL must start with postgres://, postgresql:// or memory://"
        ))
    }
}

impl Config {
    pub fn init() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so parsing can be
    /// exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let flag = |key: &str| -> Result<bool> {
            lookup(key)
                .map(|v| parse_bool(key, &v))
                .transpose()
                .map(|v| v.unwrap_or(false))
        };

        let database_url =
            lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let database = parse_database_url(&database_url)?;

        let port = get("PORT", "8000")
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = get("DB_MIN_CONN", "1")
            .parse::<u32>()
            .context("DB_MIN_CONN must be a valid u32 integer")?;
        let db_max_conn = get("DB_MAX_CONN", "10")
            .parse::<u32>()
            .context("DB_MAX_CONN must be a valid u32 integer")?;

        let run_migrations = parse_bool("RUN_MIGRATIONS", &get("RUN_MIGRATIONS", "true"))?;

        let timeout_secs = get("API_TIMEOUT", "30")
            .parse::<u64>()
            .context("API_TIMEOUT must be a number of seconds")?;
        let retry_attempts = get("API_RETRY_ATTEMPTS", "3")
            .parse::<u32>()
            .context("API_RETRY_ATTEMPTS must be a valid u32 integer")?;
        if retry_attempts == 0 {
            return Err(anyhow!("API_RETRY_ATTEMPTS must be at least 1"));
        }

        let allowed_origins = get("ALLOWED_ORIGINS", "*")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            app_name: get("APP_NAME", "Product Management API"),
            app_version: get("APP_VERSION", env!("CARGO_PKG_VERSION")),
            environment: get("ENVIRONMENT", "production"),
            port,
            database,
            db_min_conn,
            db_max_conn,
            run_migrations,
            external: ExternalApiConfig {
                dummy_api_url: get("DUMMY_API_URL", "https://dummyjson.com/products"),
                fakestore_api_url: get("FAKESTORE_API_URL", "https://fakestoreapi.com/products"),
                timeout: Duration::from_secs(timeout_secs),
                retry_attempts,
            },
            allowed_origins,
            log: LogConfig {
                dev_mode: flag("DEV_MODE")?,
                enable_file: flag("ENABLE_FILE_LOG")?,
                json: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
                log_dir: lookup("LOG_DIR"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_fill_everything_but_the_database() {
        let config = config_from(&[("DATABASE_URL", "memory://")]).unwrap();

        assert_eq!(config.database, DatabaseBackend::Memory);
        assert_eq!(config.port, 8000);
        assert!(config.run_migrations);
        assert_eq!(config.external.retry_attempts, 3);
        assert_eq!(config.external.timeout, Duration::from_secs(30));
        assert_eq!(config.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.app_name, "Product Management API");
        assert!(!config.log.dev_mode);
    }

    #[test]
    fn database_url_is_required_and_checked() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("DATABASE_URL", "mysql://localhost/db")]).is_err());

        let config = config_from(&[("DATABASE_URL", "postgresql://u:p@db/catalog")]).unwrap();
        assert_eq!(
            config.database,
            DatabaseBackend::Postgres("postgresql://u:p@db/catalog".into())
        );
    }

    #[test]
    fn invalid_values_fail_startup() {
        let base = ("DATABASE_URL", "memory://");
        assert!(config_from(&[base, ("PORT", "eighty")]).is_err());
        assert!(config_from(&[base, ("RUN_MIGRATIONS", "sometimes")]).is_err());
        assert!(config_from(&[base, ("API_RETRY_ATTEMPTS", "0")]).is_err());
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = config_from(&[
            ("DATABASE_URL", "memory://"),
            ("ALLOWED_ORIGINS", "http://localhost:3000, https://shop.example.com,"),
        ])
        .unwrap();

        assert_eq!(
            config.allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://shop.example.com".to_string()
            ]
        );
    }
}
