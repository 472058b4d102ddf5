use crate::error::{Error, Result};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub api_rps: u32,
    pub uploads_dir: String,
    /// Commission taken on every confirmed match, in percent of the request rate.
    pub commission_percentage: Decimal,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let store_backend = get_env_or("STORE_BACKEND", "postgres")
            .parse::<StoreBackend>()
            .map_err(|e| Error::Config(format!("Invalid value for STORE_BACKEND: {}", e)))?;
        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(Error::Config(
                "Missing environment variable: DATABASE_URL".to_string(),
            ));
        }

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8080"),
            database_url,
            store_backend,
            jwt_secret: get_env("JWT_SECRET")?,
            jwt_ttl_hours: get_env_parse_or("JWT_TTL_HOURS", 24)?,
            api_rps: get_env_parse_or("API_RPS", 100)?,
            uploads_dir: get_env_or("UPLOADS_DIR", "./uploads"),
            commission_percentage: get_env_parse_or("COMMISSION_PERCENTAGE", Decimal::TEN)?,
            log_json: get_env_or("LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    get_config()
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
