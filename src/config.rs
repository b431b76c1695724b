use std::env;
use std::str::FromStr;

use anyhow::bail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dynamodb" | "dynamo" => Ok(StoreBackend::DynamoDb),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => bail!("Unknown STORE_BACKEND '{}': expected 'dynamodb' or 'memory'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub log_level: String,
    pub store_backend: StoreBackend,
    pub table_name: String,
    pub dynamodb_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .unwrap_or(8081),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            store_backend: env::var("STORE_BACKEND")
                .unwrap_or_else(|_| "dynamodb".to_string())
                .parse()?,
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "CarsTable".to_string()),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_known_names() {
        assert_eq!("dynamodb".parse::<StoreBackend>().unwrap(), StoreBackend::DynamoDb);
        assert_eq!(" Memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
    }

    #[test]
    fn store_backend_rejects_unknown_names() {
        let err = "postgres".parse::<StoreBackend>().unwrap_err();
        assert!(err.to_string().contains("postgres"));
    }
}
