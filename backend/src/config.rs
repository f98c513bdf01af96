use std::env;

use crate::services::DEFAULT_MAX_CODE_ATTEMPTS;

/// Where agent records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend for agent records (default: postgres)
    pub storage_backend: StorageBackend,
    /// Database connection URL, required for the postgres backend
    pub database_url: Option<String>,
    /// Maximum database connections in pool
    pub database_max_connections: u32,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Agent code generation attempts per create before giving up (default: 32)
    pub agent_code_max_attempts: u32,
    /// Fixed seed for the agent code generator
    pub agent_code_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => StorageBackend::Postgres,
            "memory" => StorageBackend::Memory,
            _ => return Err(ConfigError::InvalidValue("STORAGE_BACKEND")),
        };

        let database_url = lookup("DATABASE_URL");
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("DATABASE_URL"));
        }

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let agent_code_max_attempts = match lookup("AGENT_CODE_MAX_ATTEMPTS") {
            Some(value) => value
                .parse()
                .ok()
                .filter(|attempts: &u32| *attempts > 0)
                .ok_or(ConfigError::InvalidValue("AGENT_CODE_MAX_ATTEMPTS"))?,
            None => DEFAULT_MAX_CODE_ATTEMPTS,
        };

        let agent_code_seed: Option<u64> = lookup("AGENT_CODE_SEED")
            .map(|value| value.parse())
            .transpose()
            .map_err(|_| ConfigError::InvalidValue("AGENT_CODE_SEED"))?;

        Ok(Self {
            storage_backend,
            database_url,
            database_max_connections,
            host,
            port,
            agent_code_max_attempts,
            agent_code_seed,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
