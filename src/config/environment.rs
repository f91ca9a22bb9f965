//! Configuración de variables de entorno
//!
//! Toda la configuración sale del entorno (o de un `.env` cargado con dotenvy).
//! Ningún secreto vive en el código.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use super::database::DatabaseConfig;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Almacén usado por la aplicación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Catálogo de demostración en memoria, sin base de datos
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(other.to_string()),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub store_backend: StoreBackend,
    pub database: Option<DatabaseConfig>,
    pub run_migrations: bool,
}

impl Default for EnvironmentConfig {
    /// Valores de desarrollo con el almacén en memoria
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3001,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            store_backend: StoreBackend::Memory,
            database: None,
            run_migrations: false,
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración desde cualquier fuente clave/valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let database_url = get("DATABASE_URL");
        let store_backend = match get("STORE_BACKEND") {
            Some(value) => value.parse().map_err(|value| ConfigError::Invalid {
                name: "STORE_BACKEND",
                value,
            })?,
            None if database_url.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };

        let database = match (store_backend, database_url) {
            (StoreBackend::Postgres, None) => return Err(ConfigError::Missing("DATABASE_URL")),
            (_, Some(url)) => Some(DatabaseConfig {
                url,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 20)?,
                min_connections: parse_or("DATABASE_MIN_CONNECTIONS", get("DATABASE_MIN_CONNECTIONS"), 1)?,
                connect_timeout: Duration::from_secs(parse_or(
                    "DATABASE_CONNECT_TIMEOUT_SECS",
                    get("DATABASE_CONNECT_TIMEOUT_SECS"),
                    30,
                )?),
                ..DatabaseConfig::default()
            }),
            (StoreBackend::Memory, None) => None,
        };

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            host: get("HOST").unwrap_or(defaults.host),
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            store_backend,
            database,
            run_migrations: parse_or("RUN_MIGRATIONS", get("RUN_MIGRATIONS"), false)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// CORS abierto cuando no hay orígenes o se usa `*`
    pub fn cors_is_permissive(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<EnvironmentConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        EnvironmentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_use_memory_store() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.database.is_none());
        assert!(config.cors_is_permissive());
        assert!(config.is_development());
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/configurator"),
            ("DATABASE_MAX_CONNECTIONS", "8"),
            ("CORS_ORIGINS", "http://localhost:3000, https://configure.example.com"),
        ])
        .unwrap();

        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(!config.cors_is_permissive());

        let database = config.database.as_ref().unwrap();
        assert_eq!(database.max_connections, 8);
        assert_eq!(database.min_connections, 1);
    }

    #[test]
    fn test_invalid_and_missing_values() {
        assert_eq!(
            config(&[("PORT", "eighty")]).unwrap_err(),
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".into()
            }
        );
        assert_eq!(
            config(&[("STORE_BACKEND", "postgres")]).unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
    }
}
