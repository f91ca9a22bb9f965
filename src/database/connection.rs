//! Conexión a PostgreSQL
//!
//! Pool de conexiones y migraciones embebidas (`migrations/`).

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Abrir el pool con la configuración dada
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        tracing::info!("🔌 Conectando a PostgreSQL en {}", mask_database_url(&config.url));

        let pool = config
            .create_pool()
            .await
            .with_context(|| format!("connecting to {}", mask_database_url(&config.url)))?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .context("database health check failed")?;

        tracing::info!("✅ Conexión a PostgreSQL establecida");
        Ok(Self { pool })
    }

    /// Ejecutar las migraciones pendientes
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("running database migrations")?;

        tracing::info!("✅ Migraciones aplicadas");
        Ok(())
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    match url.rfind('@') {
        Some(at_pos) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
