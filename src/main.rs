use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vehicle_configurator::config::{EnvironmentConfig, StoreBackend};
use vehicle_configurator::database::DatabaseConnection;
use vehicle_configurator::repositories::{InMemoryStore, Repositories};
use vehicle_configurator::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,vehicle_configurator=debug")),
        )
        .init();

    info!("🚐 Vehicle Configurator API");
    info!("===========================");

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;

    let repositories = match (config.store_backend, config.database.as_ref()) {
        (StoreBackend::Postgres, Some(database)) => {
            let connection = DatabaseConnection::connect(database).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {:#}", e);
                e
            })?;
            if config.run_migrations {
                connection.run_migrations().await?;
            }
            Repositories::postgres(connection.pool())
        }
        (StoreBackend::Postgres, None) => anyhow::bail!("DATABASE_URL must be set"),
        (StoreBackend::Memory, _) => {
            warn!("⚠️ Usando almacén en memoria con el catálogo de demostración");
            Repositories::in_memory(InMemoryStore::with_demo_catalog())
        }
    };

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_url()))?;

    let app = create_app(AppState::new(config, repositories));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health");
    info!("   GET  /api/chassis, /api/chassis/:id");
    info!("   GET  /api/bodies, /api/bodies/:id");
    info!("   GET  /api/catalog/vehicles, /api/catalog/filters");
    info!("   POST /api/configurations/sessions");
    info!("   POST /api/configurations/save, GET /api/configurations/shared/:token");
    info!("   GET  /api/pricing/sessions/:id");
    info!("   POST /api/quotes, GET /api/quotes/:id/pdf");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
