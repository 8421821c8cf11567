use std::{net::SocketAddr, sync::Arc};

use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use service::identity::{IdentityVerifier, JwtIdentityVerifier};
use service::store::Repositories;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

/// Connect the configured store, applying migrations when asked to.
pub async fn open_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let db = models::db::connect(&config.database).await?;
            if config.database.run_migrations {
                migration::Migrator::up(&db, None).await?;
                info!("database migrations applied");
            }
            Ok(Repositories::seaorm(db))
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on shutdown");
            Ok(Repositories::memory())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "ctrl_c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining connections");
}

/// Public entry: build the app and run the HTTP server until a shutdown signal.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let repos = open_repositories(&config).await?;
    let identity: Arc<dyn IdentityVerifier> = Arc::new(JwtIdentityVerifier::from_config(&config.auth)?);
    let app = routes::build_router(AppState::new(repos, identity));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, backend = ?config.storage.backend, "home hero api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
