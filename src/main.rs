//! Binary entry point for the invoicing dashboard service

use factura::config::ServerConfig;
use factura::server::{AppState, build_router};
use factura::storage::{self, InMemoryStore};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = ServerConfig::load()?;
    let state = build_state(&config).await?;
    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind).await?;
    tracing::info!("Server listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Pick and prepare a storage backend from the configuration.
async fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    #[cfg(feature = "postgres")]
    if let Some(url) = &config.database_url {
        use factura::storage::postgres::{self, PostgresStore};

        let store = PostgresStore::connect(url).await?;
        postgres::ensure_schema(store.pool()).await?;
        tracing::info!("using the PostgreSQL store");
        return Ok(AppState::from_store(store, config));
    }

    #[cfg(not(feature = "postgres"))]
    if config.database_url.is_some() {
        tracing::warn!(
            "database_url is set but the postgres feature is disabled; using the in-memory store"
        );
    }

    let store = InMemoryStore::new();
    if config.seed_demo_data {
        storage::seed::populate(&store).await?;
    }
    tracing::info!("using the in-memory store");
    Ok(AppState::from_store(store, config))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
