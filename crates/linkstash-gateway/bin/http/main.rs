mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use linkstash_core::AliasStore;
use linkstash_gateway::{App, AppState};
use linkstash_storage::{InMemoryStore, PostgresConfig, PostgresStore};
use tokio::net::TcpListener;
use tracing::info;

use crate::cli::{Cli, StorageBackendArg};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();

    linkstash_telemetry::init(config.log_format.into())?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting linkstash gateway"
    );

    let store = build_store(&config).await?;

    let mut state = AppState::new(store);
    if let Some(base_url) = &config.public_base_url {
        state = state.with_public_base_url(base_url.as_str());
    }

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn build_store(config: &Cli) -> anyhow::Result<Arc<dyn AliasStore>> {
    match config.storage {
        StorageBackendArg::InMemory => {
            let store: Arc<dyn AliasStore> = Arc::new(
                InMemoryStore::new().max_generation_attempts(config.max_generation_attempts),
            );
            Ok(store)
        }
        StorageBackendArg::Postgres => {
            let dsn = config
                .postgres_dsn
                .clone()
                .context("postgres dsn is required when storage backend is postgres")?;
            let postgres = PostgresConfig::builder()
                .dsn(dsn)
                .max_connections(config.postgres_max_connections)
                .acquire_timeout(Duration::from_secs(config.postgres_acquire_timeout_secs))
                .max_generation_attempts(config.max_generation_attempts)
                .build();
            let store = PostgresStore::connect(&postgres)
                .await
                .context("failed to initialize postgres storage")?;
            let store: Arc<dyn AliasStore> = Arc::new(store);
            Ok(store)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
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

    info!("shutdown signal received");
}
