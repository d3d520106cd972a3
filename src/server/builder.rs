//! ServerBuilder for fluent API to build the HTTP server

use super::handlers::AppState;
use super::router::build_router;
use crate::core::{OrderEntry, OrderStore};
use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder wiring an [`OrderStore`] into the REST surface
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_store(InMemoryOrderStore::new())
///     .serve("127.0.0.1:8501".parse()?)
///     .await?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    store: Option<Arc<dyn OrderStore>>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the order store (required)
    pub fn with_store(mut self, store: impl OrderStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Build the workflow the handlers call into
    pub fn build_entry(&mut self) -> Result<Arc<OrderEntry>> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("OrderStore is required. Call .with_store()"))?;
        Ok(Arc::new(OrderEntry::new(store)))
    }

    /// Build the REST router without touching the store
    pub fn build(mut self) -> Result<Router> {
        let entry = self.build_entry()?;
        Ok(build_router(AppState::new(entry)))
    }

    /// Ensure the schema, then serve with graceful shutdown
    ///
    /// Schema initialization failure is fatal: no request is accepted.
    pub async fn serve(mut self, addr: SocketAddr) -> Result<()> {
        let entry = self.build_entry()?;

        entry.ensure_schema().await.inspect_err(|e| {
            tracing::error!(error = %e, "Database initialization failed");
        })?;

        let app = build_router(AppState::new(entry));
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
