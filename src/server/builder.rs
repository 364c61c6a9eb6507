//! ServerBuilder for fluent API to build HTTP servers

use super::host::ServerHost;
use super::router::build_router;
use crate::config::AppConfig;
use crate::core::{Clock, SystemClock};
use crate::storage::Stores;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the rental HTTP server
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::load()?;
/// let stores = Stores::open(&config.storage).await?;
///
/// ServerBuilder::new()
///     .with_config(config)
///     .with_stores(stores)
///     .serve("0.0.0.0:5050")
///     .await?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    stores: Option<Stores>,
    clock: Option<Arc<dyn Clock>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            stores: None,
            clock: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the stores (required)
    pub fn with_stores(mut self, stores: Stores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Replace the wall clock, e.g. with a [`FixedClock`](crate::core::FixedClock) in tests
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Merge extra routes into the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Assemble the host without building a router
    pub fn build_host(mut self) -> Result<ServerHost> {
        let stores = self
            .stores
            .take()
            .ok_or_else(|| anyhow::anyhow!("Stores are required. Call .with_stores()"))?;
        let clock = self
            .clock
            .take()
            .unwrap_or_else(|| Arc::new(SystemClock));

        Ok(ServerHost::new(self.config, stores, clock))
    }

    /// Build the REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = self.build_host()?;
        Ok(build_router(host.app_state(), custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}


/// Wait for shutdown signal (SIGTERM or Ctrl+C)
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
            Ok(mut stream) => {
                stream.recv().await;
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
