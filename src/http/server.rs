//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with every mounted routing tree
//! - Wire up middleware (tracing, request timeout)
//! - Serve on a listener until the shutdown future resolves

use std::future::Future;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::service::HandlerService;
use crate::routing::Handler;

/// HTTP server hosting one or more routing trees.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server with nothing mounted.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            router: Router::new(),
            config,
        }
    }

    /// Mount `handler` at `path`. Panics on an invalid or duplicate path,
    /// as axum does.
    pub fn mount(mut self, path: &str, handler: impl Handler + 'static) -> Self {
        tracing::debug!(path = %path, "Mounting handler");
        self.router = self.router.route_service(path, HandlerService::new(handler));
        self
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(router: Router, config: &ServerConfig) -> Router {
        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = Self::build_router(self.router, &self.config);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
