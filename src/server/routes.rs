//! Router configuration for the gateway.
//!
//! # Route Structure
//!
//! ```text
//! /health                        - Health check
//! /{region}/{bucket}/{key...}    - Object download
//! ```
//!
//! Every other path, including `/`, reaches the object handler and is
//! answered with `404 Not Found` by the path resolver.
//!
//! # Example
//!
//! ```ignore
//! use s3_gateway::credentials::CredentialSettings;
//! use s3_gateway::io::S3ObjectStore;
//! use s3_gateway::server::{create_router, RouterConfig};
//!
//! let store = S3ObjectStore::new(CredentialSettings::default(), None);
//! let router = create_router(store, RouterConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, object_handler, AppState};
use crate::io::ObjectStore;

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self {
            enable_tracing: true,
        }
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the main application router.
///
/// The store is wrapped in shared state and handed to every request; it is
/// the only thing requests share.
pub fn create_router<S>(store: S, config: RouterConfig) -> Router
where
    S: ObjectStore + 'static,
{
    let app_state = AppState::new(store);

    // The wildcard does not match the bare root, so "/" is routed explicitly
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/", get(object_handler::<S>))
        .route("/{*path}", get(object_handler::<S>))
        .with_state(app_state);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
