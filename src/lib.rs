//! # S3 Gateway
//!
//! A stateless HTTP gateway that exposes objects in S3 (or S3-compatible
//! storage) as plain HTTP GET resources.
//!
//! A request for `/{region}/{bucket}/{key...}` resolves credentials, fetches
//! the object from the given region and streams its bytes back, forwarding
//! `Content-Disposition`, `Content-Encoding`, `Content-Language`,
//! `Content-Length`, `Content-Range` and `Content-Type`. Any failure before
//! streaming starts is answered with an empty `404 Not Found`.
//!
//! ## Architecture
//!
//! - [`server`] - Path resolver, axum handlers, streaming body and routes
//! - [`io`] - Object store abstraction and the S3 implementation
//! - [`credentials`] - Ordered credential provider chain
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use s3_gateway::{create_router, CredentialSettings, RouterConfig, S3ObjectStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = S3ObjectStore::new(CredentialSettings::default(), None);
//!     let router = create_router(store, RouterConfig::default());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod io;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use credentials::{CredentialChain, CredentialProvider, CredentialSettings, Credentials};
pub use error::{CredentialError, FetchError, GatewayError, PathError, StreamError};
pub use io::{ObjectBody, ObjectMetadata, ObjectStore, S3ObjectStore, StoredObject};
pub use server::{create_router, resolve, AppState, ObjectPath, RouterConfig};
