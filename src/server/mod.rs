//! HTTP server layer for the gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │              GET /{region}/{bucket}/{key...}                    │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌────────┐  │
//! │  │    path     │  │  handlers   │  │    body     │  │ routes │  │
//! │  │ (resolver)  │  │ (requests)  │  │ (streaming) │  │        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  └────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod body;
pub mod handlers;
pub mod path;
pub mod routes;

pub use body::TransferBody;
pub use handlers::{
    health_handler, metadata_headers, object_handler, object_response, AppState, HealthResponse,
};
pub use path::{decode_request_path, resolve, ObjectPath};
pub use routes::{create_router, RouterConfig};
