//! HTTP request handlers for the gateway.
//!
//! # Endpoints
//!
//! - `GET /{region}/{bucket}/{key...}` - Stream an object from the backend
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::body::TransferBody;
use super::path::{decode_request_path, resolve};
use crate::error::{FetchError, GatewayError};
use crate::io::{ObjectMetadata, ObjectStore, StoredObject};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the object store.
///
/// The store is constructed once per process and is immutable; handlers only
/// borrow it.
pub struct AppState<S: ObjectStore> {
    /// Backend used to fetch objects
    pub store: Arc<S>,
}

impl<S: ObjectStore> AppState<S> {
    /// Create a new application state with the given store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a new application state from an already shared store.
    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: ObjectStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert GatewayError to HTTP response.
///
/// Every failure becomes an empty `404 Not Found`: a malformed path, a missing
/// object, denied access and an unreachable backend all look the same to the
/// client. The cause is only visible in the logs.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            GatewayError::Path(err) => {
                info!(error_type = "malformed_path", "Cannot parse path: {}", err);
            }
            GatewayError::Fetch(err) if matches!(err, FetchError::NotFound(_)) => {
                info!(error_type = err.kind(), "Cannot get object: {}", err);
            }
            GatewayError::Fetch(err) => {
                warn!(error_type = err.kind(), "Cannot get object: {}", err);
            }
        }

        StatusCode::NOT_FOUND.into_response()
    }
}

// =============================================================================
// Header Translation
// =============================================================================

/// Translate object metadata into response headers.
///
/// Only fields the backend supplied are emitted; absent fields produce no
/// header at all. A value that is not a legal header value is skipped.
pub fn metadata_headers(metadata: &ObjectMetadata) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let text_fields = [
        (header::CONTENT_DISPOSITION, &metadata.content_disposition),
        (header::CONTENT_ENCODING, &metadata.content_encoding),
        (header::CONTENT_LANGUAGE, &metadata.content_language),
        (header::CONTENT_RANGE, &metadata.content_range),
        (header::CONTENT_TYPE, &metadata.content_type),
    ];

    for (name, value) in text_fields {
        if let Some(value) = value {
            insert_header(&mut headers, name, value);
        }
    }

    if let Some(length) = metadata.content_length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    }

    headers
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => {
            warn!(header = %name, value, "Skipping metadata value that is not a valid header");
        }
    }
}

/// Build the `200 OK` response for a fetched object.
///
/// Headers are fully populated before the body stream is handed over, so
/// `Content-Length` is in place ahead of the first body byte.
pub fn object_response(object: StoredObject, raw_path: &str) -> Response {
    let StoredObject { metadata, body } = object;
    let headers = metadata_headers(&metadata);

    let mut response = Response::new(Body::from_stream(TransferBody::new(body, raw_path)));
    *response.status_mut() = StatusCode::OK;
    *response.headers_mut() = headers;
    response
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle object requests.
///
/// # Endpoint
///
/// `GET /{region}/{bucket}/{key...}`
///
/// The key is everything after the bucket and may contain slashes.
///
/// # Response
///
/// - `200 OK`: Object bytes, with `Content-Disposition`, `Content-Encoding`,
///   `Content-Language`, `Content-Length`, `Content-Range` and `Content-Type`
///   copied from the object when present
/// - `404 Not Found`: Malformed path or any backend failure (empty body)
pub async fn object_handler<S: ObjectStore + 'static>(
    State(state): State<AppState<S>>,
    uri: Uri,
) -> Result<Response, GatewayError> {
    let raw_path = uri.path();
    info!(path = raw_path, "Downloading {}", raw_path);

    let decoded = decode_request_path(raw_path)?;
    let path = resolve(&decoded)?;
    debug!(
        region = path.region(),
        bucket = path.bucket(),
        key = path.key(),
        "Resolved object path"
    );

    let object = state.store.fetch_object(&path).await?;

    Ok(object_response(object, raw_path))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
