use thiserror::Error;

/// Errors produced while turning a request path into an object address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path does not split into region, bucket and key
    #[error("Malformed path: expected /{{region}}/{{bucket}}/{{key}}, got {0:?}")]
    Malformed(String),

    /// One of the three components is empty
    #[error("Region, bucket and key should not be empty: {0:?}")]
    EmptyComponent(String),

    /// Request path is not valid percent-encoded UTF-8
    #[error("Path is not valid UTF-8 after percent-decoding: {0:?}")]
    InvalidEncoding(String),
}

/// Errors raised while resolving credentials for a backend fetch.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    /// Every provider in the chain came back empty
    #[error("No credential provider yielded credentials (tried: {tried})")]
    NoProvider { tried: String },
}

/// Errors from fetching an object from the backend.
///
/// The HTTP layer deliberately collapses every variant into 404 Not Found,
/// so the distinction only shows up in logs.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Object or bucket does not exist
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Backend refused access to the object
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Credentials could not be resolved for the request
    #[error("Credential error: {0}")]
    Credentials(#[from] CredentialError),

    /// Any other backend or transport failure
    #[error("Backend error: {0}")]
    Backend(String),
}

impl FetchError {
    /// Short identifier used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::NotFound(_) => "not_found",
            FetchError::AccessDenied(_) => "access_denied",
            FetchError::Credentials(_) => "credentials",
            FetchError::Backend(_) => "backend",
        }
    }
}

/// Failure while copying object bytes after the response head was sent.
#[derive(Debug, Clone, Error)]
#[error("Stream error: {0}")]
pub struct StreamError(pub String);

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        StreamError(err.to_string())
    }
}

/// Every failure the request handler can hit before streaming starts.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
