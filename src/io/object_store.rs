use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::{FetchError, StreamError};
use crate::server::path::ObjectPath;

/// Read buffer size used when copying object bytes to the client.
///
/// Memory held per in-flight request is bounded by this, regardless of
/// object size.
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Byte stream of an object's contents.
///
/// The stream owns the backend read handle; dropping it releases the handle.
pub type ObjectBody = BoxStream<'static, Result<Bytes, StreamError>>;

/// Object metadata fields that are forwarded as response headers.
///
/// Each field is `None` when the backend did not supply it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_disposition: Option<String>,
    pub content_encoding: Option<String>,
    pub content_language: Option<String>,
    pub content_length: Option<u64>,
    pub content_range: Option<String>,
    pub content_type: Option<String>,
}

/// An object returned by the backend: metadata plus a body stream.
pub struct StoredObject {
    pub metadata: ObjectMetadata,
    pub body: ObjectBody,
}

impl StoredObject {
    pub fn new(metadata: ObjectMetadata, body: ObjectBody) -> Self {
        Self { metadata, body }
    }
}

impl std::fmt::Debug for StoredObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredObject")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Trait for fetching whole objects from a storage backend.
///
/// Implementations must be stateless across calls as far as correctness is
/// concerned: every call resolves its own credentials and opens its own
/// stream.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the object at `path`.
    ///
    /// Exactly one backend request is issued per call, with no retries.
    async fn fetch_object(&self, path: &ObjectPath) -> Result<StoredObject, FetchError>;
}
