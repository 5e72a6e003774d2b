//! Test utilities for integration tests.
//!
//! Provides an in-memory [`ObjectStore`] that tracks fetches and stream
//! releases, plus helpers for driving the router.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use tokio::sync::Notify;
use tower::ServiceExt;

use s3_gateway::error::{FetchError, StreamError};
use s3_gateway::io::{ObjectBody, ObjectMetadata, ObjectStore, StoredObject};
use s3_gateway::server::ObjectPath;
use s3_gateway::{create_router, RouterConfig};

// =============================================================================
// Release Tracking
// =============================================================================

/// Increments a counter when dropped, standing in for a backend read handle.
struct ReleaseGuard(Arc<AtomicUsize>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Attach a release guard to a stream so it is dropped with the stream.
fn tracked<S>(inner: S, released: &Arc<AtomicUsize>) -> ObjectBody
where
    S: futures::Stream<Item = Result<Bytes, StreamError>> + Send + 'static,
{
    let guard = ReleaseGuard(Arc::clone(released));
    inner
        .map(move |chunk| {
            let _held = &guard;
            chunk
        })
        .boxed()
}

// =============================================================================
// Mock Object Store
// =============================================================================

#[derive(Clone)]
enum MockBody {
    /// Whole payload split into fixed chunks
    Data { data: Bytes, chunk_size: usize },
    /// Lazily generated payload of `size` bytes
    Generated { size: u64, chunk_size: usize },
    /// Some chunks followed by a stream error
    FailAfter { data: Bytes },
}

#[derive(Clone)]
struct MockObject {
    metadata: ObjectMetadata,
    body: MockBody,
}

/// An in-memory object store keyed by `region/bucket/key`.
#[derive(Clone, Default)]
pub struct MockObjectStore {
    objects: HashMap<String, MockObject>,
    gates: HashMap<String, Arc<Notify>>,
    fetch_count: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
    last_path: Arc<std::sync::Mutex<Option<ObjectPath>>>,
}

fn store_key(region: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", region, bucket, key)
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object with the given metadata and contents.
    pub fn with_object(
        mut self,
        region: &str,
        bucket: &str,
        key: &str,
        metadata: ObjectMetadata,
        data: impl Into<Bytes>,
    ) -> Self {
        self.objects.insert(
            store_key(region, bucket, key),
            MockObject {
                metadata,
                body: MockBody::Data {
                    data: data.into(),
                    chunk_size: 4096,
                },
            },
        );
        self
    }

    /// Add an object whose contents are generated chunk by chunk.
    pub fn with_generated_object(
        mut self,
        region: &str,
        bucket: &str,
        key: &str,
        size: u64,
        chunk_size: usize,
    ) -> Self {
        self.objects.insert(
            store_key(region, bucket, key),
            MockObject {
                metadata: ObjectMetadata {
                    content_length: Some(size),
                    content_type: Some("application/octet-stream".to_string()),
                    ..Default::default()
                },
                body: MockBody::Generated { size, chunk_size },
            },
        );
        self
    }

    /// Add an object whose stream fails after yielding `data`.
    pub fn with_failing_object(
        mut self,
        region: &str,
        bucket: &str,
        key: &str,
        data: impl Into<Bytes>,
    ) -> Self {
        self.objects.insert(
            store_key(region, bucket, key),
            MockObject {
                metadata: ObjectMetadata {
                    content_type: Some("text/plain".to_string()),
                    ..Default::default()
                },
                body: MockBody::FailAfter { data: data.into() },
            },
        );
        self
    }

    /// Make fetches of this object wait until the returned gate is notified.
    pub fn with_gate(mut self, region: &str, bucket: &str, key: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates
            .insert(store_key(region, bucket, key), Arc::clone(&gate));
        (self, gate)
    }

    /// Number of fetches issued against the store.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Number of stream handles released.
    pub fn released_count(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// The path passed to the most recent fetch.
    pub fn last_path(&self) -> Option<ObjectPath> {
        self.last_path.lock().unwrap().clone()
    }

    fn open_body(&self, body: MockBody) -> ObjectBody {
        match body {
            MockBody::Data { data, chunk_size } => {
                let chunks: Vec<Result<Bytes, StreamError>> = (0..data.len())
                    .step_by(chunk_size.max(1))
                    .map(|start| {
                        let end = (start + chunk_size).min(data.len());
                        Ok(data.slice(start..end))
                    })
                    .collect();
                tracked(stream::iter(chunks), &self.released)
            }
            MockBody::Generated { size, chunk_size } => {
                let generated = stream::unfold(size, move |remaining| async move {
                    if remaining == 0 {
                        return None;
                    }
                    let len = remaining.min(chunk_size as u64);
                    let chunk = Bytes::from(vec![b'x'; len as usize]);
                    Some((Ok(chunk), remaining - len))
                });
                tracked(generated, &self.released)
            }
            MockBody::FailAfter { data } => {
                let chunks = vec![
                    Ok(data),
                    Err(StreamError("connection reset by backend".to_string())),
                ];
                tracked(stream::iter(chunks), &self.released)
            }
        }
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn fetch_object(&self, path: &ObjectPath) -> Result<StoredObject, FetchError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        *self.last_path.lock().unwrap() = Some(path.clone());

        let key = store_key(path.region(), path.bucket(), path.key());

        if let Some(gate) = self.gates.get(&key) {
            gate.notified().await;
        }

        match self.objects.get(&key) {
            Some(object) => Ok(StoredObject::new(
                object.metadata.clone(),
                self.open_body(object.body.clone()),
            )),
            None => {
                // A handle acquired while probing must still be released once
                let probe = ReleaseGuard(Arc::clone(&self.released));
                drop(probe);
                Err(FetchError::NotFound(path.to_string()))
            }
        }
    }
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Build a router over the store with tracing disabled.
pub fn router_for(store: &MockObjectStore) -> Router {
    create_router(store.clone(), RouterConfig::new().with_tracing(false))
}

/// Issue a GET for `uri` against the router.
pub async fn get(router: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap()
}
