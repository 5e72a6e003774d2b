//! Backend access layer.
//!
//! [`ObjectStore`] is the seam between the HTTP layer and the storage
//! backend. [`S3ObjectStore`] talks to S3 (or an S3-compatible service);
//! tests plug in an in-memory store.

mod object_store;
mod s3_store;

pub use object_store::{ObjectBody, ObjectMetadata, ObjectStore, StoredObject, STREAM_CHUNK_SIZE};
pub use s3_store::{classify_get_object_error, into_stored_object, S3ObjectStore};
