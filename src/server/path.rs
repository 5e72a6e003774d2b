//! Request path resolution.
//!
//! Turns an inbound path of the form `/{region}/{bucket}/{key...}` into an
//! [`ObjectPath`]. The key is everything after the bucket segment, slashes
//! included, and is passed through untouched.

use std::borrow::Cow;
use std::fmt;

use crate::error::PathError;

/// Address of a single object in the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPath {
    region: String,
    bucket: String,
    key: String,
}

impl ObjectPath {
    /// Build a path from its parts, rejecting empty components.
    pub fn new(
        region: impl Into<String>,
        bucket: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self, PathError> {
        let (region, bucket, key) = (region.into(), bucket.into(), key.into());
        if region.is_empty() || bucket.is_empty() || key.is_empty() {
            return Err(PathError::EmptyComponent(format!(
                "/{}/{}/{}",
                region, bucket, key
            )));
        }
        Ok(Self {
            region,
            bucket,
            key,
        })
    }

    /// Get the region.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Get the object key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{} ({})", self.bucket, self.key, self.region)
    }
}

/// Resolve a request path into region, bucket and key.
///
/// Strips a single leading `/` and splits the rest into at most three
/// segments. No other normalization is applied: trailing slashes, case and
/// escaping are all preserved in the key.
pub fn resolve(raw_path: &str) -> Result<ObjectPath, PathError> {
    let trimmed = raw_path.strip_prefix('/').unwrap_or(raw_path);
    let mut segments = trimmed.splitn(3, '/');

    match (segments.next(), segments.next(), segments.next()) {
        (Some(region), Some(bucket), Some(key)) => ObjectPath::new(region, bucket, key),
        _ => Err(PathError::Malformed(raw_path.to_string())),
    }
}

/// Percent-decode the request path once, the way the HTTP layer hands it over.
pub fn decode_request_path(raw_path: &str) -> Result<Cow<'_, str>, PathError> {
    urlencoding::decode(raw_path).map_err(|_| PathError::InvalidEncoding(raw_path.to_string()))
}
