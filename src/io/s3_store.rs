use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
use aws_sdk_s3::Client;
use futures::{StreamExt, TryStreamExt};
use tokio_util::io::ReaderStream;
use tracing::debug;

use super::object_store::{ObjectMetadata, ObjectStore, StoredObject, STREAM_CHUNK_SIZE};
use crate::credentials::{CredentialChain, CredentialSettings};
use crate::error::{FetchError, StreamError};
use crate::server::path::ObjectPath;

/// S3-backed implementation of [`ObjectStore`].
///
/// Holds an immutable base client configuration built once at startup. Each
/// fetch resolves credentials through a fresh [`CredentialChain`] and builds
/// a client scoped to the requested region.
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    base_config: aws_sdk_s3::Config,
    credentials: CredentialSettings,
}

impl S3ObjectStore {
    /// Create a store with optional custom endpoint.
    ///
    /// Use a custom endpoint for S3-compatible services like MinIO; path-style
    /// addressing is forced in that case.
    pub fn new(credentials: CredentialSettings, endpoint_url: Option<&str>) -> Self {
        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            base_config: builder.build(),
            credentials,
        }
    }

    /// Get the credential settings used for every fetch.
    pub fn credential_settings(&self) -> &CredentialSettings {
        &self.credentials
    }

    /// Build a client for one request.
    fn client_for(&self, region: &str, credentials: Credentials) -> Client {
        let config = self
            .base_config
            .to_builder()
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .build();
        Client::from_conf(config)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn fetch_object(&self, path: &ObjectPath) -> Result<StoredObject, FetchError> {
        let credentials = CredentialChain::standard(&self.credentials)
            .resolve()
            .await?;

        let client = self.client_for(path.region(), credentials);

        let output = client
            .get_object()
            .bucket(path.bucket())
            .key(path.key())
            .send()
            .await
            .map_err(|e| classify_get_object_error(&e, path))?;

        debug!(path = %path, "Fetched object");
        Ok(into_stored_object(output))
    }
}

/// Map a `GetObject` failure into a [`FetchError`].
pub fn classify_get_object_error<R>(
    err: &SdkError<GetObjectError, R>,
    path: &ObjectPath,
) -> FetchError
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    if let Some(service_err) = err.as_service_error() {
        if service_err.is_no_such_key() {
            return FetchError::NotFound(path.to_string());
        }
    }

    match err {
        SdkError::ServiceError(service) => {
            let message = DisplayErrorContext(err).to_string();
            match service.err().code() {
                Some("NoSuchBucket") | Some("NotFound") => FetchError::NotFound(path.to_string()),
                Some("AccessDenied") | Some("Forbidden") => FetchError::AccessDenied(message),
                _ => FetchError::Backend(message),
            }
        }
        _ => FetchError::Backend(DisplayErrorContext(err).to_string()),
    }
}

/// Split a `GetObject` response into forwarded metadata and a bounded-buffer
/// body stream.
pub fn into_stored_object(output: GetObjectOutput) -> StoredObject {
    let metadata = ObjectMetadata {
        content_disposition: output.content_disposition().map(str::to_owned),
        content_encoding: output.content_encoding().map(str::to_owned),
        content_language: output.content_language().map(str::to_owned),
        content_length: output
            .content_length()
            .and_then(|len| u64::try_from(len).ok()),
        content_range: output.content_range().map(str::to_owned),
        content_type: output.content_type().map(str::to_owned),
    };

    let reader = output.body.into_async_read();
    let body = ReaderStream::with_capacity(reader, STREAM_CHUNK_SIZE)
        .map_err(StreamError::from)
        .boxed();

    StoredObject::new(metadata, body)
}
