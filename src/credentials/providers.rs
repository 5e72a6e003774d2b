//! Concrete credential providers backed by the AWS SDK.

use async_trait::async_trait;
use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::imds::credentials::ImdsCredentialsProvider;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use tracing::{debug, warn};

use super::chain::CredentialProvider;

/// Default instance metadata service address.
pub const DEFAULT_METADATA_URL: &str = "http://169.254.169.254:80/latest";

/// Settings shared by every credential chain built in this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSettings {
    /// Instance metadata service URL (may include the `/latest` suffix)
    pub metadata_url: String,
}

impl CredentialSettings {
    /// Create settings with a custom instance metadata URL.
    pub fn new(metadata_url: impl Into<String>) -> Self {
        Self {
            metadata_url: metadata_url.into(),
        }
    }
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self::new(DEFAULT_METADATA_URL)
    }
}

/// Normalize a metadata URL into the base endpoint the IMDS client expects.
///
/// The client appends `/latest/...` itself, so a trailing `/latest` (and any
/// trailing slash) is removed.
pub fn imds_endpoint(metadata_url: &str) -> &str {
    let trimmed = metadata_url.trim_end_matches('/');
    trimmed.strip_suffix("/latest").unwrap_or(trimmed)
}

async fn query<P: ProvideCredentials>(name: &'static str, provider: &P) -> Option<Credentials> {
    match provider.provide_credentials().await {
        Ok(credentials) => Some(credentials),
        Err(e) => {
            debug!(provider = name, error = %e, "Credential lookup failed");
            None
        }
    }
}

/// Credentials from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
/// `AWS_SESSION_TOKEN`.
#[derive(Debug)]
pub struct EnvironmentProvider {
    inner: EnvironmentVariableCredentialsProvider,
}

impl EnvironmentProvider {
    pub fn new() -> Self {
        Self {
            inner: EnvironmentVariableCredentialsProvider::new(),
        }
    }
}

impl Default for EnvironmentProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for EnvironmentProvider {
    fn name(&self) -> &'static str {
        "environment"
    }

    async fn try_resolve(&self) -> Option<Credentials> {
        query(self.name(), &self.inner).await
    }
}

/// Credentials from the shared credentials and config files, default profile.
#[derive(Debug)]
pub struct ProfileFileProvider {
    inner: ProfileFileCredentialsProvider,
}

impl ProfileFileProvider {
    pub fn new() -> Self {
        Self {
            inner: ProfileFileCredentialsProvider::builder().build(),
        }
    }
}

impl Default for ProfileFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for ProfileFileProvider {
    fn name(&self) -> &'static str {
        "profile"
    }

    async fn try_resolve(&self) -> Option<Credentials> {
        query(self.name(), &self.inner).await
    }
}

/// Role credentials from the instance metadata service.
///
/// An endpoint that cannot be parsed disables the provider rather than
/// failing the whole chain.
#[derive(Debug)]
pub struct InstanceMetadataProvider {
    inner: Option<ImdsCredentialsProvider>,
}

impl InstanceMetadataProvider {
    pub fn new(settings: &CredentialSettings) -> Self {
        let endpoint = imds_endpoint(&settings.metadata_url);
        let inner = match aws_config::imds::Client::builder().endpoint(endpoint) {
            Ok(builder) => Some(
                ImdsCredentialsProvider::builder()
                    .imds_client(builder.build())
                    .build(),
            ),
            Err(e) => {
                warn!(endpoint, error = %e, "Invalid instance metadata endpoint");
                None
            }
        };
        Self { inner }
    }
}

#[async_trait]
impl CredentialProvider for InstanceMetadataProvider {
    fn name(&self) -> &'static str {
        "instance_metadata"
    }

    async fn try_resolve(&self) -> Option<Credentials> {
        match &self.inner {
            Some(inner) => query(self.name(), inner).await,
            None => None,
        }
    }
}
