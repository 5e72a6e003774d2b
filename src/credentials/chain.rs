use async_trait::async_trait;
use aws_credential_types::Credentials;
use tracing::debug;

use crate::error::CredentialError;

use super::providers::{
    CredentialSettings, EnvironmentProvider, InstanceMetadataProvider, ProfileFileProvider,
};

/// A single source of credentials.
///
/// Implementations return `None` when they have nothing to offer so the chain
/// can move on to the next provider.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Try to produce credentials.
    async fn try_resolve(&self) -> Option<Credentials>;
}

/// Ordered list of providers, queried front to back.
pub struct CredentialChain {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Build the standard chain: environment, profile files, instance metadata.
    pub fn standard(settings: &CredentialSettings) -> Self {
        Self::new()
            .with_provider(EnvironmentProvider::new())
            .with_provider(ProfileFileProvider::new())
            .with_provider(InstanceMetadataProvider::new(settings))
    }

    /// Append a provider at the lowest priority.
    pub fn with_provider(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Names of the providers in query order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolve credentials, returning the first provider's hit.
    ///
    /// Providers after the first hit are never queried.
    pub async fn resolve(&self) -> Result<Credentials, CredentialError> {
        for provider in &self.providers {
            if let Some(credentials) = provider.try_resolve().await {
                debug!(provider = provider.name(), "Resolved credentials");
                return Ok(credentials);
            }
            debug!(provider = provider.name(), "Provider yielded no credentials");
        }

        Err(CredentialError::NoProvider {
            tried: self.provider_names().join(", "),
        })
    }
}

impl Default for CredentialChain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CredentialChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialChain")
            .field("providers", &self.provider_names())
            .finish()
    }
}
