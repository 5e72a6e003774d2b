//! Credential resolution for backend fetches.
//!
//! Credentials are resolved from an ordered chain of providers, the first
//! provider yielding credentials wins:
//!
//! ```text
//! ┌─────────────────────┐   ┌─────────────────────┐   ┌──────────────────────────┐
//! │ EnvironmentProvider │ → │ ProfileFileProvider │ → │ InstanceMetadataProvider │
//! │  (AWS_ACCESS_KEY_*) │   │ (~/.aws/credentials)│   │  (IMDS, configurable)    │
//! └─────────────────────┘   └─────────────────────┘   └──────────────────────────┘
//! ```
//!
//! A fresh chain is built for every request; nothing is cached between
//! requests.

mod chain;
mod providers;

pub use aws_credential_types::Credentials;
pub use chain::{CredentialChain, CredentialProvider};
pub use providers::{
    imds_endpoint, CredentialSettings, EnvironmentProvider, InstanceMetadataProvider,
    ProfileFileProvider, DEFAULT_METADATA_URL,
};
