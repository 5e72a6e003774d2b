//! Configuration management for the gateway.
//!
//! Configuration comes from the command line via clap, with environment
//! variable fallbacks for the optional settings:
//!
//! - `PORT` - Positional argument, required
//! - `S3_GATEWAY_HOST` - Server bind address (default: 0.0.0.0)
//! - `AWS_METADATA_URL` - Instance metadata service URL
//!   (default: http://169.254.169.254:80/latest)
//! - `S3_GATEWAY_ENDPOINT_URL` - Custom S3 endpoint for S3-compatible services
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use s3_gateway::config::Config;
//!
//! let config = Config::parse();
//! println!("Listening on {}", config.bind_address());
//! ```

use clap::Parser;

use crate::credentials::{CredentialSettings, DEFAULT_METADATA_URL};

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// S3 Gateway - serve S3 objects over plain HTTP.
///
/// Requests of the form `GET /{region}/{bucket}/{key}` are answered with the
/// object's bytes. Any failure is reported as 404 Not Found.
#[derive(Parser, Debug, Clone)]
#[command(name = "s3-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,

    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "S3_GATEWAY_HOST")]
    pub host: String,

    /// Instance metadata service URL used for role credentials.
    #[arg(long, default_value = DEFAULT_METADATA_URL, env = "AWS_METADATA_URL")]
    pub metadata_url: String,

    /// Custom S3 endpoint URL for S3-compatible services (MinIO, etc.).
    ///
    /// If not specified, uses the regional AWS S3 endpoint of each request.
    #[arg(long, env = "S3_GATEWAY_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port must be greater than 0".to_string());
        }

        if self.metadata_url.parse::<http::Uri>().is_err() {
            return Err(format!(
                "Invalid metadata URL: {:?}. Set --metadata-url or AWS_METADATA_URL",
                self.metadata_url
            ));
        }

        if let Some(ref endpoint) = self.endpoint_url {
            if endpoint.parse::<http::Uri>().is_err() {
                return Err(format!("Invalid endpoint URL: {:?}", endpoint));
            }
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Credential settings derived from this configuration.
    pub fn credential_settings(&self) -> CredentialSettings {
        CredentialSettings::new(self.metadata_url.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
