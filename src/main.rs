//! S3 Gateway - serve S3 objects over plain HTTP.
//!
//! This binary parses the command line, sets up logging and runs the server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use s3_gateway::{create_router, Config, RouterConfig, S3ObjectStore};

#[tokio::main]
async fn main() -> ExitCode {
    // Exits with a usage error when the port is missing
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Metadata URL: {}", config.metadata_url);
    if let Some(ref endpoint) = config.endpoint_url {
        info!("  S3 endpoint: {}", endpoint);
    }

    let store = S3ObjectStore::new(config.credential_settings(), config.endpoint_url.as_deref());
    let router = create_router(store, RouterConfig::new().with_tracing(!config.no_tracing));

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);
    info!("  curl http://{}/<region>/<bucket>/<key>", addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "s3_gateway=debug,tower_http=debug"
    } else {
        "s3_gateway=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
