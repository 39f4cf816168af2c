use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use connsync::{
    config::{ObservabilityConfig, Settings},
    observability::init_tracing,
    registry::HttpConnectionRegistry,
    secrets::SecretsAgentClient,
    services::{RotationEvent, RotationHandler},
    Error, Result, APP_NAME, VERSION,
};

/// Pushes a rotated OAuth client secret into an event-routing connection.
#[derive(Debug, Parser)]
#[command(name = "connsync", version, about)]
struct Cli {
    /// Path to the rotation event JSON; reads stdin when omitted
    #[arg(long, value_name = "PATH")]
    event_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    init_tracing(&ObservabilityConfig::from_env())?;

    info!(app_name = APP_NAME, version = VERSION, "Starting connsync rotation bridge");

    // Fail fast: a misconfigured deployment dies here, not on the first event.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Unable to configure bridge services");
            return Err(e);
        }
    };
    info!(
        connection_name = %settings.sync.connection_name,
        secret_id = %settings.sync.secret_id,
        secrets_endpoint = %settings.secret_store.endpoint,
        registry_endpoint = %settings.registry.endpoint,
        max_attempts = settings.retry.max_attempts,
        "Loaded configuration from environment"
    );

    let secrets = Arc::new(SecretsAgentClient::new(&settings.secret_store)?);
    let registry = Arc::new(HttpConnectionRegistry::new(&settings.registry)?);
    let handler =
        RotationHandler::new(secrets, registry, settings.sync.clone(), settings.retry.policy());

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, cancelling in-flight work");
                cancel.cancel();
            }
        });
    }

    let event = read_event(cli.event_file.as_deref())?;

    if let Err(e) = handler.handle(&event, &cancel).await {
        error!(error = %e, "Rotation synchronization failed");
        return Err(e);
    }

    Ok(())
}

/// Read the rotation event from a file or stdin.
fn read_event(path: Option<&Path>) -> Result<RotationEvent> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read event file {}: {}", path.display(), e))
        })?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| Error::config(format!("Failed to read event from stdin: {}", e)))?;
            buffer
        }
    };

    serde_json::from_str(&raw)
        .map_err(|e| Error::config(format!("Invalid rotation event payload: {}", e)))
}
