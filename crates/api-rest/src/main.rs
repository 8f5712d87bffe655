//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API on its own, without the static front end or the browser launch.
//!
//! ## Intended use
//! Useful for development and debugging against the Swagger UI. The workspace's main
//! `medform-run` binary serves the same router together with the front end.

use api_rest::{router, AppState};
use medform_core::{convert_timeout_from_env_value, CoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the MedForm REST API server
///
/// # Environment Variables
/// - `MEDFORM_ADDR`: Server address (default: "127.0.0.1:5000")
/// - `MEDFORM_DATA_DIR`: Base directory for documents, templates and signatures (default: ".")
/// - `MEDFORM_SOFFICE_PATH`: Explicit headless office executable (optional)
/// - `MEDFORM_CONVERT_TIMEOUT_SECS`: PDF converter timeout in seconds (default: 60)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the storage directories cannot be created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("medform_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDFORM_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into());
    let data_dir = std::env::var("MEDFORM_DATA_DIR").unwrap_or_else(|_| ".".into());
    let soffice_path = std::env::var("MEDFORM_SOFFICE_PATH").ok().map(PathBuf::from);
    let convert_timeout =
        convert_timeout_from_env_value(std::env::var("MEDFORM_CONVERT_TIMEOUT_SECS").ok())?;

    let cfg = Arc::new(CoreConfig::new(
        PathBuf::from(data_dir),
        convert_timeout,
        soffice_path,
    )?);

    tracing::info!("-- Starting MedForm REST API on {}", addr);

    let app = router(AppState::new(cfg)?, None);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
