use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use medform_core::{
    ConversionPipeline, CoreConfig, convert_timeout_from_env_value, flag_from_env_value,
};

const BROWSER_DELAY: Duration = Duration::from_millis(1500);

/// Main entry point for the MedForm application
///
/// Serves the REST API and the static front end on a single loopback address, then opens
/// the front end in the default browser.
///
/// # Environment Variables
/// - `MEDFORM_ADDR`: Server address (default: "127.0.0.1:5000")
/// - `MEDFORM_DATA_DIR`: Base directory for `documents/`, `saved_templates/` and `signatures/` (default: ".")
/// - `MEDFORM_STATIC_DIR`: Front-end asset directory (optional)
/// - `MEDFORM_SOFFICE_PATH`: Explicit headless office executable (optional)
/// - `MEDFORM_CONVERT_TIMEOUT_SECS`: PDF converter timeout in seconds (default: 60)
/// - `MEDFORM_OPEN_BROWSER`: Open a browser tab after startup (default: true)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medform_run=info".parse()?)
                .add_directive("medform_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDFORM_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into());
    let data_dir = std::env::var("MEDFORM_DATA_DIR").unwrap_or_else(|_| ".".into());
    let static_dir = std::env::var("MEDFORM_STATIC_DIR").ok().map(PathBuf::from);
    let soffice_path = std::env::var("MEDFORM_SOFFICE_PATH").ok().map(PathBuf::from);
    let convert_timeout =
        convert_timeout_from_env_value(std::env::var("MEDFORM_CONVERT_TIMEOUT_SECS").ok())?;
    let open_browser = flag_from_env_value(std::env::var("MEDFORM_OPEN_BROWSER").ok(), true)?;

    let cfg = Arc::new(CoreConfig::new(
        PathBuf::from(data_dir),
        convert_timeout,
        soffice_path,
    )?);

    let pipeline = Arc::new(ConversionPipeline::from_config(&cfg));
    for status in pipeline.probe().await {
        if status.available {
            tracing::info!("PDF converter {}: available", status.name);
        } else {
            tracing::warn!("PDF converter {}: not found", status.name);
        }
    }

    tracing::info!("Documents: {}", cfg.documents_dir().display());
    tracing::info!("Templates: {}", cfg.templates_dir().display());
    tracing::info!("Signatures: {}", cfg.signatures_dir().display());
    match &static_dir {
        Some(dir) => tracing::info!("Front end: {}", dir.display()),
        None => tracing::warn!("MEDFORM_STATIC_DIR not set; serving the API only"),
    }

    let state = AppState::with_pipeline(cfg, pipeline)?;
    let app = router(state, static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let url = format!("http://{}", listener.local_addr()?);
    tracing::info!("++ Starting MedForm on {}", url);

    if open_browser {
        tokio::spawn(async move {
            tokio::time::sleep(BROWSER_DELAY).await;
            if let Err(e) = launch_browser(&url) {
                tracing::warn!("Could not open browser: {}", e);
            }
        });
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Opens `url` with the platform's default handler.
fn launch_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer").arg(url).spawn()?;
    }
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }
    Ok(())
}
