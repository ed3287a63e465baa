use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error_boundary::{
    api::{create_router, middleware::ErrorHandlingConfig},
    config::LogFormat,
    Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    config.validate()?;

    init_tracing(&config);
    info!("Starting error boundary service");

    // Invalid operator patterns fail here, never at request time
    let responder = ErrorHandlingConfig::from_config(&config).build()?;
    info!(
        custom_patterns = config.redaction_patterns.len(),
        "Redaction rules compiled"
    );

    let app = create_router(responder);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    match config.log_format().unwrap_or_default() {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init(),
    }
}
