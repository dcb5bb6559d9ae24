use reqwest::Client;
use tracing::info;

use crate::{errors::AppError, settings::AppConfig};

/// Builds the shared HTTP client used for every backend call.
pub fn create_client(config: &AppConfig) -> Result<Client, AppError> {
    let mut builder = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }

    let client = builder
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

    info!(
        "HTTP client ready for {} (timeout: {})",
        config.api_base_url,
        config
            .request_timeout_secs
            .map(|s| format!("{s}s"))
            .unwrap_or_else(|| "none".into())
    );

    Ok(client)
}
