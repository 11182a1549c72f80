//! This module contains an HTTP client that queries our own server.

use crate::config::CONFIG;
use crate::report::Report;

use log::debug;
use reqwest::{Client, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Server error: {0} - {1}")]
    ServerError(StatusCode, String),
}

/// Check if the server is running on the configured address and port.
pub async fn is_running() -> bool {
    let Ok((_, body)) = get("info").await else {
        return false;
    };
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(info) => {
            info["name"] == env!("CARGO_PKG_NAME") && info["version"] == env!("CARGO_PKG_VERSION")
        }
        Err(_) => false,
    }
}

/// Retrieve the health report from the server.
pub async fn get_report() -> Result<Report, ClientError> {
    let (status, body) = get("health").await?;
    // An unhealthy report is served with 503 but still carries the report.
    if status != StatusCode::OK && status != StatusCode::SERVICE_UNAVAILABLE {
        return Err(ClientError::ServerError(status, body));
    }
    let report = serde_json::from_str(&body)?;
    Ok(report)
}

/// Send a GET request to the server.
async fn get(uri: &str) -> Result<(StatusCode, String), ClientError> {
    debug!("GET {}", uri);
    let client = Client::new();
    let response = client.get(get_url(uri)).send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

/// Generate the endpoint URL from the given URI.
fn get_url(uri: &str) -> String {
    format!("{}/{}", CONFIG.server, uri)
}
