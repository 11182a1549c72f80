use crate::checks::HealthCheck;
use crate::config::UrlCheckConfig;
use crate::error::ProbeFailure;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Checks that a list of URLs respond with 200 OK.
pub struct UrlCheck {
    timeout: u64,
    urls: Vec<String>,
}

impl UrlCheck {
    pub const NAME: &'static str = "UrlCheck";

    pub fn new(config: &UrlCheckConfig) -> Self {
        Self {
            timeout: config.timeout,
            urls: config.urls.clone(),
        }
    }
}

#[async_trait]
impl HealthCheck for UrlCheck {
    fn is_enabled(&self) -> bool {
        !self.urls.is_empty()
    }

    async fn run(&self) -> Result<(), ProbeFailure> {
        debug!("Checking {} URLs", self.urls.len());

        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .connect_timeout(Duration::from_secs(self.timeout))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;
        for url in &self.urls {
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|e| format!("Failed to access {}: {}", url, e))?;
            if response.status() != 200 {
                return Err(format!("URL {} returned status {}", url, response.status()).into());
            }
        }
        Ok(())
    }
}
