use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::CountryDetector;

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Geo-IP lookup against an ipapi.co compatible endpoint.
pub struct IpApiDetector {
    base_url: String,
    client: reqwest::Client,
}

impl IpApiDetector {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        IpApiDetector {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl CountryDetector for IpApiDetector {
    #[instrument(name = "GeoIpLookup", skip(self))]
    async fn detect_country_code(&self) -> Result<String> {
        let url = format!("{}/json/", self.base_url);
        debug!("Requesting location from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for geo lookup", response.status()));
        }

        let text = response.text().await?;
        let data: IpApiResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse geo lookup response: {}", e))?;

        if data.error {
            return Err(anyhow!(
                "Geo lookup rejected: {}",
                data.reason.as_deref().unwrap_or("unknown reason")
            ));
        }

        data.country_code
            .ok_or_else(|| anyhow!("No country code in geo lookup response"))
    }
}
