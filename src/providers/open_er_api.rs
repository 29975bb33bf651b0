use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::CurrencyRateProvider;
use crate::core::currency::is_valid_rate;

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    result: Option<String>,
    rates: HashMap<String, serde_json::Value>,
}

/// Exchange rates from an open.er-api.com compatible `/v6/latest/{base}` endpoint.
pub struct OpenErApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        OpenErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl CurrencyRateProvider for OpenErApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let url = format!("{}/v6/latest/{}", self.base_url, from);
        debug!("Requesting exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}{}", e, from, to))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}{}",
                response.status(),
                from,
                to
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}{}: {}", from, to, e))?;

        if let Some(result) = data.result.as_deref().filter(|r| *r != "success") {
            return Err(anyhow!("Rate API returned result '{}' for {}", result, from));
        }

        let rate = data
            .rates
            .get(to)
            .ok_or_else(|| anyhow!("No rate data found for currency pair: {}{}", from, to))?
            .as_f64()
            .ok_or_else(|| anyhow!("Non-numeric rate for currency pair: {}{}", from, to))?;

        if !is_valid_rate(rate) {
            return Err(anyhow!("Invalid rate {} for currency pair: {}{}", rate, from, to));
        }
        Ok(rate)
    }
}
