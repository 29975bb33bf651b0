pub mod caching;
pub mod ipapi;
pub mod open_er_api;

use anyhow::{Context, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("vitrina/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client settings for all providers.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}
