//! Visitor location abstractions

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CountryDetector: Send + Sync {
    /// Returns the raw two-letter country code reported for the caller's address.
    async fn detect_country_code(&self) -> Result<String>;
}
