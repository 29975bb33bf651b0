//! Currency conversion abstractions

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;
}

/// Where the rate in an [`ExchangeRate`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Display currency is the base currency.
    Identity,
    /// A fetch is in flight, the fallback value stands in meanwhile.
    Pending,
    Live,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate {
    value: f64,
    source: RateSource,
}

impl ExchangeRate {
    pub fn identity() -> Self {
        Self {
            value: 1.0,
            source: RateSource::Identity,
        }
    }

    pub fn pending(fallback: f64) -> Self {
        Self {
            value: fallback,
            source: RateSource::Pending,
        }
    }

    pub fn fallback(fallback: f64) -> Self {
        Self {
            value: fallback,
            source: RateSource::Fallback,
        }
    }

    /// Accepts a fetched rate only if it is finite and positive.
    pub fn live(value: f64) -> Option<Self> {
        is_valid_rate(value).then_some(Self {
            value,
            source: RateSource::Live,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn source(&self) -> RateSource {
        self.source
    }

    pub fn is_pending(&self) -> bool {
        self.source == RateSource::Pending
    }
}

pub fn is_valid_rate(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
