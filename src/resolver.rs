//! Decides which country a shopper sees prices for.

use crate::core::{Country, CountryDetector, PreferenceStore};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How the active country was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryOrigin {
    Stored,
    Detected,
    Fallback,
    Selected,
}

impl Display for CountryOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CountryOrigin::Stored => "stored selection",
            CountryOrigin::Detected => "detected",
            CountryOrigin::Fallback => "fallback",
            CountryOrigin::Selected => "selected",
        };
        write!(f, "{label}")
    }
}

pub struct CountryResolver {
    detector: Arc<dyn CountryDetector>,
    preferences: Arc<dyn PreferenceStore>,
    fallback: Country,
}

impl CountryResolver {
    pub fn new(
        detector: Arc<dyn CountryDetector>,
        preferences: Arc<dyn PreferenceStore>,
        fallback: Country,
    ) -> Self {
        Self {
            detector,
            preferences,
            fallback,
        }
    }

    /// Stored selection if there is one, otherwise a single geo-IP detection
    /// whose result is persisted right away.
    pub async fn resolve(&self) -> (Country, CountryOrigin) {
        match self.preferences.load_country() {
            Ok(Some(country)) => {
                debug!(%country, "Using stored country");
                return (country, CountryOrigin::Stored);
            }
            Ok(None) => debug!("No stored country, detecting"),
            Err(e) => warn!(error = %e, "Failed to read stored country, detecting"),
        }

        let (country, origin) = self.detect().await;
        info!(%country, %origin, "Resolved country");
        self.persist(country);
        (country, origin)
    }

    /// Never fails: lookup errors and unsupported codes map to the fallback country.
    pub async fn detect(&self) -> (Country, CountryOrigin) {
        match self.detector.detect_country_code().await {
            Ok(code) => match Country::from_detected(&code) {
                Some(country) => (country, CountryOrigin::Detected),
                None => {
                    debug!(%code, fallback = %self.fallback, "Unsupported country detected");
                    (self.fallback, CountryOrigin::Fallback)
                }
            },
            Err(e) => {
                warn!(error = %e, fallback = %self.fallback, "Geo lookup failed");
                (self.fallback, CountryOrigin::Fallback)
            }
        }
    }

    pub fn persist(&self, country: Country) {
        if let Err(e) = self.preferences.save_country(country) {
            warn!(%country, error = %e, "Failed to persist country selection");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::memory::MemoryPreferences;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) struct FixedDetector {
        code: Option<&'static str>,
        pub(crate) calls: AtomicUsize,
    }

    impl FixedDetector {
        pub(crate) fn returning(code: &'static str) -> Self {
            Self {
                code: Some(code),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                code: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CountryDetector for FixedDetector {
        async fn detect_country_code(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.code
                .map(str::to_string)
                .ok_or_else(|| anyhow!("connection refused"))
        }
    }

    struct BrokenPreferences;

    impl PreferenceStore for BrokenPreferences {
        fn load_country(&self) -> Result<Option<Country>> {
            Err(anyhow!("disk unavailable"))
        }

        fn save_country(&self, _country: Country) -> Result<()> {
            Err(anyhow!("disk unavailable"))
        }
    }

    #[tokio::test]
    async fn test_stored_country_skips_detection() {
        let detector = Arc::new(FixedDetector::returning("AR"));
        let prefs = Arc::new(MemoryPreferences::with_country(Country::Paraguay));
        let resolver = CountryResolver::new(detector.clone(), prefs, Country::Argentina);

        assert_eq!(
            resolver.resolve().await,
            (Country::Paraguay, CountryOrigin::Stored)
        );
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_detected_country_is_persisted() {
        let prefs = Arc::new(MemoryPreferences::new());
        let resolver = CountryResolver::new(
            Arc::new(FixedDetector::returning("PY")),
            prefs.clone(),
            Country::Argentina,
        );

        assert_eq!(
            resolver.resolve().await,
            (Country::Paraguay, CountryOrigin::Detected)
        );
        assert_eq!(prefs.load_country().unwrap(), Some(Country::Paraguay));
    }

    #[tokio::test]
    async fn test_unsupported_country_uses_fallback() {
        let prefs = Arc::new(MemoryPreferences::new());
        let resolver = CountryResolver::new(
            Arc::new(FixedDetector::returning("US")),
            prefs.clone(),
            Country::Argentina,
        );

        assert_eq!(
            resolver.resolve().await,
            (Country::Argentina, CountryOrigin::Fallback)
        );
        assert_eq!(prefs.load_country().unwrap(), Some(Country::Argentina));
    }

    #[tokio::test]
    async fn test_lookup_failure_uses_fallback() {
        let resolver = CountryResolver::new(
            Arc::new(FixedDetector::failing()),
            Arc::new(MemoryPreferences::new()),
            Country::Paraguay,
        );

        assert_eq!(
            resolver.resolve().await,
            (Country::Paraguay, CountryOrigin::Fallback)
        );
    }

    #[tokio::test]
    async fn test_broken_store_never_propagates() {
        let resolver = CountryResolver::new(
            Arc::new(FixedDetector::returning("PY")),
            Arc::new(BrokenPreferences),
            Country::Argentina,
        );

        assert_eq!(resolver.resolve().await.0, Country::Paraguay);
        resolver.persist(Country::Argentina);
    }
}
