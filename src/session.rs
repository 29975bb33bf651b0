//! Live pricing state for one shopper.
//!
//! A [`PricingSession`] publishes the current [`PriceContext`] through a watch
//! channel. Selecting a country replaces the context at once (with the fallback
//! rate standing in while a fetch is pending) and starts a rate fetch tagged
//! with the selection's generation. Starting a new selection aborts the previous
//! fetch, and a fetch only publishes if its generation is still current.

use crate::core::config::AppConfig;
use crate::core::{Country, CurrencyRateProvider, ExchangeRate, PreferenceStore};
use crate::pricing::PriceContext;
use crate::providers::caching::CachingCurrencyRateProvider;
use crate::providers::ipapi::IpApiDetector;
use crate::providers::open_er_api::OpenErApiProvider;
use crate::providers::http_client;
use crate::resolver::{CountryOrigin, CountryResolver};
use anyhow::Result;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct PricingSession {
    base: Country,
    fallback_rate: f64,
    rates: Arc<dyn CurrencyRateProvider>,
    resolver: CountryResolver,
    origin: Mutex<CountryOrigin>,
    state: Arc<watch::Sender<PriceContext>>,
    inflight: Mutex<Option<JoinHandle<()>>>,
}

impl PricingSession {
    /// Resolves the shopper's country and starts the matching rate fetch.
    ///
    /// Must be called within a Tokio runtime.
    pub async fn start(
        base: Country,
        fallback_rate: f64,
        rates: Arc<dyn CurrencyRateProvider>,
        resolver: CountryResolver,
    ) -> Self {
        let (country, origin) = resolver.resolve().await;
        let session = Self::with_country(base, fallback_rate, rates, resolver, country);
        session.set_origin(origin);
        session
    }

    /// Wires the HTTP providers described by `config` and starts a session,
    /// pinned to `country` when one is given.
    pub async fn from_config(
        config: &AppConfig,
        preferences: Arc<dyn PreferenceStore>,
        country: Option<Country>,
    ) -> Result<Self> {
        let client = http_client(config.request_timeout())?;
        let detector = IpApiDetector::new(&config.providers.geo.base_url, client.clone());
        let rates = CachingCurrencyRateProvider::new(
            OpenErApiProvider::new(&config.providers.rates.base_url, client),
            config.rate_cache_ttl(),
        );
        let resolver = CountryResolver::new(
            Arc::new(detector),
            preferences,
            config.fallback_country,
        );

        let rates: Arc<dyn CurrencyRateProvider> = Arc::new(rates);

        Ok(match country {
            Some(country) => Self::with_country(
                config.base_country,
                config.fallback_rate_from_base(),
                rates,
                resolver,
                country,
            ),
            None => {
                Self::start(
                    config.base_country,
                    config.fallback_rate_from_base(),
                    rates,
                    resolver,
                )
                .await
            }
        })
    }

    /// Session pinned to `country` without consulting the store or detector.
    pub fn with_country(
        base: Country,
        fallback_rate: f64,
        rates: Arc<dyn CurrencyRateProvider>,
        resolver: CountryResolver,
        country: Country,
    ) -> Self {
        let (state, _) = watch::channel(PriceContext::base_only(base));
        let session = Self {
            base,
            fallback_rate,
            rates,
            resolver,
            origin: Mutex::new(CountryOrigin::Selected),
            state: Arc::new(state),
            inflight: Mutex::new(None),
        };
        session.apply(country);
        session
    }

    pub fn context(&self) -> PriceContext {
        *self.state.borrow()
    }

    pub fn origin(&self) -> CountryOrigin {
        *self.origin.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_origin(&self, origin: CountryOrigin) {
        *self.origin.lock().unwrap_or_else(|e| e.into_inner()) = origin;
    }

    pub fn subscribe(&self) -> watch::Receiver<PriceContext> {
        self.state.subscribe()
    }

    pub fn format_price(&self, price: f64) -> String {
        self.context().format_price(price)
    }

    /// Persists `country` and switches the context to it.
    pub fn select_country(&self, country: Country) {
        info!(%country, "Country selected");
        self.resolver.persist(country);
        self.set_origin(CountryOrigin::Selected);
        self.apply(country);
    }

    /// Waits until the current selection's rate is no longer pending.
    pub async fn settled(&self) -> PriceContext {
        let mut receiver = self.state.subscribe();
        match receiver.wait_for(|ctx| !ctx.rate().is_pending()).await {
            Ok(ctx) => *ctx,
            Err(_) => self.context(),
        }
    }

    fn apply(&self, country: Country) {
        let mut inflight = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = inflight.take() {
            previous.abort();
        }

        let needs_rate = country != self.base;
        let rate = if needs_rate {
            ExchangeRate::pending(self.fallback_rate)
        } else {
            ExchangeRate::identity()
        };

        let mut generation = 0;
        self.state.send_modify(|ctx| {
            generation = ctx.generation + 1;
            let mut next = PriceContext::new(self.base, country, rate);
            next.generation = generation;
            *ctx = next;
        });
        debug!(%country, generation, "Applied country selection");

        if needs_rate {
            *inflight = Some(tokio::spawn(publish_rate(
                Arc::clone(&self.rates),
                Arc::clone(&self.state),
                self.base,
                country,
                self.fallback_rate,
                generation,
            )));
        }
    }
}

impl Drop for PricingSession {
    fn drop(&mut self) {
        if let Ok(mut inflight) = self.inflight.lock() {
            if let Some(handle) = inflight.take() {
                handle.abort();
            }
        }
    }
}

async fn publish_rate(
    rates: Arc<dyn CurrencyRateProvider>,
    state: Arc<watch::Sender<PriceContext>>,
    base: Country,
    country: Country,
    fallback_rate: f64,
    generation: u64,
) {
    let from = base.currency_code();
    let to = country.currency_code();
    let rate = match rates.get_rate(from, to).await {
        Ok(value) => ExchangeRate::live(value).unwrap_or_else(|| {
            warn!(value, from, to, "Rejected invalid exchange rate");
            ExchangeRate::fallback(fallback_rate)
        }),
        Err(e) => {
            warn!(error = %e, from, to, fallback_rate, "Exchange rate fetch failed");
            ExchangeRate::fallback(fallback_rate)
        }
    };

    let applied = state.send_if_modified(|ctx| {
        if ctx.generation != generation {
            return false;
        }
        *ctx = ctx.with_rate(rate);
        true
    });

    if applied {
        debug!(from, to, rate = rate.value(), source = ?rate.source(), "Published exchange rate");
    } else {
        debug!(generation, "Discarding rate for superseded selection");
    }
}
