//! Price presentation pipeline: convert, charm-round, format.

pub mod charm;
pub mod format;

pub use charm::charm_round;
pub use format::format_currency;

use crate::core::{Country, ExchangeRate};

/// Converts a canonical price with a base to display currency rate.
pub fn convert(price: f64, rate: f64) -> f64 {
    price * rate
}

/// Snapshot of everything needed to render a price for the active country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceContext {
    base: Country,
    country: Country,
    rate: ExchangeRate,
    pub(crate) generation: u64,
}

impl PriceContext {
    pub fn new(base: Country, country: Country, rate: ExchangeRate) -> Self {
        Self {
            base,
            country,
            rate,
            generation: 0,
        }
    }

    /// Context for showing prices in the base currency itself.
    pub fn base_only(base: Country) -> Self {
        Self::new(base, base, ExchangeRate::identity())
    }

    pub fn base(&self) -> Country {
        self.base
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn rate(&self) -> ExchangeRate {
        self.rate
    }

    pub(crate) fn with_rate(mut self, rate: ExchangeRate) -> Self {
        self.rate = rate;
        self
    }

    pub fn uses_base_currency(&self) -> bool {
        self.country == self.base
    }

    pub fn currency_code(&self) -> &'static str {
        self.country.currency_code()
    }

    pub fn convert(&self, price: f64) -> f64 {
        if self.uses_base_currency() {
            price
        } else {
            convert(price, self.rate.value())
        }
    }

    /// Numeric display price. Converted prices are charm-rounded, base prices are shown as stored.
    pub fn display_amount(&self, price: f64) -> f64 {
        if !price.is_finite() {
            return 0.0;
        }
        if self.uses_base_currency() {
            price
        } else {
            charm_round(self.convert(price))
        }
    }

    /// Formats an amount that is already in the display currency.
    pub fn format_amount(&self, amount: f64) -> String {
        format_currency(amount, self.country.currency_code(), self.country.locale())
    }

    pub fn format_price(&self, price: f64) -> String {
        self.format_amount(self.display_amount(price))
    }
}
