//! Core domain types and the traits providers implement

pub mod cache;
pub mod config;
pub mod country;
pub mod currency;
pub mod geo;
pub mod log;
pub mod order;
pub mod preferences;

// Re-export main types for cleaner imports
pub use country::Country;
pub use currency::{CurrencyRateProvider, ExchangeRate, RateSource};
pub use geo::CountryDetector;
pub use preferences::PreferenceStore;
