use super::country::Country;
use anyhow::Result;

/// Client-local storage for the shopper's country selection.
pub trait PreferenceStore: Send + Sync {
    /// `Ok(None)` when nothing valid has been stored yet.
    fn load_country(&self) -> Result<Option<Country>>;
    fn save_country(&self, country: Country) -> Result<()>;
}
