pub mod disk;
pub mod memory;

use crate::core::PreferenceStore;
use crate::core::config::AppConfig;
use disk::DiskPreferences;
use memory::MemoryPreferences;
use std::sync::Arc;
use tracing::warn;

/// Opens the persistent preference store under the data directory, falling back
/// to a process-local store when the directory can't be used.
pub fn open_preferences(config: &AppConfig) -> Arc<dyn PreferenceStore> {
    let opened = config
        .default_data_path()
        .and_then(|path| DiskPreferences::open(&path.join("preferences")));

    match opened {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "Preference store unavailable, selection won't persist");
            Arc::new(MemoryPreferences::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Country;

    #[test]
    fn test_open_preferences_in_data_path() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = AppConfig {
            data_path: Some(dir.path().to_string_lossy().into_owned()),
            ..AppConfig::default()
        };

        let preferences = open_preferences(&config);
        assert!(dir.path().join("preferences").exists());

        preferences.save_country(Country::Paraguay)?;
        assert_eq!(preferences.load_country()?, Some(Country::Paraguay));
        Ok(())
    }
}
