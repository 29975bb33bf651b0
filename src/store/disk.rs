use crate::core::{Country, PreferenceStore};
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::{debug, warn};

const PARTITION: &str = "preferences";
const COUNTRY_KEY: &str = "country";

/// Preference store persisted in a fjall keyspace, surviving across sessions.
pub struct DiskPreferences {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskPreferences {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open keyspace at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open preferences partition")?;
        debug!("Opened preference store at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl PreferenceStore for DiskPreferences {
    fn load_country(&self) -> Result<Option<Country>> {
        let Some(raw) = self.partition.get(COUNTRY_KEY)? else {
            return Ok(None);
        };

        let value = String::from_utf8_lossy(&raw);
        match value.parse::<Country>() {
            Ok(country) => Ok(Some(country)),
            Err(e) => {
                warn!(stored = %value, error = %e, "Ignoring invalid stored country");
                Ok(None)
            }
        }
    }

    fn save_country(&self, country: Country) -> Result<()> {
        self.partition.insert(COUNTRY_KEY, country.code())?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(%country, "Persisted country selection");
        Ok(())
    }
}
