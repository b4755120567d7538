use std::sync::Arc;

use tracing::debug;

use crate::core::errors::Result;
use crate::core::models::configuration::MergedConfiguration;
use crate::core::traits::secret_store::SecretStore;

/// Section separator in configuration keys.
pub const KEY_DELIMITER: &str = ":";

/// Stand-in for the section separator in secret names, which cannot
/// contain `:`.
pub const SECRET_DELIMITER: &str = "--";

/// Secret name for a configuration key (`AppConfig:AppSecret` becomes
/// `AppConfig--AppSecret`).
pub fn secret_name_for(key: &str) -> String {
    key.replace(KEY_DELIMITER, SECRET_DELIMITER)
}

/// Read-only view over a loaded configuration.
///
/// When a secret store is attached, each lookup asks the store first and
/// falls back to the merged settings, so secrets override files. The store
/// is only contacted when a key is actually read.
#[derive(Clone)]
pub struct Configuration {
    merged: Arc<MergedConfiguration>,
    secrets: Option<Arc<dyn SecretStore>>,
}

impl Configuration {
    pub fn new(merged: Arc<MergedConfiguration>) -> Self {
        Self {
            merged,
            secrets: None,
        }
    }

    pub fn with_secret_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.secrets = Some(store);
        self
    }

    /// Look up `key`.
    ///
    /// # Errors
    ///
    /// Errors from the secret store are returned unchanged.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(store) = &self.secrets {
            let name = secret_name_for(key);
            if let Some(value) = store.fetch_secret(&name)? {
                debug!(key, "value served from secret store");
                return Ok(Some(value));
            }
        }
        Ok(self.merged.get(key).map(str::to_string))
    }

    /// The merged settings without secret lookups.
    pub fn merged(&self) -> &MergedConfiguration {
        &self.merged
    }
}
