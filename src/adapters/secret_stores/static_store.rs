use std::collections::HashMap;

use crate::core::errors::Result;
use crate::core::models::fold_case;
use crate::core::models::secret_source::SecretSource;
use crate::core::traits::secret_store::SecretStore;

/// Secret store holding a fixed set of secrets in memory.
///
/// Secret names are matched case-insensitively, as vault names are.
/// Useful for tests and for hosts that fetch secrets up front.
pub struct StaticSecretStore {
    secrets: HashMap<String, String>,
}

impl StaticSecretStore {
    pub fn new<I, K, V>(secrets: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            secrets: secrets
                .into_iter()
                .map(|(k, v)| (fold_case(k.as_ref()), v.into()))
                .collect(),
        }
    }

    /// Build a store for a decided secret source.
    ///
    /// Returns `Ok(None)` when the source is disabled.
    ///
    /// # Errors
    ///
    /// `SecretAuthentication` when a credential pair is incomplete.
    pub fn for_source<I, K, V>(source: &SecretSource, secrets: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        if !source.is_enabled() {
            return Ok(None);
        }
        source.require_credentials()?;
        Ok(Some(Self::new(secrets)))
    }
}

impl SecretStore for StaticSecretStore {
    fn fetch_secret(&self, name: &str) -> Result<Option<String>> {
        Ok(self.secrets.get(&fold_case(name)).cloned())
    }
}
