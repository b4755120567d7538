use crate::core::errors::Result;

/// Port for reading individual secrets from a vault.
///
/// Implementations are built for a decided
/// [`SecretSource`](crate::core::models::secret_source::SecretSource) and
/// own whatever authentication that source requires.
pub trait SecretStore: Send + Sync {
    /// Fetch the secret named `name`. A secret that does not exist is
    /// `Ok(None)`.
    fn fetch_secret(&self, name: &str) -> Result<Option<String>>;
}
