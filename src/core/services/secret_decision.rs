use secrecy::SecretString;
use tracing::debug;

use crate::core::models::configuration::MergedConfiguration;
use crate::core::models::secret_source::{SecretSource, VaultEndpoint};

/// Settings key naming the vault. Can come from host settings or any
/// appsettings layer.
pub const KEY_VAULT_NAME: &str = "KeyVaultName";

/// Client id for the vault, development only (usually in user secrets).
pub const KEY_VAULT_APP_ID: &str = "KeyVaultAppId";

/// Client secret for the vault, development only (usually in user secrets).
pub const KEY_VAULT_APP_SECRET: &str = "KeyVaultAppSecret";

/// Decide whether and how to read secrets from a vault.
///
/// No vault name (or a blank one) disables augmentation. Development uses
/// the client id / secret pair from `merged` as-is, missing values
/// included; everything else uses the ambient identity.
pub fn decide_secret_source(merged: &MergedConfiguration, is_development: bool) -> SecretSource {
    let Some(vault_name) = merged
        .get(KEY_VAULT_NAME)
        .filter(|name| !name.trim().is_empty())
    else {
        debug!("no vault configured");
        return SecretSource::Disabled;
    };

    let endpoint = VaultEndpoint::for_vault(vault_name);
    let source = if is_development {
        SecretSource::CredentialPair {
            endpoint,
            client_id: merged.get(KEY_VAULT_APP_ID).map(str::to_string),
            client_secret: merged
                .get(KEY_VAULT_APP_SECRET)
                .map(|s| SecretString::from(s.to_string())),
        }
    } else {
        SecretSource::AmbientIdentity { endpoint }
    };

    debug!(mode = source.mode(), "secret source decided");
    source
}
