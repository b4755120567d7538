use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::core::errors::{EnvLayerError, Result};

/// Address of a secret vault, always of the form
/// `https://{vaultName}.vault.azure.net/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEndpoint(String);

impl VaultEndpoint {
    pub fn for_vault(vault_name: &str) -> Self {
        Self(format!("https://{vault_name}.vault.azure.net/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VaultEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How (and whether) configuration is augmented from a secret vault.
///
/// The secret value is wrapped in [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug)]
pub enum SecretSource {
    /// No vault configured.
    Disabled,
    /// Explicit client id / client secret (local development).
    CredentialPair {
        endpoint: VaultEndpoint,
        client_id: Option<String>,
        client_secret: Option<SecretString>,
    },
    /// Identity of the surrounding execution context.
    AmbientIdentity { endpoint: VaultEndpoint },
}

impl SecretSource {
    pub fn endpoint(&self) -> Option<&VaultEndpoint> {
        match self {
            SecretSource::Disabled => None,
            SecretSource::CredentialPair { endpoint, .. }
            | SecretSource::AmbientIdentity { endpoint } => Some(endpoint),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, SecretSource::Disabled)
    }

    /// Short label for the authentication mode.
    pub fn mode(&self) -> &'static str {
        match self {
            SecretSource::Disabled => "disabled",
            SecretSource::CredentialPair { .. } => "credential-pair",
            SecretSource::AmbientIdentity { .. } => "ambient-identity",
        }
    }

    /// The explicit credentials a secret-store client must present.
    ///
    /// Returns `Ok(None)` for modes that carry no explicit credential.
    ///
    /// # Errors
    ///
    /// `SecretAuthentication` if this is a credential pair with a missing
    /// or blank client id or secret.
    pub fn require_credentials(&self) -> Result<Option<(&str, &str)>> {
        let SecretSource::CredentialPair {
            client_id,
            client_secret,
            ..
        } = self
        else {
            return Ok(None);
        };

        let id = client_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| EnvLayerError::SecretAuthentication {
                detail: "KeyVaultAppId is not set".into(),
            })?;
        let secret = client_secret
            .as_ref()
            .map(|s| s.expose_secret())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| EnvLayerError::SecretAuthentication {
                detail: "KeyVaultAppSecret is not set".into(),
            })?;

        Ok(Some((id, secret)))
    }
}
