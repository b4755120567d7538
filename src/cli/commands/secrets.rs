use crate::cli::context::CommandContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::secret_source::SecretSource;

/// Execute the `envlayer secrets` command.
///
/// Shows whether a vault is configured and which authentication mode the
/// current environment would use. Never prints the client secret.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let loaded = ctx.load()?;

    output::header(&format!("Secrets for environment: {}", ctx.host.environment()));

    match &loaded.secret_source {
        SecretSource::Disabled => {
            output::warning("No vault configured (KeyVaultName is not set)");
        }
        SecretSource::AmbientIdentity { endpoint } => {
            output::success("Vault augmentation enabled");
            output::field("Endpoint", endpoint.as_str());
            output::field("Auth", "ambient identity");
        }
        SecretSource::CredentialPair {
            endpoint,
            client_id,
            client_secret,
        } => {
            output::success("Vault augmentation enabled");
            output::field("Endpoint", endpoint.as_str());
            output::field("Auth", "client credentials");
            output::field("Client id", client_id.as_deref().unwrap_or("(missing)"));
            output::field(
                "Client secret",
                if client_secret.is_some() {
                    output::MASK
                } else {
                    "(missing)"
                },
            );
            if let Err(e) = loaded.secret_source.require_credentials() {
                output::warning(&e.to_string());
            }
        }
    }

    Ok(())
}
