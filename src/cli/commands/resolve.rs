use std::collections::BTreeMap;

use crate::cli::context::CommandContext;
use crate::cli::output;
use crate::core::errors::{EnvLayerError, Result};
use crate::core::models::fold_case;
use crate::core::services::secret_decision::KEY_VAULT_APP_SECRET;

/// Execute the `envlayer resolve` command.
///
/// Runs the full load and prints every merged setting. The vault client
/// secret is always masked. Values supplied only by process variables are
/// masked unless `show_host_values` is set.
pub fn execute(ctx: &CommandContext, json: bool, show_host_values: bool) -> Result<()> {
    let loaded = ctx.load()?;

    let masked: BTreeMap<String, String> = loaded
        .merged
        .iter()
        .map(|(key, value)| {
            let hidden = fold_case(key) == fold_case(KEY_VAULT_APP_SECRET)
                || (!show_host_values && loaded.is_host_setting(key));
            let shown = if hidden {
                output::MASK
            } else {
                value
            };
            (key.to_string(), shown.to_string())
        })
        .collect();

    if json {
        let rendered =
            serde_json::to_string_pretty(&masked).map_err(|e| EnvLayerError::InvalidConfig {
                detail: format!("Failed to render settings: {e}"),
            })?;
        println!("{rendered}");
        return Ok(());
    }

    output::header(&format!("Resolved environment: {}", ctx.host.environment()));
    output::success(&format!("Inheritance chain: {}", loaded.chain));
    output::success(&format!(
        "{} setting(s) from {} environment layer(s)",
        masked.len(),
        loaded.chain.len()
    ));
    println!();
    for (key, value) in &masked {
        println!("  {key} = {value}");
    }

    if loaded.secret_source.is_enabled() {
        println!("\n  Settings may be overridden by vault secrets. Run 'envlayer secrets' for details.");
    }

    Ok(())
}
