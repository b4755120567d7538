use crate::cli::context::CommandContext;
use crate::core::errors::{EnvLayerError, Result};

/// Execute the `envlayer get <KEY>` command.
///
/// Prints the bare merged value so it can be used from scripts.
pub fn execute(ctx: &CommandContext, key: &str) -> Result<()> {
    let loaded = ctx.load()?;
    let config = loaded.configuration();

    match config.get(key)? {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(EnvLayerError::SettingNotFound {
            key: key.to_string(),
        }),
    }
}
