use crate::cli::context::CommandContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::chain_resolver::ChainResolver;
use crate::core::services::layer_applier::LayerApplier;

/// Execute the `envlayer chain` command.
///
/// Resolves the inheritance chain for the current environment and lists
/// the layer files it requests, in apply order. No layer is read.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    output::header(&format!("Environment: {}", ctx.host.environment()));

    let chain = ChainResolver.resolve(ctx.host.environment(), &ctx.registry)?;
    if ctx.registry.find(ctx.host.environment()).is_none() {
        output::warning("Environment is not declared; no inheritance applied");
    }
    output::success(&format!("Inheritance chain: {chain}"));

    let source = ctx.layer_source();
    println!("\n  Layers (later overrides earlier):");
    for (i, request) in LayerApplier.plan(&chain).iter().enumerate() {
        println!("    {}. {}", i + 1, source.file_name(request));
    }

    Ok(())
}
