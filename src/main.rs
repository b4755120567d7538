use clap::Parser;

use envlayer::cli::context::CommandContext;
use envlayer::cli::{self, Cli, Commands};

fn main() {
    let args = Cli::parse();

    envlayer::logging::init(args.verbose);

    let result = CommandContext::from_cli(&args).and_then(|ctx| match &args.command {
        Commands::Chain => cli::commands::chain::execute(&ctx),
        Commands::Resolve {
            json,
            show_host_values,
        } => cli::commands::resolve::execute(&ctx, *json, *show_host_values),
        Commands::Get { key } => cli::commands::get::execute(&ctx, key),
        Commands::Secrets => cli::commands::secrets::execute(&ctx),
    });

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
