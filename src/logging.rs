use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "envlayer=debug"
    } else {
        "envlayer=warn"
    }
}

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. Calling this twice is
/// harmless; the second call does nothing.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
