pub mod configuration;
pub mod environment;
pub mod layer;
pub mod secret_source;

/// Case folding used for environment names and configuration keys.
pub(crate) fn fold_case(s: &str) -> String {
    s.to_lowercase()
}
