/// All domain errors for envlayer.
///
/// Each variant carries enough context to fix the problem from the
/// message alone. Every variant is fatal to the load call that raised it.
#[derive(Debug, thiserror::Error)]
pub enum EnvLayerError {
    #[error(
        "Environment '{name}' is declared more than once\n\n  \
         Environment names are compared case-insensitively.\n  \
         Fix: remove or rename the duplicate entry in environments.toml."
    )]
    DuplicateEnvironment { name: String },

    #[error("Missing required argument: {name}")]
    MissingArgument { name: &'static str },

    #[error(
        "Environment '{environment}' inherits from '{parent}', which is not declared\n\n  \
         Fix: declare '{parent}' in environments.toml or drop the parent reference."
    )]
    UnknownParent { environment: String, parent: String },

    #[error(
        "Circular inheritance detected: {chain}\n\n  \
         Two or more environments inherit from each other, creating a loop.\n\n  \
         Fix: edit environments.toml and ensure inheritance forms a tree:\n    \
         → Valid:   PPE → Development, Production\n    \
         → Invalid: Development → PPE → Development (cycle)"
    )]
    CyclicEnvironment { chain: String },

    #[error("Failed to load layer '{layer}': {detail}")]
    LayerLoad { layer: String, detail: String },

    #[error(
        "Secret store authentication failed: {detail}\n\n  \
         For development, set KeyVaultAppId and KeyVaultAppSecret in user secrets."
    )]
    SecretAuthentication { detail: String },

    #[error("Setting '{key}' not found")]
    SettingNotFound { key: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnvLayerError>;
