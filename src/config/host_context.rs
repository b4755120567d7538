/// Process variable holding the hosting environment name.
pub const ENVIRONMENT_VARIABLE: &str = "AZURE_FUNCTIONS_ENVIRONMENT";

pub const PRODUCTION: &str = "Production";
pub const DEVELOPMENT: &str = "Development";

/// Ambient facts about the host, read once at process entry and passed
/// into the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    environment: String,
    is_development: bool,
}

impl HostContext {
    /// Context for the named environment. Only the exact name
    /// `Development` counts as development.
    pub fn new(environment: impl Into<String>) -> Self {
        let environment = environment.into();
        let is_development = environment == DEVELOPMENT;
        Self {
            environment,
            is_development,
        }
    }

    /// Read `AZURE_FUNCTIONS_ENVIRONMENT`, defaulting to `Production`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(ENVIRONMENT_VARIABLE).unwrap_or_else(|_| PRODUCTION.to_string()))
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn is_development(&self) -> bool {
        self.is_development
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new(PRODUCTION)
    }
}
