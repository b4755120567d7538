use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{EnvLayerError, Result};
use crate::core::models::environment::{EnvironmentDecl, EnvironmentRegistry};

/// Default file name for environment declarations, looked up in the
/// settings directory.
pub const ENVIRONMENTS_FILE: &str = "environments.toml";

/// Environment declarations read from `environments.toml`.
///
/// ```toml
/// user_secrets_id = "my-function-app"
///
/// [[environment]]
/// name = "Production"
///
/// [[environment]]
/// name = "PPE"
///
/// [[environment]]
/// name = "Development"
/// parent = "PPE"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Id of the per-user secrets store, used in development only.
    pub user_secrets_id: Option<String>,
    #[serde(default, rename = "environment")]
    pub environments: Vec<EnvironmentDecl>,
}

impl AppConfig {
    /// Load declarations from `path`.
    ///
    /// A missing file is not an error: it means no environments are
    /// declared and every environment resolves on its own.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|detail| EnvLayerError::InvalidConfig {
            detail: format!("Failed to parse {}: {detail}", path.display()),
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Build the environment registry from the declarations.
    pub fn registry(&self) -> Result<EnvironmentRegistry> {
        EnvironmentRegistry::from_declarations(&self.environments)
    }
}
