use std::path::PathBuf;

use crate::adapters::layer_sources::file_layer_source::FileLayerSource;
use crate::adapters::parsers::json_parser::JsonLayerParser;
use crate::adapters::settings::process_env::ProcessEnvSettings;
use crate::adapters::settings::user_secrets::UserSecretsSettings;
use crate::cli::Cli;
use crate::config::app_config::{AppConfig, ENVIRONMENTS_FILE};
use crate::config::host_context::HostContext;
use crate::core::errors::Result;
use crate::core::models::environment::EnvironmentRegistry;
use crate::core::services::config_loader::{ConfigLoader, LoadedConfiguration};

/// Everything a command needs, gathered once from the command line.
pub struct CommandContext {
    pub host: HostContext,
    pub app_config: AppConfig,
    pub registry: EnvironmentRegistry,
    settings_dir: PathBuf,
    host_settings: bool,
}

impl CommandContext {
    /// Read the environment declarations and build the registry.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let environments_path = cli
            .environments
            .clone()
            .unwrap_or_else(|| cli.dir.join(ENVIRONMENTS_FILE));
        let app_config = AppConfig::load(&environments_path)?;
        let registry = app_config.registry()?;

        Ok(Self {
            host: HostContext::new(cli.environment.clone()),
            app_config,
            registry,
            settings_dir: cli.dir.clone(),
            host_settings: !cli.no_host_settings,
        })
    }

    pub fn layer_source(&self) -> FileLayerSource<JsonLayerParser> {
        FileLayerSource::new(&self.settings_dir, JsonLayerParser)
    }

    /// Run the full load pipeline.
    pub fn load(&self) -> Result<LoadedConfiguration> {
        let mut loader = ConfigLoader::new(Box::new(self.layer_source()));
        if self.host_settings {
            loader = loader.with_host_settings(Box::new(ProcessEnvSettings::capture()));
        }
        if self.host.is_development()
            && let Some(id) = &self.app_config.user_secrets_id
        {
            loader = loader.with_user_secrets(Box::new(UserSecretsSettings::for_id(id)?));
        }
        loader.load(&self.host, &self.registry)
    }
}
