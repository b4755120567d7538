use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::host_context::HostContext;
use crate::core::errors::Result;
use crate::core::models::configuration::MergedConfiguration;
use crate::core::models::environment::{EnvironmentRegistry, ResolvedChain};
use crate::core::models::fold_case;
use crate::core::models::layer::LayerEntries;
use crate::core::models::secret_source::SecretSource;
use crate::core::services::chain_resolver::ChainResolver;
use crate::core::services::configuration::Configuration;
use crate::core::services::layer_applier::{LayerApplier, merge_layers};
use crate::core::services::registry_validator;
use crate::core::services::secret_decision::decide_secret_source;
use crate::core::traits::layer_source::{LayerSource, SettingsProvider};

/// Everything one load call produces. Immutable once built.
#[derive(Debug)]
pub struct LoadedConfiguration {
    pub chain: ResolvedChain,
    pub merged: Arc<MergedConfiguration>,
    pub secret_source: SecretSource,
    /// Folded keys whose merged value comes from the host settings layer.
    host_keys: BTreeSet<String>,
}

impl LoadedConfiguration {
    /// A read-only view over the merged settings, without a secret store.
    pub fn configuration(&self) -> Configuration {
        Configuration::new(Arc::clone(&self.merged))
    }

    /// Whether the merged value for `key` was supplied by host settings
    /// and not overridden by any later layer.
    pub fn is_host_setting(&self, key: &str) -> bool {
        self.host_keys.contains(&fold_case(key))
    }
}

/// Runs the whole pipeline: validate the registry, resolve the chain,
/// apply layers, decide the secret source.
///
/// Layers are applied in this order, later ones overriding earlier ones:
///
/// 1. host settings (if configured)
/// 2. the base layer
/// 3. one layer per environment, root to current
/// 4. user secrets (development only, if configured)
///
/// Every call is independent: nothing is cached between loads, and a
/// failed load publishes nothing.
pub struct ConfigLoader {
    app_settings: Box<dyn LayerSource>,
    host_settings: Option<Box<dyn SettingsProvider>>,
    user_secrets: Option<Box<dyn SettingsProvider>>,
}

impl ConfigLoader {
    pub fn new(app_settings: Box<dyn LayerSource>) -> Self {
        Self {
            app_settings,
            host_settings: None,
            user_secrets: None,
        }
    }

    /// Settings applied before the base layer.
    pub fn with_host_settings(mut self, provider: Box<dyn SettingsProvider>) -> Self {
        self.host_settings = Some(provider);
        self
    }

    /// Settings applied after every environment layer, in development only.
    pub fn with_user_secrets(mut self, provider: Box<dyn SettingsProvider>) -> Self {
        self.user_secrets = Some(provider);
        self
    }

    /// Load the configuration for `context`.
    ///
    /// # Errors
    ///
    /// Fails on the first error from any stage; see
    /// [`EnvLayerError`](crate::core::errors::EnvLayerError).
    pub fn load(
        &self,
        context: &HostContext,
        registry: &EnvironmentRegistry,
    ) -> Result<LoadedConfiguration> {
        registry_validator::validate(registry.nodes().iter().map(|n| n.name()))?;

        let chain = ChainResolver.resolve(context.environment(), registry)?;

        let host_layer = match &self.host_settings {
            Some(host) => {
                debug!(provider = %host.describe(), "loading host settings");
                host.load()?
            }
            None => None,
        };
        let mut layers = LayerApplier.load(&chain, self.app_settings.as_ref())?;
        if context.is_development()
            && let Some(secrets) = &self.user_secrets
        {
            debug!(provider = %secrets.describe(), "loading user secrets");
            layers.push(secrets.load()?);
        }

        let host_keys = host_only_keys(host_layer.as_ref(), &layers);
        let merged = merge_layers(std::iter::once(host_layer).chain(layers));
        let secret_source = decide_secret_source(&merged, context.is_development());

        info!(
            environment = context.environment(),
            %chain,
            keys = merged.len(),
            secrets = secret_source.mode(),
            source = %self.app_settings.describe(),
            "configuration loaded"
        );

        Ok(LoadedConfiguration {
            chain,
            merged: Arc::new(merged),
            secret_source,
            host_keys,
        })
    }
}

fn host_only_keys(host: Option<&LayerEntries>, later: &[Option<LayerEntries>]) -> BTreeSet<String> {
    let Some(host) = host else {
        return BTreeSet::new();
    };
    let overridden: HashSet<String> = later
        .iter()
        .flatten()
        .flat_map(|layer| layer.keys())
        .map(|key| fold_case(key))
        .collect();
    host.keys()
        .map(|key| fold_case(key))
        .filter(|key| !overridden.contains(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::core::errors::EnvLayerError;
    use crate::core::models::environment::EnvironmentDecl;
    use crate::core::models::layer::{LayerEntries, LayerRequest};

    struct MapSource(HashMap<String, LayerEntries>);

    impl LayerSource for MapSource {
        fn try_load(&self, request: &LayerRequest) -> Result<Option<LayerEntries>> {
            Ok(self.0.get(&request.to_string()).cloned())
        }

        fn describe(&self) -> String {
            "map".into()
        }
    }

    struct FixedSettings(Option<LayerEntries>);

    impl SettingsProvider for FixedSettings {
        fn load(&self) -> Result<Option<LayerEntries>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixed".into()
        }
    }

    fn entries(pairs: &[(&str, &str)]) -> LayerEntries {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_registry() -> EnvironmentRegistry {
        EnvironmentRegistry::from_declarations(&[
            EnvironmentDecl::new("Production"),
            EnvironmentDecl::new("PPE"),
            EnvironmentDecl::inherits("Development", "PPE"),
        ])
        .unwrap()
    }

    fn sample_loader() -> ConfigLoader {
        let mut layers = HashMap::new();
        layers.insert(
            "base".to_string(),
            entries(&[("AppConfig:IntConfig", "1"), ("AppConfig:StringConfig", "base")]),
        );
        layers.insert(
            "PPE".to_string(),
            entries(&[("AppConfig:StringConfig", "ppe"), ("KeyVaultName", "kv1")]),
        );
        layers.insert(
            "Development".to_string(),
            entries(&[("AppConfig:IntConfig", "42")]),
        );
        ConfigLoader::new(Box::new(MapSource(layers)))
    }

    #[test]
    fn development_inherits_from_ppe() {
        let loaded = sample_loader()
            .load(&HostContext::new("Development"), &sample_registry())
            .unwrap();

        assert_eq!(loaded.chain.to_string(), "PPE -> Development");
        assert_eq!(loaded.merged.get("AppConfig:IntConfig"), Some("42"));
        assert_eq!(loaded.merged.get("AppConfig:StringConfig"), Some("ppe"));
        assert!(matches!(
            loaded.secret_source,
            SecretSource::CredentialPair { .. }
        ));
    }

    #[test]
    fn production_skips_ppe_layer() {
        let loaded = sample_loader()
            .load(&HostContext::new("Production"), &sample_registry())
            .unwrap();

        assert_eq!(loaded.merged.get("AppConfig:StringConfig"), Some("base"));
        assert!(!loaded.secret_source.is_enabled());
    }

    #[test]
    fn ppe_uses_ambient_identity() {
        let loaded = sample_loader()
            .load(&HostContext::new("PPE"), &sample_registry())
            .unwrap();

        assert!(matches!(
            loaded.secret_source,
            SecretSource::AmbientIdentity { .. }
        ));
    }

    #[test]
    fn host_settings_are_overridden_by_base() {
        let loader = sample_loader().with_host_settings(Box::new(FixedSettings(Some(entries(&[
            ("AppConfig:IntConfig", "host"),
            ("FUNCTIONS_WORKER_RUNTIME", "custom"),
        ])))));

        let loaded = loader
            .load(&HostContext::new("Production"), &sample_registry())
            .unwrap();

        assert_eq!(loaded.merged.get("AppConfig:IntConfig"), Some("1"));
        assert_eq!(loaded.merged.get("FUNCTIONS_WORKER_RUNTIME"), Some("custom"));
        assert!(loaded.is_host_setting("functions_worker_runtime"));
        assert!(!loaded.is_host_setting("AppConfig:IntConfig"));
        assert!(!loaded.is_host_setting("AppConfig:StringConfig"));
    }

    #[test]
    fn no_host_settings_marks_nothing() {
        let loaded = sample_loader()
            .load(&HostContext::new("PPE"), &sample_registry())
            .unwrap();

        assert!(!loaded.is_host_setting("KeyVaultName"));
    }

    #[test]
    fn user_secrets_apply_last_in_development() {
        let loader = sample_loader().with_user_secrets(Box::new(FixedSettings(Some(entries(&[
            ("AppConfig:IntConfig", "secret-override"),
            ("KeyVaultAppId", "app-id"),
            ("KeyVaultAppSecret", "app-secret"),
        ])))));

        let loaded = loader
            .load(&HostContext::new("Development"), &sample_registry())
            .unwrap();

        assert_eq!(loaded.merged.get("AppConfig:IntConfig"), Some("secret-override"));
        assert_eq!(
            loaded.secret_source.require_credentials().unwrap(),
            Some(("app-id", "app-secret"))
        );
    }

    #[test]
    fn user_secrets_ignored_outside_development() {
        let loader = sample_loader().with_user_secrets(Box::new(FixedSettings(Some(entries(&[(
            "AppConfig:IntConfig",
            "secret-override",
        )])))));

        let loaded = loader
            .load(&HostContext::new("PPE"), &sample_registry())
            .unwrap();

        assert_eq!(loaded.merged.get("AppConfig:IntConfig"), Some("1"));
    }

    #[test]
    fn flat_mode_with_base_only_matches_base() {
        let mut layers = HashMap::new();
        let base = entries(&[("A", "1"), ("B:C", "2")]);
        layers.insert("base".to_string(), base.clone());
        let loader = ConfigLoader::new(Box::new(MapSource(layers)));

        let loaded = loader
            .load(&HostContext::default(), &EnvironmentRegistry::default())
            .unwrap();

        assert_eq!(loaded.chain.to_string(), "Production");
        assert_eq!(loaded.merged.to_map(), base);
    }

    #[test]
    fn empty_environment_name_fails() {
        let result = sample_loader().load(&HostContext::new(""), &sample_registry());

        assert!(matches!(result, Err(EnvLayerError::MissingArgument { .. })));
    }

    #[test]
    fn cyclic_registry_fails_whole_load() {
        let registry = EnvironmentRegistry::from_declarations(&[
            EnvironmentDecl::inherits("Development", "PPE"),
            EnvironmentDecl::inherits("PPE", "Development"),
        ])
        .unwrap();

        let result = sample_loader().load(&HostContext::new("Development"), &registry);

        assert!(matches!(result, Err(EnvLayerError::CyclicEnvironment { .. })));
    }
}
