pub mod chain_resolver;
pub mod config_loader;
pub mod configuration;
pub mod layer_applier;
pub mod registry_validator;
pub mod secret_decision;
