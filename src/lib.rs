//! Layered, inheritance-aware configuration for serverless function hosts.
//!
//! Environments are declared with optional parents. At startup the current
//! environment's chain is resolved (root first), its `appsettings` layers are
//! merged in that order so children override parents, and the merged result
//! decides whether and how secrets are read from a vault.
//!
//! ```rust,ignore
//! use envlayer::adapters::layer_sources::file_layer_source::FileLayerSource;
//! use envlayer::adapters::parsers::json_parser::JsonLayerParser;
//! use envlayer::config::host_context::HostContext;
//! use envlayer::core::models::environment::{EnvironmentDecl, EnvironmentRegistry};
//! use envlayer::core::services::config_loader::ConfigLoader;
//!
//! let registry = EnvironmentRegistry::from_declarations(&[
//!     EnvironmentDecl::new("Production"),
//!     EnvironmentDecl::new("PPE"),
//!     EnvironmentDecl::inherits("Development", "PPE"),
//! ])?;
//! let loader = ConfigLoader::new(Box::new(FileLayerSource::new("settings", JsonLayerParser)));
//! let loaded = loader.load(&HostContext::from_env(), &registry)?;
//! println!("{}", loaded.chain);
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
