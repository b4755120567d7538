use crate::core::errors::Result;
use crate::core::models::layer::{LayerEntries, LayerRequest};

/// Port for retrieving one named configuration layer.
pub trait LayerSource: Send + Sync {
    /// Load the layer for `request`.
    ///
    /// A layer that does not exist is `Ok(None)`, never an error. Content
    /// that exists but cannot be read or parsed is a `LayerLoad` error.
    fn try_load(&self, request: &LayerRequest) -> Result<Option<LayerEntries>>;

    /// Human-readable description of where layers come from (for logging).
    fn describe(&self) -> String;
}

/// Port for a single layer that is not scoped to an environment, such as
/// the host's own settings or per-user secrets.
pub trait SettingsProvider: Send + Sync {
    /// Load the settings. Absent settings are `Ok(None)`.
    fn load(&self) -> Result<Option<LayerEntries>>;

    /// Human-readable description of the provider (for logging).
    fn describe(&self) -> String;
}
