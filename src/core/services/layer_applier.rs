use tracing::debug;

use crate::core::errors::Result;
use crate::core::models::configuration::MergedConfiguration;
use crate::core::models::environment::ResolvedChain;
use crate::core::models::layer::{LayerEntries, LayerRequest};
use crate::core::traits::layer_source::LayerSource;

/// Turns a resolved chain into ordered layer requests and merges the
/// layers that exist.
pub struct LayerApplier;

impl LayerApplier {
    /// The layers to request for `chain`, in apply order: the base layer,
    /// then one per environment from root to current.
    pub fn plan(&self, chain: &ResolvedChain) -> Vec<LayerRequest> {
        std::iter::once(LayerRequest::Base)
            .chain(
                chain
                    .iter()
                    .map(|name| LayerRequest::Environment(name.to_string())),
            )
            .collect()
    }

    /// Load every planned layer from `source`, in order.
    ///
    /// Missing layers come back as `None` and contribute nothing.
    ///
    /// # Errors
    ///
    /// The first error from `source` aborts the whole call.
    pub fn load(
        &self,
        chain: &ResolvedChain,
        source: &dyn LayerSource,
    ) -> Result<Vec<Option<LayerEntries>>> {
        self.plan(chain)
            .iter()
            .map(|request| -> Result<Option<LayerEntries>> {
                let layer = source.try_load(request)?;
                match &layer {
                    Some(entries) => debug!(layer = %request, keys = entries.len(), "loaded layer"),
                    None => debug!(layer = %request, "layer not present, skipping"),
                }
                Ok(layer)
            })
            .collect()
    }

    /// Load and merge the layers for `chain`. Later layers override.
    pub fn apply(
        &self,
        chain: &ResolvedChain,
        source: &dyn LayerSource,
    ) -> Result<MergedConfiguration> {
        Ok(merge_layers(self.load(chain, source)?))
    }
}

/// Merge optional layers in order into a new configuration.
///
/// A key present in several layers takes the value from the last one.
/// `None` layers are skipped.
pub fn merge_layers<I>(layers: I) -> MergedConfiguration
where
    I: IntoIterator<Item = Option<LayerEntries>>,
{
    let mut merged = MergedConfiguration::default();
    for entries in layers.into_iter().flatten() {
        for (key, value) in &entries {
            merged.insert(key, value);
        }
    }
    merged
}
