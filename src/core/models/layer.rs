use std::collections::BTreeMap;
use std::fmt;

/// Flat key/value pairs contributed by one layer.
///
/// Nested sections are already flattened into `Section:Key` form.
pub type LayerEntries = BTreeMap<String, String>;

/// A request to load one named layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerRequest {
    /// The environment-independent layer, always requested first.
    Base,
    /// The layer scoped to one environment of the resolved chain.
    Environment(String),
}

impl fmt::Display for LayerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerRequest::Base => f.write_str("base"),
            LayerRequest::Environment(name) => f.write_str(name),
        }
    }
}
