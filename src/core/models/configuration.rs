use std::collections::BTreeMap;

use super::fold_case;

/// The result of merging layers in order.
///
/// Keys are compared case-insensitively. When a later layer writes a key
/// that already exists, both its value and its spelling replace the
/// earlier ones.
///
/// Instances are only produced by
/// [`merge_layers`](crate::core::services::layer_applier::merge_layers)
/// and never change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedConfiguration {
    // folded key -> (key as last written, value)
    entries: BTreeMap<String, (String, String)>,
}

impl MergedConfiguration {
    /// Returns the value for the given key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&fold_case(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold_case(key))
    }

    /// Iterates over `(key, value)` pairs ordered by folded key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy out as a plain sorted map.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        self.entries
            .insert(fold_case(key), (key.to_string(), value.to_string()));
    }
}
