use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::core::errors::Result;
use crate::core::models::fold_case;
use crate::core::models::layer::LayerEntries;
use crate::core::services::configuration::KEY_DELIMITER;
use crate::core::traits::layer_source::SettingsProvider;

/// Separator that stands in for `:` in variable names, since most shells
/// do not allow `:` there.
pub const ENV_SECTION_SEPARATOR: &str = "__";

/// The host's own settings, taken from a snapshot of process variables.
///
/// `AppConfig__IntConfig=5` becomes `AppConfig:IntConfig = 5`.
///
/// Settings keys ignore case, so variables whose mapped names differ only in
/// case (`http_proxy` and `HTTP_PROXY`) collide. The one whose mapped name
/// sorts last by byte value is kept, which favours lowercase spellings.
pub struct ProcessEnvSettings {
    vars: Vec<(String, String)>,
}

impl ProcessEnvSettings {
    /// Snapshot the current process variables.
    pub fn capture() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
        }
    }
}

impl SettingsProvider for ProcessEnvSettings {
    fn load(&self) -> Result<Option<LayerEntries>> {
        let mapped: BTreeMap<String, &str> = self
            .vars
            .iter()
            .map(|(name, value)| {
                (name.replace(ENV_SECTION_SEPARATOR, KEY_DELIMITER), value.as_str())
            })
            .collect();

        let mut entries = LayerEntries::new();
        let mut spelled: HashMap<String, String> = HashMap::new();
        for (key, value) in mapped {
            if let Some(shadowed) = spelled.insert(fold_case(&key), key.clone()) {
                debug!(kept = %key, ignored = %shadowed, "host settings differ only in case");
                entries.remove(&shadowed);
            }
            entries.insert(key, value.to_string());
        }
        Ok((!entries.is_empty()).then_some(entries))
    }

    fn describe(&self) -> String {
        format!("process environment ({} variables)", self.vars.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> ProcessEnvSettings {
        ProcessEnvSettings::from_vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn double_underscore_maps_to_section() {
        let entries = vars(&[("AppConfig__IntConfig", "5"), ("KeyVaultName", "kv1")])
            .load()
            .unwrap()
            .unwrap();

        assert_eq!(entries.get("AppConfig:IntConfig").map(String::as_str), Some("5"));
        assert_eq!(entries.get("KeyVaultName").map(String::as_str), Some("kv1"));
    }

    #[test]
    fn case_collision_keeps_last_sorted_name() {
        let entries = vars(&[
            ("appconfig__x", "lower"),
            ("AppConfig__X", "mixed"),
            ("APPCONFIG__X", "upper"),
        ])
        .load()
        .unwrap()
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("appconfig:x").map(String::as_str), Some("lower"));
    }

    #[test]
    fn no_variables_is_none() {
        assert!(vars(&[]).load().unwrap().is_none());
    }
}
