use std::collections::HashSet;

use jsonc_parser::ParseOptions;
use serde_json::Value;

use crate::core::errors::{EnvLayerError, Result};
use crate::core::models::fold_case;
use crate::core::models::layer::LayerEntries;
use crate::core::services::configuration::KEY_DELIMITER;
use crate::core::traits::parser::LayerParser;

/// Parses `appsettings*.json` files into flat settings.
///
/// - Nested objects become `Parent:Child` keys.
/// - Array elements become `Parent:0`, `Parent:1`, ...
/// - Strings keep their value; numbers and booleans keep their JSON text.
/// - `null` becomes an empty string.
/// - The top-level element must be an object.
///
/// `//` and `/* */` comments and trailing commas are accepted, as in the
/// files the functions host itself reads. Property names must be quoted.
pub struct JsonLayerParser;

impl JsonLayerParser {
    fn flatten(
        value: &Value,
        path: &mut Vec<String>,
        out: &mut LayerEntries,
        seen: &mut HashSet<String>,
        origin: &str,
    ) -> Result<()> {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    path.push(key.clone());
                    Self::flatten(child, path, out, seen, origin)?;
                    path.pop();
                }
            }
            Value::Array(items) => {
                for (idx, child) in items.iter().enumerate() {
                    path.push(idx.to_string());
                    Self::flatten(child, path, out, seen, origin)?;
                    path.pop();
                }
            }
            scalar => {
                let key = path.join(KEY_DELIMITER);
                if !seen.insert(fold_case(&key)) {
                    return Err(EnvLayerError::LayerLoad {
                        layer: origin.to_string(),
                        detail: format!("duplicate key '{key}'"),
                    });
                }
                out.insert(key, scalar_text(scalar));
            }
        }
        Ok(())
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl LayerParser for JsonLayerParser {
    fn parse(&self, content: &str, origin: &str) -> Result<LayerEntries> {
        let options = ParseOptions {
            allow_loose_object_property_names: false,
            ..ParseOptions::default()
        };
        let root = jsonc_parser::parse_to_serde_value(content, &options).map_err(|e| {
            EnvLayerError::LayerLoad {
                layer: origin.to_string(),
                detail: e.to_string(),
            }
        })?;

        let Some(root @ Value::Object(_)) = root else {
            return Err(EnvLayerError::LayerLoad {
                layer: origin.to_string(),
                detail: "top-level JSON element must be an object".into(),
            });
        };

        let mut out = LayerEntries::new();
        Self::flatten(&root, &mut Vec::new(), &mut out, &mut HashSet::new(), origin)?;
        Ok(out)
    }

    fn extension(&self) -> &str {
        "json"
    }
}
