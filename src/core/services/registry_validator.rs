use std::collections::HashSet;

use crate::core::errors::{EnvLayerError, Result};
use crate::core::models::fold_case;

/// Check that no two environment names match case-insensitively.
///
/// An empty collection is valid: no declared environments means flat mode.
pub fn validate<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(fold_case(name)) {
            return Err(EnvLayerError::DuplicateEnvironment {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_pass() {
        assert!(validate(["Production", "PPE", "Development"]).is_ok());
    }

    #[test]
    fn empty_collection_passes() {
        assert!(validate(std::iter::empty()).is_ok());
    }

    #[test]
    fn exact_duplicate_fails() {
        let err = validate(["PPE", "Production", "PPE"]).unwrap_err();

        assert!(matches!(err, EnvLayerError::DuplicateEnvironment { ref name } if name == "PPE"));
    }

    #[test]
    fn duplicate_in_any_case_fails() {
        for pair in [["dev", "DEV"], ["Dev", "dEv"], ["STAGING", "staging"]] {
            assert!(
                matches!(validate(pair), Err(EnvLayerError::DuplicateEnvironment { .. })),
                "{pair:?} should be rejected"
            );
        }
    }
}
