use std::path::{Path, PathBuf};

use crate::adapters::parsers::json_parser::JsonLayerParser;
use crate::core::errors::{EnvLayerError, Result};
use crate::core::models::layer::LayerEntries;
use crate::core::traits::layer_source::SettingsProvider;
use crate::core::traits::parser::LayerParser;

const SECRETS_FILE: &str = "secrets.json";

/// Per-user secrets kept outside the project tree, keyed by a secrets id.
///
/// Location:
/// - Windows: `%APPDATA%\Microsoft\UserSecrets\<id>\secrets.json`
/// - elsewhere: `~/.microsoft/usersecrets/<id>/secrets.json`
pub struct UserSecretsSettings {
    path: PathBuf,
}

impl UserSecretsSettings {
    /// Locate the secrets file for `secrets_id` in the user's profile.
    pub fn for_id(secrets_id: &str) -> Result<Self> {
        if secrets_id.trim().is_empty() {
            return Err(EnvLayerError::MissingArgument {
                name: "user_secrets_id",
            });
        }
        let root = secrets_root().ok_or_else(|| EnvLayerError::InvalidConfig {
            detail: "cannot determine the user profile directory for user secrets".into(),
        })?;
        Ok(Self::at(root.join(secrets_id).join(SECRETS_FILE)))
    }

    /// Read secrets from an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(windows)]
fn secrets_root() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("Microsoft").join("UserSecrets"))
}

#[cfg(not(windows))]
fn secrets_root() -> Option<PathBuf> {
    dirs::home_dir().map(|d| d.join(".microsoft").join("usersecrets"))
}

impl SettingsProvider for UserSecretsSettings {
    fn load(&self) -> Result<Option<LayerEntries>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        JsonLayerParser
            .parse(&content, &self.path.display().to_string())
            .map(Some)
    }

    fn describe(&self) -> String {
        format!("user secrets at {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_flat_and_nested_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SECRETS_FILE);
        std::fs::write(
            &path,
            r#"{"KeyVaultAppId": "id", "AppConfig:AppSecret": "s", "Nested": {"Key": "v"}}"#,
        )
        .unwrap();

        let entries = UserSecretsSettings::at(&path).load().unwrap().unwrap();

        assert_eq!(entries.get("KeyVaultAppId").map(String::as_str), Some("id"));
        assert_eq!(entries.get("AppConfig:AppSecret").map(String::as_str), Some("s"));
        assert_eq!(entries.get("Nested:Key").map(String::as_str), Some("v"));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();

        let secrets = UserSecretsSettings::at(dir.path().join(SECRETS_FILE));

        assert!(secrets.load().unwrap().is_none());
    }

    #[test]
    fn path_ends_with_id_and_file() {
        let secrets = UserSecretsSettings::for_id("sample-app").unwrap();

        assert!(secrets.path().ends_with(Path::new("sample-app").join(SECRETS_FILE)));
    }

    #[test]
    fn blank_id_is_rejected() {
        assert!(UserSecretsSettings::for_id(" ").is_err());
    }
}
