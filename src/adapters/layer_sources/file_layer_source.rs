use std::path::{Path, PathBuf};

use crate::core::errors::{EnvLayerError, Result};
use crate::core::models::layer::{LayerEntries, LayerRequest};
use crate::core::traits::layer_source::LayerSource;
use crate::core::traits::parser::LayerParser;

/// File name stem shared by all layer files.
pub const LAYER_FILE_STEM: &str = "appsettings";

/// Layer source backed by files in one settings directory.
///
/// With the JSON parser, the base layer is `appsettings.json` and the
/// layer for environment `PPE` is `appsettings.PPE.json`. Every file is
/// optional.
pub struct FileLayerSource<P: LayerParser> {
    dir: PathBuf,
    parser: P,
}

impl<P: LayerParser> FileLayerSource<P> {
    pub fn new(dir: impl Into<PathBuf>, parser: P) -> Self {
        Self {
            dir: dir.into(),
            parser,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file name a request maps to.
    pub fn file_name(&self, request: &LayerRequest) -> String {
        let ext = self.parser.extension();
        match request {
            LayerRequest::Base => format!("{LAYER_FILE_STEM}.{ext}"),
            LayerRequest::Environment(name) => format!("{LAYER_FILE_STEM}.{name}.{ext}"),
        }
    }
}

impl<P: LayerParser> LayerSource for FileLayerSource<P> {
    fn try_load(&self, request: &LayerRequest) -> Result<Option<LayerEntries>> {
        let file_name = self.file_name(request);
        let path = self.dir.join(&file_name);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| EnvLayerError::LayerLoad {
            layer: file_name.clone(),
            detail: e.to_string(),
        })?;

        self.parser.parse(&content, &file_name).map(Some)
    }

    fn describe(&self) -> String {
        format!("{}/{LAYER_FILE_STEM}*.{}", self.dir.display(), self.parser.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::parsers::json_parser::JsonLayerParser;

    #[test]
    fn file_names_follow_convention() {
        let source = FileLayerSource::new(".", JsonLayerParser);

        assert_eq!(source.file_name(&LayerRequest::Base), "appsettings.json");
        assert_eq!(
            source.file_name(&LayerRequest::Environment("PPE".into())),
            "appsettings.PPE.json"
        );
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileLayerSource::new(dir.path(), JsonLayerParser);

        assert!(source.try_load(&LayerRequest::Base).unwrap().is_none());
    }

    #[test]
    fn existing_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("appsettings.Development.json"),
            r#"{"AppConfig": {"IntConfig": 7}}"#,
        )
        .unwrap();
        let source = FileLayerSource::new(dir.path(), JsonLayerParser);

        let entries = source
            .try_load(&LayerRequest::Environment("Development".into()))
            .unwrap()
            .unwrap();

        assert_eq!(entries.get("AppConfig:IntConfig").map(String::as_str), Some("7"));
    }

    #[test]
    fn malformed_file_names_the_layer() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("appsettings.json"), "{ not json").unwrap();
        let source = FileLayerSource::new(dir.path(), JsonLayerParser);

        let err = source.try_load(&LayerRequest::Base).unwrap_err();

        assert!(err.to_string().contains("appsettings.json"));
    }
}
