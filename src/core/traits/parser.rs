use crate::core::errors::Result;
use crate::core::models::layer::LayerEntries;

/// Port for turning raw layer file content into flat key/value pairs.
pub trait LayerParser: Send + Sync {
    /// Parse raw file content. `origin` names the file in error messages.
    fn parse(&self, content: &str, origin: &str) -> Result<LayerEntries>;

    /// File extension this parser handles (e.g. `"json"`).
    fn extension(&self) -> &str;
}
