pub mod layer_sources;
pub mod parsers;
pub mod secret_stores;
pub mod settings;
