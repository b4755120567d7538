pub mod layer_source;
pub mod parser;
pub mod secret_store;
