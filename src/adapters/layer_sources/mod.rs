pub mod file_layer_source;
