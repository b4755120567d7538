pub mod static_store;
