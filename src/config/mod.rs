pub mod app_config;
pub mod host_context;
