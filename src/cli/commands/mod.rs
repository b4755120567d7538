pub mod chain;
pub mod get;
pub mod resolve;
pub mod secrets;
