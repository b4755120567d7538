pub mod process_env;
pub mod user_secrets;
