mod config_gen;
mod hash_password;

pub use config_gen::config_generate;
pub use hash_password::run_hash_password;
