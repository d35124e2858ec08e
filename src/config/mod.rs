mod r#impl;
mod structs;
pub mod validators;

pub use r#impl::{get_config, init_config, init_config_from, set_config};
pub use structs::*;
pub use validators::{parse_timezone, validate};
