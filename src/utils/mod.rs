pub mod ip;
pub mod password;

pub use ip::{forwarded_for, resolve_client_address, strip_mapped_ipv4_prefix};
