//! Shared utilities: address helpers and topology checks.

pub mod ip_utils;
pub mod validation;

pub use ip_utils::{is_valid_ip, split_host_port};
pub use validation::{lint, TopologyWarning};
