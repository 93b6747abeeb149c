//! Network topology module.
//!
//! This module contains the switch and host registries, the adjacency
//! mapping that connects them, and read-only queries over the links.

pub mod types;
pub mod links;

// Re-export key types for easier access
pub use types::{Endpoint, Host, HostLink, InternalIp, Switch, TopologyConfig};
