//! # savitb - Defaults and topology loader for SAVI SDN testbeds
//!
//! This library describes a virtualized software-defined-networking testbed
//! as two YAML documents and loads them into typed, immutable structures for
//! an external provisioning tool.
//!
//! ## Overview
//!
//! - **Defaults**: user credentials and the VM parameters used when a node
//!   leaves them out (image, flavor, region, security group). The private key
//!   path is derived from the username on every read.
//! - **Topology**: a switch registry, a host registry, and an adjacency
//!   mapping from each switch to its links. A link is either another switch
//!   or a host attached at an internal port address, optionally through a
//!   named bridge.
//!
//! ## Architecture
//!
//! - `defaults`: `ProvisioningDefaults` and command-line overrides
//! - `topology`: switch, host and link types plus adjacency queries
//! - `config_loader`: one-shot loading of both documents
//! - `testbed`: the loaded pair, and the built-in reference testbed
//! - `utils`: address helpers and usage checks (`lint`)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use savitb::config_loader;
//! use std::path::Path;
//!
//! let testbed = config_loader::load_testbed(
//!     Some(Path::new("defaults.yaml")),
//!     Some(Path::new("topology.yaml")),
//! )?;
//!
//! for (switch, link) in testbed.topology.host_links() {
//!     println!("{} -> {} at {}", switch, link.host, link.port);
//! }
//! println!("key: {}", testbed.defaults.private_key_file());
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Topology Format
//!
//! ```yaml
//! contr_addr: "10.2.0.19:6633"
//!
//! switches:
//!   sw1: { region: CORE, flavor: m1.small, bridge_name: sw1_br, int_ip: [p1, 192.168.200.18] }
//!   sw2: { region: CORE, flavor: m1.small }
//!
//! hosts:
//!   h1: { region: CORE, flavor: m1.small }
//!   h2: { region: CORE, flavor: m1.small }
//!
//! topology:
//!   sw1:
//!     - [h1, 192.168.200.10, h1_br]
//!   sw2:
//!     - sw1
//!     - [h2, 192.168.200.11]
//! ```
//!
//! ## Error Handling
//!
//! Loading fails only when a file cannot be read or is not well-formed YAML
//! of the expected shape; such errors are `color_eyre` reports naming the
//! file. Field values are never validated on load. `utils::validation::lint`
//! reports questionable topologies as warnings.

pub mod config_loader;
pub mod defaults;
pub mod testbed;
pub mod topology;
pub mod utils;

pub use defaults::{DefaultsOverrides, ProvisioningDefaults};
pub use testbed::Testbed;
pub use topology::{Endpoint, Host, HostLink, Switch, TopologyConfig};
