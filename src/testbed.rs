//! The loaded testbed: defaults and topology held together.
//!
//! A `Testbed` is built once at startup and handed to consumers by
//! reference. Nothing mutates it after construction.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde::Serialize;

use crate::defaults::ProvisioningDefaults;
use crate::topology::TopologyConfig;

/// Defaults document shipped with the crate.
pub const BUILTIN_DEFAULTS: &str = include_str!("../config/defaults.yaml");

/// Reference topology shipped with the crate.
pub const BUILTIN_TOPOLOGY: &str = include_str!("../config/topology.yaml");

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Testbed {
    pub defaults: ProvisioningDefaults,
    #[serde(flatten)]
    pub topology: TopologyConfig,
}

/// Counts describing the size of a testbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestbedSummary {
    pub switches: usize,
    pub hosts: usize,
    pub switch_links: usize,
    pub host_links: usize,
}

impl Testbed {
    pub fn new(defaults: ProvisioningDefaults, topology: TopologyConfig) -> Self {
        Self { defaults, topology }
    }

    /// The reference testbed: three switches, four hosts, one controller.
    pub fn builtin() -> Result<Self> {
        let defaults = crate::config_loader::parse_defaults(BUILTIN_DEFAULTS)
            .wrap_err("Failed to parse built-in defaults")?;
        let topology = crate::config_loader::parse_topology(BUILTIN_TOPOLOGY)
            .wrap_err("Failed to parse built-in topology")?;
        Ok(Self::new(defaults, topology))
    }

    pub fn summary(&self) -> TestbedSummary {
        TestbedSummary {
            switches: self.topology.switches.len(),
            hosts: self.topology.hosts.len(),
            switch_links: self.topology.switch_links().len(),
            host_links: self.topology.host_links().len(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).wrap_err("Failed to serialize testbed to YAML")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("Failed to serialize testbed to JSON")
    }
}
