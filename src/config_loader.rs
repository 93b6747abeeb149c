use crate::defaults::ProvisioningDefaults;
use crate::testbed::{Testbed, BUILTIN_DEFAULTS, BUILTIN_TOPOLOGY};
use crate::topology::TopologyConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use std::fs::File;
use std::path::Path;

/// Parse a defaults document held in memory
pub fn parse_defaults(content: &str) -> Result<ProvisioningDefaults> {
    let defaults: ProvisioningDefaults =
        serde_yaml::from_str(content).wrap_err("Failed to parse defaults document")?;
    Ok(defaults)
}

/// Parse a topology document held in memory
pub fn parse_topology(content: &str) -> Result<TopologyConfig> {
    let topology: TopologyConfig =
        serde_yaml::from_str(content).wrap_err("Failed to parse topology document")?;
    Ok(topology)
}

/// Load the credentials and VM defaults from a YAML file.
///
/// Values are taken verbatim; an empty or malformed field is not an error.
pub fn load_defaults(path: &Path) -> Result<ProvisioningDefaults> {
    info!("Loading defaults from: {:?}", path);

    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open defaults file '{}'", path.display()))?;
    let defaults: ProvisioningDefaults = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse defaults file '{}'", path.display()))?;

    debug!("Private key file: {}", defaults.private_key_file());
    Ok(defaults)
}

/// Load the switch registry, host registry and adjacency mapping from a YAML
/// file.
///
/// References between the three collections are not checked.
pub fn load_topology(path: &Path) -> Result<TopologyConfig> {
    info!("Loading topology from: {:?}", path);

    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open topology file '{}'", path.display()))?;
    let topology: TopologyConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse topology file '{}'", path.display()))?;

    info!(
        "Loaded {} switches, {} hosts, {} adjacency entries",
        topology.switches.len(),
        topology.hosts.len(),
        topology.topology.len()
    );
    Ok(topology)
}

/// Load a testbed, using the built-in document for any path not given.
pub fn load_testbed(defaults_path: Option<&Path>, topology_path: Option<&Path>) -> Result<Testbed> {
    let defaults = match defaults_path {
        Some(path) => load_defaults(path)?,
        None => {
            info!("No defaults file given, using built-in defaults");
            parse_defaults(BUILTIN_DEFAULTS)?
        }
    };

    let topology = match topology_path {
        Some(path) => load_topology(path)?,
        None => {
            info!("No topology file given, using built-in topology");
            parse_topology(BUILTIN_TOPOLOGY)?
        }
    };

    Ok(Testbed::new(defaults, topology))
}
