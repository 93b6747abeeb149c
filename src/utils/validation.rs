//! Topology usage checks.
//!
//! The loaders accept any well-formed document. This module reports the
//! things an operator usually wants to know before provisioning: dangling
//! names, addresses that do not parse, switches linked to themselves, and
//! switch pairs joined by more than one overlay link. Findings are warnings;
//! nothing here fails a load.

use crate::testbed::Testbed;
use crate::utils::ip_utils::{is_valid_ip, split_host_port};
use std::collections::BTreeMap;

/// A questionable entry in a testbed topology
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyWarning {
    #[error("Switch {switch} links to itself; both ends of the overlay would terminate at the same switch")]
    SelfLink { switch: String },
    #[error("Switches {a} and {b} are linked {count} times; a simple switch controller cannot handle two overlays between the same pair")]
    DuplicateOverlay { a: String, b: String, count: usize },
    #[error("Switch {referenced_by} links to unknown switch {name}")]
    UnknownSwitch { referenced_by: String, name: String },
    #[error("Topology lists links for {switch}, which is not in the switch registry")]
    UnlistedSwitch { switch: String },
    #[error("Switch {switch} connects unknown host {host}")]
    UnknownHost { switch: String, host: String },
    #[error("Switch {switch} gives host {host} port address '{port}', which is not an IP address")]
    InvalidPortAddress { switch: String, host: String, port: String },
    #[error("Switch {switch} has internal IP '{address}', which is not an IP address")]
    InvalidInternalIp { switch: String, address: String },
    #[error("Switch {switch} has controller address '{addr}', expected host:port")]
    InvalidController { switch: String, addr: String },
    #[error("Switch {switch} has no controller address")]
    MissingController { switch: String },
}

/// Check a testbed for usage problems.
///
/// Warnings come out pass by pass (self-links, duplicate overlays, adjacency
/// keys, switch links, host links, switch registry), each pass in
/// switch-name order.
pub fn lint(testbed: &Testbed) -> Vec<TopologyWarning> {
    let topology = &testbed.topology;
    let mut warnings = Vec::new();

    // Overlay links are undirected: sw1 -> sw2 and sw2 -> sw1 are the same pair
    let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for (from, to) in topology.switch_links() {
        if from == to {
            warnings.push(TopologyWarning::SelfLink { switch: from.to_string() });
            continue;
        }
        let key = if from < to { (from, to) } else { (to, from) };
        *pairs.entry(key).or_insert(0) += 1;
    }
    for ((a, b), count) in pairs {
        if count > 1 {
            warnings.push(TopologyWarning::DuplicateOverlay {
                a: a.to_string(),
                b: b.to_string(),
                count,
            });
        }
    }

    for switch in topology.topology.keys() {
        if !topology.switches.contains_key(switch) {
            warnings.push(TopologyWarning::UnlistedSwitch { switch: switch.clone() });
        }
    }

    for (from, to) in topology.switch_links() {
        if !topology.switches.contains_key(to) {
            warnings.push(TopologyWarning::UnknownSwitch {
                referenced_by: from.to_string(),
                name: to.to_string(),
            });
        }
    }

    for (switch, link) in topology.host_links() {
        if !topology.hosts.contains_key(&link.host) {
            warnings.push(TopologyWarning::UnknownHost {
                switch: switch.to_string(),
                host: link.host.clone(),
            });
        }
        if !is_valid_ip(&link.port) {
            warnings.push(TopologyWarning::InvalidPortAddress {
                switch: switch.to_string(),
                host: link.host.clone(),
                port: link.port.clone(),
            });
        }
    }

    for (name, switch) in &topology.switches {
        if let Some(int_ip) = &switch.int_ip {
            if !is_valid_ip(&int_ip.address) {
                warnings.push(TopologyWarning::InvalidInternalIp {
                    switch: name.clone(),
                    address: int_ip.address.clone(),
                });
            }
        }

        match topology.switch_controller(name) {
            Some(addr) if split_host_port(addr).is_none() => {
                warnings.push(TopologyWarning::InvalidController {
                    switch: name.clone(),
                    addr: addr.to_string(),
                });
            }
            Some(_) => {}
            None => warnings.push(TopologyWarning::MissingController { switch: name.clone() }),
        }
    }

    if warnings.is_empty() {
        log::info!("Topology check passed: {} switches, {} hosts", topology.switches.len(), topology.hosts.len());
    } else {
        log::info!("Topology check found {} warning(s)", warnings.len());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::parse_topology;
    use crate::defaults::ProvisioningDefaults;

    fn testbed(yaml: &str) -> Testbed {
        Testbed::new(ProvisioningDefaults::default(), parse_topology(yaml).unwrap())
    }

    #[test]
    fn test_builtin_is_clean() {
        let testbed = Testbed::builtin().unwrap();
        assert_eq!(lint(&testbed), vec![]);
    }

    #[test]
    fn test_duplicate_overlay_either_direction() {
        let testbed = testbed(
            r#"
contr_addr: "10.2.0.19:6633"
switches: { sw1: {}, sw2: {}, sw3: {} }
topology:
  sw1: [sw2]
  sw2: [sw1, sw3]
  sw3: [sw2, sw2]
"#,
        );
        assert_eq!(
            lint(&testbed),
            vec![
                TopologyWarning::DuplicateOverlay { a: "sw1".into(), b: "sw2".into(), count: 2 },
                TopologyWarning::DuplicateOverlay { a: "sw2".into(), b: "sw3".into(), count: 3 },
            ]
        );
    }

    #[test]
    fn test_self_link() {
        let testbed = testbed(
            r#"
contr_addr: "10.2.0.19:6633"
switches: { sw1: {}, sw2: {} }
topology:
  sw1: [sw1, sw2]
  sw2: [sw2, sw2]
"#,
        );
        let warnings = lint(&testbed);
        assert_eq!(
            warnings,
            vec![
                TopologyWarning::SelfLink { switch: "sw1".into() },
                TopologyWarning::SelfLink { switch: "sw2".into() },
                TopologyWarning::SelfLink { switch: "sw2".into() },
            ]
        );
        assert_eq!(
            warnings[0].to_string(),
            "Switch sw1 links to itself; both ends of the overlay would terminate at the same switch"
        );
    }

    #[test]
    fn test_dangling_names() {
        let testbed = testbed(
            r#"
contr_addr: "10.2.0.19:6633"
switches: { sw1: {} }
hosts: { h1: {} }
topology:
  sw1:
    - sw5
    - [h1, 192.168.200.10]
    - [h2, 192.168.200.11]
  sw6: []
"#,
        );
        assert_eq!(
            lint(&testbed),
            vec![
                TopologyWarning::UnlistedSwitch { switch: "sw6".into() },
                TopologyWarning::UnknownSwitch { referenced_by: "sw1".into(), name: "sw5".into() },
                TopologyWarning::UnknownHost { switch: "sw1".into(), host: "h2".into() },
            ]
        );
    }

    #[test]
    fn test_bad_addresses() {
        let testbed = testbed(
            r#"
switches:
  sw1: { contr_addr: "10.2.0.19", int_ip: [p1, not-an-ip] }
  sw2: {}
hosts: { h1: {} }
topology:
  sw2:
    - [h1, 192.168.200]
"#,
        );
        let warnings = lint(&testbed);
        assert_eq!(
            warnings,
            vec![
                TopologyWarning::InvalidPortAddress {
                    switch: "sw2".into(),
                    host: "h1".into(),
                    port: "192.168.200".into(),
                },
                TopologyWarning::InvalidInternalIp { switch: "sw1".into(), address: "not-an-ip".into() },
                TopologyWarning::InvalidController { switch: "sw1".into(), addr: "10.2.0.19".into() },
                TopologyWarning::MissingController { switch: "sw2".into() },
            ]
        );
        assert_eq!(
            warnings[3].to_string(),
            "Switch sw2 has no controller address"
        );
    }
}
