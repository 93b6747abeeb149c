//! Read-only queries over the adjacency mapping.

use crate::topology::types::{Endpoint, HostLink, TopologyConfig};

impl TopologyConfig {
    /// Adjacency list of `switch`, or an empty slice if it has none.
    pub fn endpoints(&self, switch: &str) -> &[Endpoint] {
        self.topology.get(switch).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Switch-to-switch links as `(declaring switch, peer switch)` pairs.
    ///
    /// Ordered by declaring switch name, then by position in its list.
    pub fn switch_links(&self) -> Vec<(&str, &str)> {
        self.topology
            .iter()
            .flat_map(|(switch, endpoints)| {
                endpoints
                    .iter()
                    .filter_map(move |endpoint| endpoint.switch_name().map(|peer| (switch.as_str(), peer)))
            })
            .collect()
    }

    /// Host connections with the switch that declares them.
    pub fn host_links(&self) -> Vec<(&str, &HostLink)> {
        self.topology
            .iter()
            .flat_map(|(switch, endpoints)| {
                endpoints
                    .iter()
                    .filter_map(move |endpoint| endpoint.host_link().map(|link| (switch.as_str(), link)))
            })
            .collect()
    }

    /// Controller address of `switch`, falling back to the topology-wide
    /// address. `None` if neither is set.
    pub fn switch_controller(&self, switch: &str) -> Option<&str> {
        self.switches
            .get(switch)
            .and_then(|sw| sw.contr_addr.as_deref())
            .or(self.contr_addr.as_deref())
    }
}
