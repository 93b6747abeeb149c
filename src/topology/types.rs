//! Topology type definitions.
//!
//! Switches and hosts are independent registries keyed by name. The
//! adjacency mapping refers to them by name only; nothing here checks that
//! a referenced switch or host exists (see [`crate::utils::validation`]).

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::defaults::ProvisioningDefaults;

/// Internal IP assignment of a switch: interface name and address.
///
/// Written as a two-element sequence, e.g. `[p1, 192.168.200.18]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct InternalIp {
    pub interface: String,
    pub address: String,
}

impl From<(String, String)> for InternalIp {
    fn from((interface, address): (String, String)) -> Self {
        Self { interface, address }
    }
}

impl From<InternalIp> for (String, String) {
    fn from(ip: InternalIp) -> Self {
        (ip.interface, ip.address)
    }
}

/// A virtual switch VM
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    /// Controller address as `host:port`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contr_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_ip: Option<InternalIp>,
}

impl Switch {
    /// Region of this switch, or the default region if it names none.
    pub fn region_or<'a>(&'a self, defaults: &'a ProvisioningDefaults) -> &'a str {
        self.region.as_deref().unwrap_or(&defaults.region_name)
    }

    /// Flavor of this switch, or the default flavor if it names none.
    pub fn flavor_or<'a>(&'a self, defaults: &'a ProvisioningDefaults) -> &'a str {
        self.flavor.as_deref().unwrap_or(&defaults.flavor_name)
    }
}

/// A host VM attached to the topology
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
}

impl Host {
    pub fn region_or<'a>(&'a self, defaults: &'a ProvisioningDefaults) -> &'a str {
        self.region.as_deref().unwrap_or(&defaults.region_name)
    }

    pub fn flavor_or<'a>(&'a self, defaults: &'a ProvisioningDefaults) -> &'a str {
        self.flavor.as_deref().unwrap_or(&defaults.flavor_name)
    }
}

/// Connection from a switch to a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HostLinkRepr", into = "HostLinkRepr")]
pub struct HostLink {
    pub host: String,
    /// Internal port address of the host
    pub port: String,
    pub bridge_name: Option<String>,
}

impl HostLink {
    pub fn new(host: impl Into<String>, port: impl Into<String>, bridge_name: Option<&str>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            bridge_name: bridge_name.map(str::to_string),
        }
    }
}

/// A name or address in an adjacency list.
///
/// YAML writes `10` and `"10"` differently; both are read as the string
/// `10`, as they are in the defaults document.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Scalar(String);

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Accepted document forms of a host connection.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum HostLinkRepr {
    Bridged(Scalar, Scalar, Scalar),
    Plain(Scalar, Scalar),
    Mapping {
        host: Scalar,
        port: Scalar,
        #[serde(default)]
        bridge_name: Option<Scalar>,
    },
}

impl From<HostLinkRepr> for HostLink {
    fn from(repr: HostLinkRepr) -> Self {
        match repr {
            HostLinkRepr::Bridged(host, port, bridge) => Self {
                host: host.0,
                port: port.0,
                bridge_name: Some(bridge.0),
            },
            HostLinkRepr::Plain(host, port) => Self { host: host.0, port: port.0, bridge_name: None },
            HostLinkRepr::Mapping { host, port, bridge_name } => Self {
                host: host.0,
                port: port.0,
                bridge_name: bridge_name.map(|b| b.0),
            },
        }
    }
}

impl From<HostLink> for HostLinkRepr {
    fn from(link: HostLink) -> Self {
        match link.bridge_name {
            Some(bridge) => HostLinkRepr::Bridged(Scalar(link.host), Scalar(link.port), Scalar(bridge)),
            None => HostLinkRepr::Plain(Scalar(link.host), Scalar(link.port)),
        }
    }
}

/// One entry in a switch's adjacency list.
///
/// A bare name links to another switch; a sequence or mapping attaches a
/// host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Endpoint {
    SwitchLink(String),
    HostLink(HostLink),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointRepr {
    SwitchLink(Scalar),
    HostLink(HostLink),
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match EndpointRepr::deserialize(deserializer)? {
            EndpointRepr::SwitchLink(name) => Endpoint::SwitchLink(name.0),
            EndpointRepr::HostLink(link) => Endpoint::HostLink(link),
        })
    }
}

impl Endpoint {
    /// Returns the peer switch name if this is a switch-to-switch link
    pub fn switch_name(&self) -> Option<&str> {
        match self {
            Self::SwitchLink(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the host connection if this attaches a host
    pub fn host_link(&self) -> Option<&HostLink> {
        match self {
            Self::HostLink(link) => Some(link),
            _ => None,
        }
    }
}

/// Switch registry, host registry and adjacency mapping.
///
/// Names are unique within each map. A name repeated in one mapping of the
/// document is not an error: the last entry replaces the earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Controller address used by switches that do not give their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contr_addr: Option<String>,
    #[serde(default)]
    pub switches: BTreeMap<String, Switch>,
    #[serde(default)]
    pub hosts: BTreeMap<String, Host>,
    #[serde(default)]
    pub topology: BTreeMap<String, Vec<Endpoint>>,
}
