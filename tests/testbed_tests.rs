use std::io::Write;
use tempfile::NamedTempFile;

use savitb::config_loader::{load_defaults, load_testbed, load_topology};
use savitb::defaults::{KEY_PATH_PREFIX, KEY_PATH_SUFFIX};
use savitb::topology::{Endpoint, HostLink};
use savitb::utils::{lint, TopologyWarning};
use savitb::{ProvisioningDefaults, Testbed};

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

/// The private key path is prefix + username + suffix for any username
#[test]
fn test_private_key_file_for_any_username() {
    for username in ["", "alice", "user1", "with space", "ünïcode"] {
        let defaults = ProvisioningDefaults::default().with_username(username);
        assert_eq!(
            defaults.private_key_file(),
            format!("{}{}{}", KEY_PATH_PREFIX, username, KEY_PATH_SUFFIX)
        );
    }

    let defaults = ProvisioningDefaults::default().with_username("alice");
    assert_eq!(defaults.private_key_file(), "/home/savitb/alice/.ssh/id_rsa");
}

/// Every defaults field is present and a string after load, even from an
/// empty document
#[test]
fn test_defaults_fields_after_load() {
    let file = write_temp("{}\n");
    let defaults = load_defaults(file.path()).unwrap();

    let value = serde_json::to_value(&defaults).unwrap();
    for field in [
        "username",
        "password",
        "auth_url",
        "instance_prefix",
        "key_name",
        "private_key_file",
        "region_name",
        "tenant_name",
        "image_name",
        "flavor_name",
        "sec_group_name",
        "vm_user_name",
    ] {
        assert!(value[field].is_string(), "field {} should be a string", field);
    }
}

#[test]
fn test_reference_topology_from_file() {
    let file = write_temp(savitb::testbed::BUILTIN_TOPOLOGY);
    let topology = load_topology(file.path()).unwrap();

    assert_eq!(
        topology.endpoints("sw1"),
        &[
            Endpoint::HostLink(HostLink::new("h1", "192.168.200.10", Some("h1_br"))),
            Endpoint::HostLink(HostLink::new("h4", "192.168.200.13", None)),
        ]
    );

    assert!(topology.switches["sw2"].bridge_name.is_none());
    assert!(topology.switches["sw1"].bridge_name.is_some());
    assert!(topology.switches["sw3"].bridge_name.is_some());

    assert_eq!(topology.switch_links(), vec![("sw2", "sw1"), ("sw3", "sw2")]);
}

#[test]
fn test_overridden_username_changes_key_path() {
    let defaults_file = write_temp("username: \"alice\"\nkey_name: \"alice-key\"\n");
    let testbed = load_testbed(Some(defaults_file.path()), None).unwrap();
    assert_eq!(testbed.defaults.private_key_file(), "/home/savitb/alice/.ssh/id_rsa");

    let overrides = savitb::DefaultsOverrides {
        username: Some("bob".to_string()),
        ..Default::default()
    };
    let defaults = testbed.defaults.clone().apply_overrides(&overrides);
    assert_eq!(defaults.private_key_file(), "/home/savitb/bob/.ssh/id_rsa");
    assert_eq!(defaults.key_name, "alice-key");
}

#[test]
fn test_loader_accepts_what_lint_reports() {
    let topology_file = write_temp(
        r#"
contr_addr: "10.2.0.19:6633"
switches:
  sw1: { region: CORE, flavor: m1.small }
  sw2: { region: CORE, flavor: m1.small }
hosts:
  h1: { region: CORE, flavor: m1.small }
topology:
  sw1:
    - sw2
    - [h1, 192.168.200.10]
  sw2:
    - sw1
    - [h7, 192.168.200.17]
"#,
    );

    let testbed = load_testbed(None, Some(topology_file.path())).unwrap();
    assert_eq!(testbed.summary().switch_links, 2);

    assert_eq!(
        lint(&testbed),
        vec![
            TopologyWarning::DuplicateOverlay { a: "sw1".into(), b: "sw2".into(), count: 2 },
            TopologyWarning::UnknownHost { switch: "sw2".into(), host: "h7".into() },
        ]
    );
}

#[test]
fn test_nodes_without_region_use_defaults() {
    let defaults_file = write_temp("region_name: \"EDGE-TR-1\"\nflavor_name: \"m1.medium\"\n");
    let topology_file = write_temp(
        r#"
switches:
  sw1: { contr_addr: "10.2.0.19:6633" }
hosts:
  h1: { region: CORE }
"#,
    );

    let testbed = load_testbed(Some(defaults_file.path()), Some(topology_file.path())).unwrap();
    let sw1 = &testbed.topology.switches["sw1"];
    let h1 = &testbed.topology.hosts["h1"];

    assert_eq!(sw1.region_or(&testbed.defaults), "EDGE-TR-1");
    assert_eq!(sw1.flavor_or(&testbed.defaults), "m1.medium");
    assert_eq!(h1.region_or(&testbed.defaults), "CORE");
    assert_eq!(h1.flavor_or(&testbed.defaults), "m1.medium");
}

#[test]
fn test_yaml_output_reloads() {
    let testbed = Testbed::builtin().unwrap();
    let yaml = testbed.to_yaml().unwrap();

    let file = write_temp(&yaml);
    let topology = load_topology(file.path()).unwrap();
    assert_eq!(topology, testbed.topology);

    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["defaults"]["private_key_file"].as_str(), Some("/home/savitb//.ssh/id_rsa"));
    let defaults: ProvisioningDefaults = serde_yaml::from_value(value["defaults"].clone()).unwrap();
    assert_eq!(defaults, testbed.defaults);
}
