//! User credentials and default VM provisioning parameters.
//!
//! The defaults document is a flat mapping of strings. Values are taken
//! verbatim: nothing here checks that the auth URL parses, that credentials
//! are non-empty or that the key file exists. Fields missing from the document
//! take the shipped defaults.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Directory prefix of the private key path; the username follows it.
pub const KEY_PATH_PREFIX: &str = "/home/savitb/";

/// Suffix appended after the username to form the private key path.
pub const KEY_PATH_SUFFIX: &str = "/.ssh/id_rsa";

/// Scalar defaults used when provisioning testbed VMs.
///
/// `private_key_file` is not a field: it is computed from `username` on every
/// read, so a record built with [`ProvisioningDefaults::with_username`] never
/// carries a key path for a previous user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProvisioningDefaults {
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub auth_url: String,
    /// Prepended to instance names
    #[serde(deserialize_with = "null_as_empty")]
    pub instance_prefix: String,
    /// Key-pair name registered with the cloud
    #[serde(deserialize_with = "null_as_empty")]
    pub key_name: String,
    /// Used for nodes that do not name a region
    #[serde(deserialize_with = "null_as_empty")]
    pub region_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tenant_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub image_name: String,
    /// Used for nodes that do not name a flavor
    #[serde(deserialize_with = "null_as_empty")]
    pub flavor_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub sec_group_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub vm_user_name: String,
}

/// A field written as `~` or `null` is the empty string, not the text "null".
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Values supplied on the command line that replace fields of the loaded
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct DefaultsOverrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub tenant_name: Option<String>,
    pub region_name: Option<String>,
    pub key_name: Option<String>,
    pub instance_prefix: Option<String>,
}

impl DefaultsOverrides {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.tenant_name.is_none()
            && self.region_name.is_none()
            && self.key_name.is_none()
            && self.instance_prefix.is_none()
    }
}

impl ProvisioningDefaults {
    /// Path of the private key used to SSH into the VMs.
    ///
    /// Always `KEY_PATH_PREFIX + username + KEY_PATH_SUFFIX`, including for an
    /// empty username.
    pub fn private_key_file(&self) -> String {
        format!("{}{}{}", KEY_PATH_PREFIX, self.username, KEY_PATH_SUFFIX)
    }

    /// Return a copy of these defaults for another user.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Replace every field named in `overrides`.
    pub fn apply_overrides(mut self, overrides: &DefaultsOverrides) -> Self {
        if let Some(username) = &overrides.username {
            log::info!("Overriding username; private key path is now derived from '{}'", username);
            self.username = username.clone();
        }
        if let Some(password) = &overrides.password {
            log::debug!("Overriding password");
            self.password = password.clone();
        }
        if let Some(tenant) = &overrides.tenant_name {
            log::info!("Overriding tenant_name with '{}'", tenant);
            self.tenant_name = tenant.clone();
        }
        if let Some(region) = &overrides.region_name {
            log::info!("Overriding region_name with '{}'", region);
            self.region_name = region.clone();
        }
        if let Some(key_name) = &overrides.key_name {
            log::info!("Overriding key_name with '{}'", key_name);
            self.key_name = key_name.clone();
        }
        if let Some(prefix) = &overrides.instance_prefix {
            log::info!("Overriding instance_prefix with '{}'", prefix);
            self.instance_prefix = prefix.clone();
        }
        self
    }

    /// Cloud instance name for a switch or host.
    pub fn instance_name(&self, node: &str) -> String {
        format!("{}{}", self.instance_prefix, node)
    }
}

impl Default for ProvisioningDefaults {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            auth_url: "http://iamv3.savitestbed.ca:5000/v2.0/".to_string(),
            instance_prefix: String::new(),
            key_name: String::new(),
            region_name: String::new(),
            tenant_name: String::new(),
            image_name: "ECE1548.OFLab".to_string(),
            flavor_name: "m1.small".to_string(),
            sec_group_name: String::new(),
            vm_user_name: "ubuntu".to_string(),
        }
    }
}

/// Serialized shape of the defaults, with the key path written out.
#[derive(Serialize)]
struct DefaultsView<'a> {
    username: &'a str,
    password: &'a str,
    auth_url: &'a str,
    instance_prefix: &'a str,
    key_name: &'a str,
    private_key_file: String,
    region_name: &'a str,
    tenant_name: &'a str,
    image_name: &'a str,
    flavor_name: &'a str,
    sec_group_name: &'a str,
    vm_user_name: &'a str,
}

impl Serialize for ProvisioningDefaults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DefaultsView {
            username: &self.username,
            password: &self.password,
            auth_url: &self.auth_url,
            instance_prefix: &self.instance_prefix,
            key_name: &self.key_name,
            private_key_file: self.private_key_file(),
            region_name: &self.region_name,
            tenant_name: &self.tenant_name,
            image_name: &self.image_name,
            flavor_name: &self.flavor_name,
            sec_group_name: &self.sec_group_name,
            vm_user_name: &self.vm_user_name,
        }
        .serialize(serializer)
    }
}
