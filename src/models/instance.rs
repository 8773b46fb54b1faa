//! Instance records and the typed instance entity exposed to templates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::null_as_default;

/// Logical network name the self instance's interface is published under.
pub const DEFAULT_NETWORK: &str = "default";

/// Raw identity/network record of one instance.
///
/// This is the shape of the instance document and of every entry in a consumed
/// link's `instances` list. Missing or `null` fields read as empty/zero/false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInfo {
    /// Resolvable DNS address of the instance
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Availability zone
    #[serde(default, deserialize_with = "null_as_default")]
    pub az: String,
    /// Whether this is the bootstrap instance of its group
    #[serde(default, deserialize_with = "null_as_default")]
    pub bootstrap: bool,
    /// Deployment name
    #[serde(default)]
    pub deployment: Option<String>,
    /// Instance id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Index within the instance group
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: i64,
    /// IP address
    #[serde(default)]
    pub ip: Option<String>,
    /// Instance group name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A network interface of the self instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub ip: Option<String>,
    /// Always the instance's own `address`
    pub dns_record_name: String,
}

/// Typed instance as seen by templates, either the self instance or a link peer.
///
/// `deployment` and `networks` are only ever set on the self instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSpec {
    pub address: String,
    pub az: String,
    pub bootstrap: bool,
    pub deployment: Option<String>,
    pub id: String,
    pub index: i64,
    pub ip: Option<String>,
    pub name: String,
    pub networks: Option<BTreeMap<String, NetworkInterface>>,
}

impl InstanceSpec {
    /// Build the self instance: a field-for-field copy plus one synthesized
    /// interface under [`DEFAULT_NETWORK`].
    ///
    /// No validation is done on `ip` or `address`; whatever the document holds
    /// ends up in the template.
    pub fn for_self(info: &InstanceInfo) -> Self {
        let interface = NetworkInterface {
            ip: info.ip.clone(),
            dns_record_name: info.address.clone(),
        };

        Self {
            address: info.address.clone(),
            az: info.az.clone(),
            bootstrap: info.bootstrap,
            deployment: info.deployment.clone(),
            id: info.id.clone(),
            index: info.index,
            ip: info.ip.clone(),
            name: info.name.clone(),
            networks: Some(BTreeMap::from([(DEFAULT_NETWORK.to_string(), interface)])),
        }
    }

    /// Build a link peer instance. Only address, az, bootstrap, id, index and
    /// name are carried over.
    pub fn for_link_peer(info: &InstanceInfo) -> Self {
        Self {
            address: info.address.clone(),
            az: info.az.clone(),
            bootstrap: info.bootstrap,
            id: info.id.clone(),
            index: info.index,
            name: info.name.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_info() -> InstanceInfo {
        InstanceInfo {
            address: "foo.deadbeef.com".to_string(),
            az: "myaz".to_string(),
            bootstrap: true,
            deployment: Some("mydeployment".to_string()),
            id: "005443".to_string(),
            index: 123,
            ip: Some("256.256.256.256".to_string()),
            name: "foo".to_string(),
        }
    }

    #[test]
    fn test_instance_info_defaults_missing_and_null_fields() {
        let info: InstanceInfo =
            serde_json::from_value(json!({"address": "a.b", "az": null, "index": 2})).unwrap();

        assert_eq!(info.address, "a.b");
        assert_eq!(info.az, "");
        assert_eq!(info.index, 2);
        assert!(!info.bootstrap);
        assert_eq!(info.ip, None);
        assert_eq!(info.deployment, None);
    }

    #[test]
    fn test_self_instance_copies_fields() {
        let info = sample_info();
        let spec = InstanceSpec::for_self(&info);

        assert_eq!(spec.address, info.address);
        assert_eq!(spec.az, info.az);
        assert_eq!(spec.bootstrap, info.bootstrap);
        assert_eq!(spec.deployment, info.deployment);
        assert_eq!(spec.id, info.id);
        assert_eq!(spec.index, info.index);
        assert_eq!(spec.ip, info.ip);
        assert_eq!(spec.name, info.name);
    }

    #[test]
    fn test_self_instance_default_network() {
        let spec = InstanceSpec::for_self(&sample_info());
        let networks = spec.networks.as_ref().unwrap();

        assert_eq!(networks.len(), 1);
        let default = &networks[DEFAULT_NETWORK];
        assert_eq!(default.dns_record_name, spec.address);
        assert_eq!(default.ip.as_deref(), Some("256.256.256.256"));
    }

    #[test]
    fn test_self_instance_without_ip() {
        let info = InstanceInfo {
            address: "x.internal".to_string(),
            ..InstanceInfo::default()
        };
        let spec = InstanceSpec::for_self(&info);
        let networks = spec.networks.unwrap();
        let default = &networks[DEFAULT_NETWORK];

        assert_eq!(default.ip, None);
        assert_eq!(default.dns_record_name, "x.internal");
    }

    #[test]
    fn test_link_peer_drops_self_only_fields() {
        let spec = InstanceSpec::for_link_peer(&sample_info());

        assert_eq!(spec.address, "foo.deadbeef.com");
        assert_eq!(spec.index, 123);
        assert!(spec.bootstrap);
        assert_eq!(spec.deployment, None);
        assert_eq!(spec.ip, None);
        assert_eq!(spec.networks, None);
    }
}
