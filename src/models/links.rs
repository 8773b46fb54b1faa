//! Link model builder.
//!
//! Turns the raw consumes entries of the deployment context into typed [`Link`]s.
//! An entry without instances is "declared but not yet satisfied" and produces no
//! link at all.

use serde::{Deserialize, Serialize};

use super::PropertyTree;
use super::context::ConsumedLink;
use super::instance::InstanceSpec;

/// A consumed cross-job link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Unique name within the consumed links
    pub name: String,
    /// Group-level resolvable address
    pub address: Option<String>,
    /// Peer instances, in document order
    pub instances: Vec<InstanceSpec>,
    /// Properties exposed by the producing job
    pub properties: PropertyTree,
}

/// Build links from raw consumes entries, preserving their order.
///
/// Name uniqueness is a property of the source mapping and is not re-checked.
pub fn build_links(consumed: &[ConsumedLink]) -> Vec<Link> {
    consumed
        .iter()
        .filter_map(|raw| {
            if raw.instances.is_empty() {
                tracing::debug!("Skipping link '{}': no instances", raw.name);
                return None;
            }

            let instances = raw.instances.iter().map(InstanceSpec::for_link_peer).collect();
            Some(Link {
                name: raw.name.clone(),
                address: raw.address.clone(),
                instances,
                properties: raw.properties.clone(),
            })
        })
        .collect()
}
