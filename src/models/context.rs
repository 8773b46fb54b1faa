//! Deployment context: the property tree and the link wiring embedded in it.
//!
//! Consumed links live at a fixed location inside the property tree:
//!
//! ```yaml
//! properties:
//!   bosh_containerization:
//!     consumes:
//!       db:
//!         address: db.service.internal
//!         properties: { port: 5432 }
//!         instances:
//!           - { address: db-0.db.internal, az: z1, id: abc, index: 0, name: db }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::instance::InstanceInfo;
use super::{PropertyTree, null_as_default};

/// Property path segments leading to the consumed-links mapping.
pub const CONSUMES_PATH: [&str; 3] = ["properties", "bosh_containerization", "consumes"];

/// Deployment-wide evaluation context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentContext {
    /// Property tree handed to templates; empty when the document has none
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PropertyTree,
}

/// One raw entry of the consumes mapping, before it becomes a [`super::Link`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumedLink {
    /// Key of the entry in the consumes mapping
    #[serde(skip)]
    pub name: String,
    /// Group-level resolvable address
    #[serde(default)]
    pub address: Option<String>,
    /// Properties exposed by the producing job
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PropertyTree,
    /// Raw instance records
    #[serde(default, deserialize_with = "null_as_default")]
    pub instances: Vec<InstanceInfo>,
}

impl DeploymentContext {
    /// Create a context from an already-built property tree.
    pub fn new(properties: PropertyTree) -> Self {
        Self {
            properties,
        }
    }

    /// Raw consumes entries in document order.
    ///
    /// A missing (or `null`) segment anywhere on the
    /// `properties.bosh_containerization.consumes` path means no links.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error when an entry does not have the
    /// `{address, properties, instances}` shape.
    pub fn consumed_links(&self) -> Result<Vec<ConsumedLink>, serde_json::Error> {
        let Some(consumes) = self.consumes_value() else {
            tracing::debug!("No consumed links in deployment context");
            return Ok(Vec::new());
        };

        let Some(entries) = consumes.as_object() else {
            return Err(serde::de::Error::custom(format!(
                "'{}' must be a mapping of link names",
                CONSUMES_PATH.join(".")
            )));
        };

        entries
            .iter()
            .map(|(name, raw)| {
                let mut link: ConsumedLink = if raw.is_null() {
                    ConsumedLink::default()
                } else {
                    serde_json::from_value(raw.clone())?
                };
                link.name.clone_from(name);
                Ok::<_, serde_json::Error>(link)
            })
            .collect()
    }

    fn consumes_value(&self) -> Option<&Value> {
        let [_, containerization, consumes] = CONSUMES_PATH;
        let value = self.properties.get(containerization)?.as_object()?.get(consumes)?;
        if value.is_null() {
            None
        } else {
            Some(value)
        }
    }
}
