//! Job spec: the property schema a job declares.
//!
//! ```yaml
//! name: redis
//! properties:
//!   redis.port:
//!     description: Port to listen on
//!     default: 6379
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{PropertyTree, null_as_default};

/// The job's declared property schema.
///
/// `properties` is never absent: a missing or `null` declaration reads as an
/// empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PropertyTree,
}

impl JobSpec {
    /// Declared default for a property, looked up by its full dotted name.
    pub fn default_for(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)?.as_object()?.get("default")
    }
}
