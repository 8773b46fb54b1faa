//! Data model for a single render
//!
//! Everything here is built once per invocation from the three input documents
//! and never mutated afterwards:
//!
//! - [`DeploymentContext`] - deployment-wide property tree (plus embedded link wiring)
//! - [`JobSpec`] - the job's declared property schema
//! - [`InstanceInfo`] - raw identity/network record of an instance
//! - [`InstanceSpec`] - typed instance exposed to templates (self or link peer)
//! - [`Link`] - a consumed cross-job link with its instances and properties

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub mod context;
pub mod instance;
pub mod job_spec;
pub mod links;

pub use context::{ConsumedLink, DeploymentContext};
pub use instance::{DEFAULT_NETWORK, InstanceInfo, InstanceSpec, NetworkInterface};
pub use job_spec::JobSpec;
pub use links::{Link, build_links};

/// Arbitrarily nested mapping of string keys to scalars, sequences or mappings.
pub type PropertyTree = Map<String, Value>;

/// Deserialize a field whose explicit `null` means the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Follow a dotted path (`"redis.tls.port"`) through nested mappings.
///
/// Returns `None` as soon as a segment is missing or a non-mapping is traversed.
pub fn lookup_path<'a>(tree: &'a PropertyTree, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = tree.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
