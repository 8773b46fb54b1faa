//! Loaders for the three input documents.
//!
//! - [`load_context`] - deployment context: property tree plus consumed-link wiring
//! - [`load_job_spec`] - job spec: declared property schema
//! - [`load_instance`] - this instance's identity/network record
//!
//! The loaders are independent of each other. All of them read YAML (or JSON),
//! treat an empty document as an empty mapping, and report failures as
//! [`RenderError::NotFound`] or [`RenderError::ParseError`] tagged with the
//! document kind and path.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

use crate::core::error::{DocumentKind, RenderError};
use crate::utils::fs::read_yaml_document;

mod context;
mod instance;
mod job_spec;

pub use context::{LoadedContext, load_context};
pub use instance::load_instance;
pub use job_spec::load_job_spec;

/// Read a document and deserialize its root mapping into `T`.
fn load_document<T>(path: &Path, kind: DocumentKind) -> Result<T, RenderError>
where
    T: DeserializeOwned + Default,
{
    let value = read_yaml_document(path, kind)?;
    from_document(value, path, kind)
}

fn from_document<T>(value: Value, path: &Path, kind: DocumentKind) -> Result<T, RenderError>
where
    T: DeserializeOwned + Default,
{
    let parse_error = |reason: String| RenderError::ParseError {
        kind,
        path: path.display().to_string(),
        reason,
    };

    match value {
        Value::Null => Ok(T::default()),
        Value::Object(_) => serde_json::from_value(value).map_err(|e| parse_error(e.to_string())),
        other => Err(parse_error(format!("expected a mapping at the document root, found {other}"))),
    }
}
