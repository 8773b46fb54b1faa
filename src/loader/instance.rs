//! Instance loader.

use std::path::Path;

use super::load_document;
use crate::core::error::{DocumentKind, RenderError};
use crate::models::InstanceInfo;

/// Load this instance's identity/network record.
///
/// # Errors
///
/// - [`RenderError::NotFound`] if `path` does not exist
/// - [`RenderError::ParseError`] if the document is malformed or a field has the wrong type
pub fn load_instance(path: &Path) -> Result<InstanceInfo, RenderError> {
    let info: InstanceInfo = load_document(path, DocumentKind::Instance)?;
    tracing::debug!("Loaded instance {}/{} ({})", info.name, info.index, info.address);
    Ok(info)
}
