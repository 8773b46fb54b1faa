//! Job spec loader.

use std::path::Path;

use super::load_document;
use crate::core::error::{DocumentKind, RenderError};
use crate::models::JobSpec;

/// Load the job spec. A missing `properties` key reads as an empty schema.
///
/// # Errors
///
/// - [`RenderError::NotFound`] if `path` does not exist
/// - [`RenderError::ParseError`] if the document is malformed
pub fn load_job_spec(path: &Path) -> Result<JobSpec, RenderError> {
    let spec: JobSpec = load_document(path, DocumentKind::JobSpec)?;
    tracing::debug!(
        "Loaded job spec {} ({} declared properties)",
        spec.name.as_deref().unwrap_or("<unnamed>"),
        spec.properties.len()
    );
    Ok(spec)
}
