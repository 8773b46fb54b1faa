//! Context loader.

use std::path::Path;

use super::load_document;
use crate::core::error::{DocumentKind, RenderError};
use crate::models::{ConsumedLink, DeploymentContext};

/// The parsed context document.
#[derive(Debug, Clone, Default)]
pub struct LoadedContext {
    /// Property tree (never absent)
    pub context: DeploymentContext,
    /// Raw `properties.bosh_containerization.consumes` entries, empty when the path is absent
    pub consumes: Vec<ConsumedLink>,
}

/// Load the deployment context and extract its consumed-link wiring.
///
/// # Errors
///
/// - [`RenderError::NotFound`] if `path` does not exist
/// - [`RenderError::ParseError`] if the document or its consumes section is malformed
pub fn load_context(path: &Path) -> Result<LoadedContext, RenderError> {
    let context: DeploymentContext = load_document(path, DocumentKind::Context)?;

    let consumes = context.consumed_links().map_err(|e| RenderError::ParseError {
        kind: DocumentKind::Context,
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!(
        "Loaded context {}: {} top-level properties, {} consumed link(s)",
        path.display(),
        context.properties.len(),
        consumes.len()
    );

    Ok(LoadedContext {
        context,
        consumes,
    })
}
