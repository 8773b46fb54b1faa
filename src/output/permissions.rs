//! Permission policy for rendered files.
//!
//! The rule: a file whose parent directory is literally named `bin` becomes
//! `0755`; every other file gets the template source's own mode. This is a
//! path heuristic, nothing inspects the rendered content.

use std::fs::{self, Permissions};
use std::path::Path;

use crate::core::error::{DocumentKind, RenderError};
use crate::core::file_error::{FileOperation, FileResultExt};

/// Parent directory name that forces executable permissions.
pub const EXECUTABLE_DIR_NAME: &str = "bin";

/// Mode applied to files under an executable directory.
#[cfg(unix)]
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Capture the template source's permission bits.
///
/// Must run before the template is rendered so the destination mirrors the
/// source as it was at the start of the run.
///
/// # Errors
///
/// [`RenderError::NotFound`] with [`DocumentKind::Template`] if the template
/// does not exist.
pub fn capture_source_permissions(template_path: &Path) -> Result<Permissions, RenderError> {
    let metadata = fs::metadata(template_path)
        .with_file_context(
            FileOperation::Metadata,
            template_path,
            "capturing template permissions",
            "output::permissions::capture_source_permissions",
        )
        .map_err(|e| RenderError::from_read_failure(DocumentKind::Template, &e))?;

    Ok(permission_bits(metadata.permissions()))
}

/// Whether `destination` sits directly in a directory named `bin`.
pub fn is_executable_dir(destination: &Path) -> bool {
    destination
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|name| name == EXECUTABLE_DIR_NAME)
}

/// Final permissions for `destination` given the captured source permissions.
#[cfg(unix)]
pub fn target_permissions(destination: &Path, source: &Permissions) -> Permissions {
    use std::os::unix::fs::PermissionsExt;

    if is_executable_dir(destination) {
        tracing::debug!(
            "{} is in a '{}' directory, forcing mode {:o}",
            destination.display(),
            EXECUTABLE_DIR_NAME,
            EXECUTABLE_MODE
        );
        Permissions::from_mode(EXECUTABLE_MODE)
    } else {
        source.clone()
    }
}

/// Only the read-only flag exists off Unix, so the source's is carried over as-is.
#[cfg(not(unix))]
pub fn target_permissions(_destination: &Path, source: &Permissions) -> Permissions {
    source.clone()
}

/// Drop file-type bits so only the permission bits are re-applied.
#[cfg(unix)]
fn permission_bits(permissions: Permissions) -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    Permissions::from_mode(permissions.mode() & 0o7777)
}

#[cfg(not(unix))]
fn permission_bits(permissions: Permissions) -> Permissions {
    permissions
}
