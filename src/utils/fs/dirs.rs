//! Directory creation helpers.

use crate::core::file_error::{FileOperation, FileOperationError, FileResultExt};
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and all missing ancestors.
///
/// Already-existing directories are not an error. A non-directory at `path`
/// surfaces as the `create_dir_all` failure.
///
/// # Examples
///
/// ```rust,no_run
/// use bosh_render::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> Result<(), bosh_render::core::FileOperationError> {
/// ensure_dir(Path::new("/var/vcap/jobs/redis/config"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<(), FileOperationError> {
    if path.is_dir() {
        return Ok(());
    }

    tracing::debug!("Creating directory {}", path.display());
    fs::create_dir_all(path).with_file_context(
        FileOperation::CreateDir,
        path,
        "creating output directory",
        "utils::fs::dirs::ensure_dir",
    )
}

/// Ensures the parent directory of a file path exists.
///
/// Paths without a parent (or with an empty one, like `"output"`) need nothing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), FileOperationError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}
