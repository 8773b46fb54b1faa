//! Output writer.
//!
//! Writes rendered text to the destination in a fixed order: create the parent
//! directories, open (truncating), write everything, flush, then apply the final
//! permissions through the same handle. The file never becomes executable before
//! its content is complete, and the handle is dropped on every exit path.

use std::fs::{File, Permissions};
use std::io::Write;
use std::path::Path;

use crate::core::error::RenderError;
use crate::core::file_error::{FileOperation, FileOperationError, FileResultExt};
use crate::utils::fs::ensure_parent_dir;

pub mod permissions;

pub use permissions::{capture_source_permissions, is_executable_dir, target_permissions};

const CALLER: &str = "output::write_output";

/// Write `content` to `destination` and apply `source_permissions` (or the
/// `bin` override).
///
/// # Errors
///
/// [`RenderError::OutputWrite`] if the directory cannot be created, the file
/// cannot be opened or written, or the permissions cannot be applied.
pub fn write_output(
    destination: &Path,
    content: &str,
    source_permissions: &Permissions,
) -> Result<(), RenderError> {
    ensure_parent_dir(destination).map_err(|e| output_error(destination, &e))?;

    let permissions = target_permissions(destination, source_permissions);

    {
        let mut file = File::create(destination)
            .with_file_context(FileOperation::Write, destination, "opening output file", CALLER)
            .map_err(|e| RenderError::OutputWrite {
                path: destination.display().to_string(),
                reason: e.source.to_string(),
            })?;

        file.write_all(content.as_bytes())
            .and_then(|()| file.flush())
            .with_file_context(FileOperation::Write, destination, "writing rendered output", CALLER)
            .map_err(|e| output_error(destination, &e))?;

        file.set_permissions(permissions)
            .with_file_context(
                FileOperation::SetPermissions,
                destination,
                "applying output permissions",
                CALLER,
            )
            .map_err(|e| output_error(destination, &e))?;
    }

    tracing::info!("Wrote {} ({} bytes)", destination.display(), content.len());
    Ok(())
}

fn output_error(destination: &Path, error: &FileOperationError) -> RenderError {
    RenderError::OutputWrite {
        path: destination.display().to_string(),
        reason: format!("{} {} failed: {}", error.operation, error.file_path.display(), error.source),
    }
}
