//! Core error types shared by every stage of the render pipeline
//!
//! - [`RenderError`] enumerates the failure modes (parse, not found, template, output)
//! - [`ErrorContext`] adds user-facing details and suggestions for CLI display
//! - [`FileOperationError`] wraps `std::io::Error` with the operation and path that failed
//!
//! Every error is fatal: the pipeline is single-shot and callers re-run it from scratch.

pub mod error;
pub mod file_error;

pub use error::{DocumentKind, ErrorContext, RenderError, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
