//! File system helpers for the render pipeline
//!
//! - [`dirs`] - idempotent directory creation for output paths
//! - [`formats`] - reading text files and YAML/JSON input documents
//!
//! All helpers attach a [`crate::core::FileOperationError`] context to I/O failures
//! so the caller can report which path and operation failed.

pub mod dirs;
pub mod formats;

pub use dirs::{ensure_dir, ensure_parent_dir};
pub use formats::{parse_yaml_str, read_text_file, read_yaml_document};
