//! Shared utilities
//!
//! - [`fs`] - directory creation and input document reading

pub mod fs;

pub use fs::{ensure_dir, ensure_parent_dir, read_text_file, read_yaml_document};
