//! Reading text and structured-data input documents.
//!
//! Every input document (context, job spec, instance) is YAML; JSON is accepted
//! too since it is a subset of YAML. Documents are parsed into a generic
//! [`serde_json::Value`] tree, which is what the template engine consumes.

use crate::core::error::{DocumentKind, RenderError};
use crate::core::file_error::{FileOperation, FileOperationError, FileResultExt};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads a text file with file-operation context attached to any failure.
pub fn read_text_file(path: &Path, purpose: &str) -> Result<String, FileOperationError> {
    fs::read_to_string(path).with_file_context(
        FileOperation::Read,
        path,
        purpose,
        "utils::fs::formats::read_text_file",
    )
}

/// Parses YAML (or JSON) text into a generic value tree.
///
/// An empty document yields [`Value::Null`].
pub fn parse_yaml_str(content: &str) -> Result<Value, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(content)
}

/// Reads and parses one of the pipeline's input documents.
///
/// # Errors
///
/// - [`RenderError::NotFound`] when the path does not exist
/// - [`RenderError::ReadFailed`] when it exists but cannot be read
/// - [`RenderError::ParseError`] when the content is not well-formed YAML
pub fn read_yaml_document(path: &Path, kind: DocumentKind) -> Result<Value, RenderError> {
    let content = read_text_file(path, &format!("loading {kind} document"))
        .map_err(|e| RenderError::from_read_failure(kind, &e))?;

    parse_yaml_str(&content).map_err(|e| RenderError::ParseError {
        kind,
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_read_yaml_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.yml");
        fs::write(&path, "properties:\n  foo: bar\n  ports: [1, 2]\n").unwrap();

        let value = read_yaml_document(&path, DocumentKind::Context).unwrap();
        assert_eq!(value, json!({"properties": {"foo": "bar", "ports": [1, 2]}}));
    }

    #[test]
    fn test_read_json_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");
        fs::write(&path, r#"{"address": "a.b.c", "index": 3}"#).unwrap();

        let value = read_yaml_document(&path, DocumentKind::Instance).unwrap();
        assert_eq!(value["index"], json!(3));
    }

    #[test]
    fn test_empty_document_is_null() {
        assert_eq!(parse_yaml_str("   \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");

        let error = read_yaml_document(&path, DocumentKind::JobSpec).unwrap_err();
        assert!(matches!(
            error,
            RenderError::NotFound {
                kind: DocumentKind::JobSpec,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "properties: [unclosed\n").unwrap();

        let error = read_yaml_document(&path, DocumentKind::Context).unwrap_err();
        match error {
            RenderError::ParseError {
                kind,
                path: reported,
                ..
            } => {
                assert_eq!(kind, DocumentKind::Context);
                assert!(reported.ends_with("bad.yml"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
