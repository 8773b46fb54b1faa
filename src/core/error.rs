//! Error handling for bosh-render
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`RenderError`]) so callers can match on the failure mode
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and suggestions for the CLI
//!
//! # Error Categories
//!
//! - **Parsing**: [`RenderError::ParseError`] for malformed YAML/JSON input documents
//! - **Missing inputs**: [`RenderError::NotFound`] for absent documents or template sources
//! - **Templates**: [`RenderError::TemplateEvaluation`] for anything the engine rejects
//! - **Output**: [`RenderError::OutputWrite`] when the destination cannot be prepared or written
//!
//! Every variant names the input it failed on through a [`DocumentKind`] or a path, so the
//! message printed by the binary always identifies which of the five arguments was at fault.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bosh_render::core::{DocumentKind, RenderError, user_friendly_error};
//!
//! let error = RenderError::NotFound {
//!     kind: DocumentKind::Template,
//!     path: "templates/config.yml.erb".to_string(),
//! };
//!
//! let ctx = user_friendly_error(error);
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use super::file_error::FileOperationError;

/// Which of the pipeline inputs or outputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// The deployment context document (properties and consumed links)
    Context,
    /// The job spec document (property schema)
    JobSpec,
    /// The instance document (identity and network metadata)
    Instance,
    /// The template source file
    Template,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Context => write!(f, "context"),
            DocumentKind::JobSpec => write!(f, "job spec"),
            DocumentKind::Instance => write!(f, "instance"),
            DocumentKind::Template => write!(f, "template"),
        }
    }
}

/// The main error type for rendering operations.
///
/// All variants are fatal to the invocation; nothing in the pipeline retries.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    /// A structured-data document could not be parsed
    #[error("Failed to parse {kind} file {path}: {reason}")]
    ParseError {
        /// Which input was being parsed
        kind: DocumentKind,
        /// Path of the document
        path: String,
        /// Parser message
        reason: String,
    },

    /// A required input document or template source does not exist
    #[error("Failed to read {kind} file {path}: file does not exist")]
    NotFound {
        /// Which input was missing
        kind: DocumentKind,
        /// Path that was looked up
        path: String,
    },

    /// An input exists but could not be read (permissions, encoding, ...)
    #[error("Failed to read {kind} file {path}: {reason}")]
    ReadFailed {
        /// Which input was being read
        kind: DocumentKind,
        /// Path of the input
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// The template engine rejected the template or failed while evaluating it
    #[error("Failed to render template {path}: {message}")]
    TemplateEvaluation {
        /// Template source path
        path: String,
        /// Engine message, surfaced as-is
        message: String,
    },

    /// The destination could not be created, written or chmod-ed
    #[error("failed to open output file {path}: {reason}")]
    OutputWrite {
        /// Destination path
        path: String,
        /// Underlying cause
        reason: String,
    },
}

impl RenderError {
    /// Classify an I/O failure on one of the input documents.
    ///
    /// `NotFound` maps to [`RenderError::NotFound`]; every other kind keeps its cause
    /// in [`RenderError::ReadFailed`].
    pub fn from_read_failure(kind: DocumentKind, error: &FileOperationError) -> Self {
        let path = error.file_path.display().to_string();
        match error.source.kind() {
            std::io::ErrorKind::NotFound => RenderError::NotFound {
                kind,
                path,
            },
            _ => RenderError::ReadFailed {
                kind,
                path,
                reason: error.source.to_string(),
            },
        }
    }
}

/// Error wrapper that adds user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: RenderError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no details or suggestion.
    #[must_use]
    pub const fn new(error: RenderError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Attach details and a suggestion tailored to the failure for CLI display.
#[must_use]
pub fn user_friendly_error(error: RenderError) -> ErrorContext {
    create_error_context(error)
}

/// Map each [`RenderError`] variant to tailored details and suggestions.
fn create_error_context(error: RenderError) -> ErrorContext {
    match &error {
        RenderError::ParseError {
            kind,
            ..
        } => {
            let suggestion = match kind {
                DocumentKind::Context => {
                    "The context document must be a YAML or JSON mapping with a top-level 'properties' key"
                }
                DocumentKind::JobSpec => {
                    "The job spec must be a YAML mapping; 'properties' maps property names to {default, description}"
                }
                DocumentKind::Instance => {
                    "The instance document must be a flat mapping with address, az, bootstrap, id, index, name, ip and deployment"
                }
                _ => "Check the document syntax",
            };
            ErrorContext::new(error.clone())
                .with_suggestion(suggestion)
                .with_details("YAML errors are usually caused by bad indentation, tabs, or unquoted special characters")
        }

        RenderError::NotFound {
            kind,
            path,
        } => {
            let suggestion = format!("Check that the {kind} path '{path}' is correct");
            ErrorContext::new(error.clone()).with_suggestion(suggestion)
        }

        RenderError::ReadFailed {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check that the file is readable by the current user and is valid UTF-8"),

        RenderError::TemplateEvaluation {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(
                "Properties are read with p(name=\"...\"), links with link(name=\"...\"). \
                 Declare defaults in the job spec or pass default=... to p()",
            )
            .with_details(
                "Template errors are reported by the Tera engine. Common issues:\n\
                 - Properties that are neither set in the context nor defaulted in the job spec\n\
                 - Links that were not consumed or have no instances\n\
                 - Unclosed {{ or {% delimiters",
            ),

        RenderError::OutputWrite {
            path,
            ..
        } => {
            let suggestion = format!(
                "Check that the parent directories of '{path}' can be created and that the file is writable"
            );
            ErrorContext::new(error.clone()).with_suggestion(suggestion)
        }
    }
}
