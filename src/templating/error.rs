//! Structured template errors.
//!
//! Tera reports failures as a chain of loosely formatted messages. The renderer
//! sorts them into [`TemplateError`] so the CLI can say *which* property, link or
//! variable was missing and point at the offending line.

use std::fmt;
use std::path::PathBuf;

/// A template evaluation failure.
#[derive(Debug, Clone)]
pub enum TemplateError {
    /// `p(...)` found neither a value, a job spec default, nor a `default` argument
    PropertyNotFound {
        name: String,
        /// Set when the lookup was `link_p` against this link
        link: Option<String>,
        suggestions: Vec<String>,
        location: ErrorLocation,
    },

    /// `link(...)` or `link_p(...)` referenced a link that is not consumed
    LinkNotFound {
        name: String,
        available: Vec<String>,
        location: ErrorLocation,
    },

    /// A bare template variable that is not part of the binding
    VariableNotFound {
        variable: String,
        suggestions: Vec<String>,
        location: ErrorLocation,
    },

    /// The template source does not parse
    SyntaxError {
        message: String,
        location: ErrorLocation,
    },

    /// Any other failure Tera reports while rendering, passed through as-is
    Evaluation {
        message: String,
        location: ErrorLocation,
    },
}

/// Where in the template an error happened, as far as Tera tells us.
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    pub file_path: Option<PathBuf>,
    /// 1-based line number
    pub line_number: Option<usize>,
    /// Surrounding lines with their 1-based numbers
    pub context_lines: Vec<(usize, String)>,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headline = match self {
            TemplateError::PropertyNotFound {
                name,
                link,
                suggestions,
                ..
            } => {
                write!(f, "Can't find property '{name}'")?;
                if let Some(link) = link {
                    write!(f, " in link '{link}'")?;
                }
                write_suggestions(f, suggestions)
            }
            TemplateError::LinkNotFound {
                name,
                ..
            } => write!(f, "Can't find link '{name}'"),
            TemplateError::VariableNotFound {
                variable,
                suggestions,
                ..
            } => {
                write!(f, "Template variable not found: '{variable}'")?;
                write_suggestions(f, suggestions)
            }
            TemplateError::SyntaxError {
                message,
                ..
            } => write!(f, "Template syntax error: {message}"),
            TemplateError::Evaluation {
                message,
                ..
            } => f.write_str(message),
        };
        headline?;

        if let Some(line) = self.location().line_number {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

impl std::error::Error for TemplateError {}

fn write_suggestions(f: &mut fmt::Formatter<'_>, suggestions: &[String]) -> fmt::Result {
    match suggestions {
        [] => Ok(()),
        [only] => write!(f, " (did you mean '{only}'?)"),
        many => write!(f, " (did you mean one of: {}?)", many.join(", ")),
    }
}

impl TemplateError {
    pub fn location(&self) -> &ErrorLocation {
        match self {
            TemplateError::PropertyNotFound {
                location,
                ..
            }
            | TemplateError::LinkNotFound {
                location,
                ..
            }
            | TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            }
            | TemplateError::Evaluation {
                location,
                ..
            } => location,
        }
    }

    /// Multi-line report with the template excerpt around the failing line.
    pub fn format_with_context(&self) -> String {
        let location = self.location();
        let mut msg = format!("ERROR: {self}\n");

        if let Some(path) = &location.file_path {
            msg.push_str(&format!("Template: {}\n", path.display()));
        }

        if let TemplateError::LinkNotFound {
            available,
            ..
        } = self
        {
            if available.is_empty() {
                msg.push_str("No links are consumed by this instance\n");
            } else {
                msg.push_str(&format!("Consumed links: {}\n", available.join(", ")));
            }
        }

        if !location.context_lines.is_empty() {
            msg.push('\n');
            for (number, line) in &location.context_lines {
                let marker = if Some(*number) == location.line_number {
                    ">"
                } else {
                    " "
                };
                msg.push_str(&format!("{marker} {number:4} | {line}\n"));
            }
        }

        msg
    }
}
