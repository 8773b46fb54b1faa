//! Template rendering with Tera.
//!
//! The engine is treated as a black box: a fresh [`Tera`] instance per render,
//! the lookup functions from [`super::functions`] registered on it, and the
//! [`RenderContext`] serialized as the binding. Tera's error chain is then
//! sorted into a [`TemplateError`].

use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use strsim::levenshtein;
use tera::Tera;

use super::context::RenderContext;
use super::error::{ErrorLocation, TemplateError};
use super::functions::{self, LINK_NOT_FOUND, PROPERTY_NOT_FOUND};
use crate::core::error::{DocumentKind, RenderError};
use crate::utils::fs::read_text_file;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Head of the chain Tera builds when the template source does not parse.
const PARSE_FAILURE_PREFIX: &str = "Failed to parse";

/// Lines shown on each side of a failing line.
const EXCERPT_RADIUS: usize = 3;

/// Renders job templates against a [`RenderContext`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Read the template at `template_path` and render it.
    ///
    /// # Errors
    ///
    /// - [`RenderError::NotFound`] / [`RenderError::ReadFailed`] if the template
    ///   cannot be read
    /// - [`RenderError::TemplateEvaluation`] if Tera rejects the template or a
    ///   lookup fails
    pub fn render(
        &self,
        template_path: &Path,
        context: RenderContext,
    ) -> Result<String, RenderError> {
        let source = read_text_file(template_path, "reading template source")
            .map_err(|e| RenderError::from_read_failure(DocumentKind::Template, &e))?;

        self.render_str(&source, context, Some(template_path)).map_err(|e| {
            tracing::debug!("{}", e.format_with_context());
            RenderError::TemplateEvaluation {
                path: template_path.display().to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Render template source held in memory.
    ///
    /// `template_path` only labels error locations.
    pub fn render_str(
        &self,
        source: &str,
        context: RenderContext,
        template_path: Option<&Path>,
    ) -> Result<String, TemplateError> {
        let context = Arc::new(context);
        let tera_context = context.to_tera_context().map_err(|e| TemplateError::Evaluation {
            message: format!("Failed to build template context: {}", Self::format_tera_error(&e)),
            location: ErrorLocation {
                file_path: template_path.map(Path::to_path_buf),
                ..ErrorLocation::default()
            },
        })?;

        Self::log_context(&tera_context.clone().into_json());

        // Fresh instance per render, nothing is shared between renders
        let mut tera = Tera::default();
        tera.register_function("p", functions::create_property_function(Arc::clone(&context)));
        tera.register_function(
            "has_p",
            functions::create_has_property_function(Arc::clone(&context)),
        );
        tera.register_function("link", functions::create_link_function(Arc::clone(&context)));
        tera.register_function(
            "has_link",
            functions::create_has_link_function(Arc::clone(&context)),
        );
        tera.register_function(
            "link_p",
            functions::create_link_property_function(Arc::clone(&context)),
        );

        let rendered = tera
            .render_str(source, &tera_context)
            .map_err(|e| Self::parse_tera_error(&e, source, &context, template_path))?;

        tracing::debug!("Template rendering complete ({} bytes)", rendered.len());
        Ok(rendered)
    }

    /// Sort a Tera error into a structured [`TemplateError`].
    fn parse_tera_error(
        error: &tera::Error,
        source: &str,
        context: &RenderContext,
        template_path: Option<&Path>,
    ) -> TemplateError {
        let line_number = Self::extract_line_from_tera_error(error);
        let location = ErrorLocation {
            file_path: template_path.map(Path::to_path_buf),
            line_number,
            context_lines: line_number
                .map(|line| Self::extract_context_lines(source, line, EXCERPT_RADIUS))
                .unwrap_or_default(),
        };

        let messages = Self::error_chain(error);

        if let Some([name, link]) = Self::capture::<2>(&messages, link_property_pattern()) {
            let suggestions = context
                .link(&link)
                .map(|found| {
                    let mut names = Vec::new();
                    collect_paths(&found.properties, "", &mut names);
                    Self::find_similar(&name, &names)
                })
                .unwrap_or_default();
            return TemplateError::PropertyNotFound {
                name,
                link: Some(link),
                suggestions,
                location,
            };
        }

        if let Some([name]) = Self::capture::<1>(&messages, quoted_pattern(PROPERTY_NOT_FOUND)) {
            let suggestions = Self::find_similar(&name, &context.property_names());
            return TemplateError::PropertyNotFound {
                name,
                link: None,
                suggestions,
                location,
            };
        }

        if let Some([name]) = Self::capture::<1>(&messages, quoted_pattern(LINK_NOT_FOUND)) {
            return TemplateError::LinkNotFound {
                name,
                available: context.link_names(),
                location,
            };
        }

        if let Some([variable]) = Self::capture::<1>(&messages, variable_pattern()) {
            let suggestions = Self::find_similar(&variable, &Self::variable_names(context));
            return TemplateError::VariableNotFound {
                variable,
                suggestions,
                location,
            };
        }

        let message = Self::format_tera_error(error);
        if messages.first().is_some_and(|top| top.starts_with(PARSE_FAILURE_PREFIX)) {
            TemplateError::SyntaxError {
                message,
                location,
            }
        } else {
            TemplateError::Evaluation {
                message,
                location,
            }
        }
    }

    /// Messages of the error and every source below it.
    fn error_chain(error: &tera::Error) -> Vec<String> {
        use std::error::Error;

        let mut messages = vec![error.to_string()];
        let mut current: Option<&dyn Error> = error.source();
        while let Some(err) = current {
            messages.push(err.to_string());
            current = err.source();
        }
        messages
    }

    /// First message matching `pattern`, with its `N` capture groups.
    fn capture<const N: usize>(messages: &[String], pattern: Option<Regex>) -> Option<[String; N]> {
        let re = pattern?;
        messages.iter().find_map(|msg| {
            let caps = re.captures(msg)?;
            let groups: Vec<String> =
                (1..=N).map(|i| caps.get(i).map(|m| m.as_str().to_string())).collect::<Option<_>>()?;
            groups.try_into().ok()
        })
    }

    /// Dotted names of everything in the binding, for "did you mean" hints on
    /// bare variables.
    fn variable_names(context: &RenderContext) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(Value::Object(binding)) = serde_json::to_value(context) {
            collect_paths(&binding, "", &mut names);
        }
        names
    }

    /// Find similar names using Levenshtein distance.
    fn find_similar(target: &str, candidates: &[String]) -> Vec<String> {
        let mut scored: Vec<_> = candidates
            .iter()
            .filter(|candidate| candidate.as_str() != target)
            .map(|candidate| (candidate.clone(), levenshtein(target, candidate)))
            .collect();

        scored.sort_by_key(|(_, distance)| *distance);

        scored
            .into_iter()
            .filter(|(_, distance)| *distance <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(candidate, _)| candidate)
            .collect()
    }

    /// Up to `radius` lines before and after `error_line`, 1-indexed.
    fn extract_context_lines(content: &str, error_line: usize, radius: usize) -> Vec<(usize, String)> {
        let lines: Vec<&str> = content.lines().collect();
        if error_line == 0 || error_line > lines.len() {
            return Vec::new();
        }

        let start = error_line.saturating_sub(radius + 1);
        let end = (error_line + radius).min(lines.len());

        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, line)| (start + idx + 1, (*line).to_string()))
            .collect()
    }

    /// Tera parse errors carry a ` --> line:column` marker.
    fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
        let re = Regex::new(r"-->\s*(\d+):(\d+)").ok()?;
        Self::error_chain(error).iter().find_map(|msg| {
            re.captures(msg)
                .and_then(|caps| caps.get(1))
                .and_then(|line| line.as_str().parse::<usize>().ok())
        })
    }

    /// Format a Tera error chain into one readable line, without Tera's internal
    /// one-off template name.
    pub fn format_tera_error(error: &tera::Error) -> String {
        let messages: Vec<String> = Self::error_chain(error)
            .into_iter()
            .map(|msg| {
                msg.replace("while rendering '__tera_one_off'", "")
                    .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                    .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                    .replace("'__tera_one_off'", "template")
                    .trim()
                    .to_string()
            })
            .filter(|msg| {
                !msg.is_empty()
                    && msg != "Template rendering failed"
                    && msg != "Template syntax error"
            })
            .collect();

        if messages.is_empty() {
            "Template syntax error (see details above)".to_string()
        } else {
            messages.join(": ")
        }
    }

    /// Log the binding at trace level, one top-level key per line.
    fn log_context(binding: &Value) {
        if let Value::Object(map) = binding {
            tracing::debug!("Rendering template with context keys: {:?}", map.keys().collect::<Vec<_>>());
            for (key, value) in map {
                tracing::trace!("  {}: {}", key, value);
            }
        }
    }
}

fn quoted_pattern(prefix: &str) -> Option<Regex> {
    Regex::new(&format!(r"^{} '([^']+)'$", regex::escape(prefix))).ok()
}

fn link_property_pattern() -> Option<Regex> {
    Regex::new(&format!(r"^{} '([^']+)' in link '([^']+)'$", regex::escape(PROPERTY_NOT_FOUND))).ok()
}

fn variable_pattern() -> Option<Regex> {
    Regex::new(r"Variable `([^`]+)` not found").ok()
}

/// Every dotted path of a mapping, intermediate nodes included.
fn collect_paths(tree: &serde_json::Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in tree {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        out.push(path.clone());
        if let Value::Object(nested) = value {
            collect_paths(nested, &path, out);
        }
    }
}
