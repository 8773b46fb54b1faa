//! Property and link lookup functions registered on every render.
//!
//! Tera only supports named arguments, so the calls look like:
//!
//! ```text
//! port: {{ p(name="redis.port") }}
//! log_level: {{ p(name="log_level", default="info") }}
//! {% if has_p(name="tls.cert") %}cert: {{ p(name="tls.cert") }}{% endif %}
//! {% if has_link(name="db") %}
//! {% set db = link(name="db") %}
//! db_host: {{ db.instances.0.address }}
//! db_port: {{ link_p(link="db", name="port", default=5432) }}
//! {% endif %}
//! ```
//!
//! `name` for `p`/`has_p` may also be a list; the first name that resolves wins.
//!
//! Lookups read the shared [`RenderContext`] and never modify it. Failures are
//! plain `tera::Error` messages whose wording the renderer recognizes when it
//! builds a [`super::TemplateError`].

use std::collections::HashMap;
use std::sync::Arc;

use tera::Value;

use super::context::{RenderContext, find_in_tree};

/// Prefix of the error raised by `p` when nothing resolves.
pub const PROPERTY_NOT_FOUND: &str = "Can't find property";
/// Prefix of the error raised by `link`/`link_p` for unknown links.
pub const LINK_NOT_FOUND: &str = "Can't find link";

/// `p(name, default?)`: property value, job spec default, then `default`.
pub fn create_property_function(context: Arc<RenderContext>) -> impl tera::Function + 'static {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        let names = names_arg(args, "p")?;

        if let Some(value) = names.iter().find_map(|name| context.property(name)) {
            return Ok(value.clone());
        }
        if let Some(default) = args.get("default") {
            return Ok(default.clone());
        }

        Err(tera::Error::msg(format!("{PROPERTY_NOT_FOUND} '{}'", display_names(&names))))
    }
}

/// `has_p(name)`: whether `p(name)` resolves without a `default`.
pub fn create_has_property_function(
    context: Arc<RenderContext>,
) -> impl tera::Function + 'static {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        let names = names_arg(args, "has_p")?;
        Ok(Value::Bool(names.iter().any(|name| context.property(name).is_some())))
    }
}

/// `link(name)`: the whole link object.
pub fn create_link_function(context: Arc<RenderContext>) -> impl tera::Function + 'static {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        let name = str_arg(args, "name", "link")?;
        let link = context
            .link(name)
            .ok_or_else(|| tera::Error::msg(format!("{LINK_NOT_FOUND} '{name}'")))?;
        tera::to_value(link)
            .map_err(|e| tera::Error::msg(format!("Failed to expose link '{name}': {e}")))
    }
}

/// `has_link(name)`
pub fn create_has_link_function(context: Arc<RenderContext>) -> impl tera::Function + 'static {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        let name = str_arg(args, "name", "has_link")?;
        Ok(Value::Bool(context.link(name).is_some()))
    }
}

/// `link_p(link, name, default?)`: a property exported by a consumed link.
pub fn create_link_property_function(
    context: Arc<RenderContext>,
) -> impl tera::Function + 'static {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        let link_name = str_arg(args, "link", "link_p")?;
        let name = str_arg(args, "name", "link_p")?;

        let link = context
            .link(link_name)
            .ok_or_else(|| tera::Error::msg(format!("{LINK_NOT_FOUND} '{link_name}'")))?;

        if let Some(value) = find_in_tree(&link.properties, name) {
            return Ok(value.clone());
        }
        if let Some(default) = args.get("default") {
            return Ok(default.clone());
        }

        Err(tera::Error::msg(format!(
            "{PROPERTY_NOT_FOUND} '{name}' in link '{link_name}'"
        )))
    }
}

fn str_arg<'a>(
    args: &'a HashMap<String, Value>,
    key: &str,
    function: &str,
) -> tera::Result<&'a str> {
    args.get(key).and_then(Value::as_str).ok_or_else(|| {
        tera::Error::msg(format!("Function `{function}` requires a string `{key}` argument"))
    })
}

fn names_arg(args: &HashMap<String, Value>, function: &str) -> tera::Result<Vec<String>> {
    let invalid = || {
        tera::Error::msg(format!(
            "Function `{function}` requires a `name` argument (a string or a list of strings)"
        ))
    };

    match args.get("name") {
        Some(Value::String(name)) => Ok(vec![name.clone()]),
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}

fn display_names(names: &[String]) -> String {
    match names {
        [single] => single.clone(),
        many => format!("[{}]", many.join(", ")),
    }
}
