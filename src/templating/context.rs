//! The template evaluation binding.
//!
//! [`RenderContext`] is the only thing a template sees. It is assembled once per
//! render from the loaded documents and never changed afterwards; the renderer
//! takes it by value and shares it read-only with the lookup functions.

use serde::Serialize;
use serde_json::Value;
use tera::Context as TeraContext;

use crate::models::{
    ConsumedLink, DeploymentContext, InstanceInfo, InstanceSpec, JobSpec, Link, PropertyTree,
    build_links, lookup_path,
};

/// Job schema, property tree, self instance and consumed links for one render.
///
/// Serialized field names are the top-level template variables:
/// `job_spec`, `properties`, `spec` and `consumes`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderContext {
    pub job_spec: JobSpec,
    pub properties: PropertyTree,
    pub spec: InstanceSpec,
    pub consumes: Vec<Link>,
}

impl RenderContext {
    pub fn new(
        job_spec: JobSpec,
        properties: PropertyTree,
        spec: InstanceSpec,
        consumes: Vec<Link>,
    ) -> Self {
        Self {
            job_spec,
            properties,
            spec,
            consumes,
        }
    }

    /// Build the binding from loaded inputs: links from the consumes entries,
    /// the self instance from the instance record.
    pub fn assemble(
        job_spec: JobSpec,
        context: DeploymentContext,
        consumed: &[ConsumedLink],
        instance: &InstanceInfo,
    ) -> Self {
        let consumes = build_links(consumed);
        let spec = InstanceSpec::for_self(instance);
        tracing::debug!(
            "Assembled render context: {} link(s), self instance {}/{}",
            consumes.len(),
            spec.name,
            spec.index
        );
        Self::new(job_spec, context.properties, spec, consumes)
    }

    /// Resolve a property: the context's value if present and non-null,
    /// otherwise the job spec's declared default.
    ///
    /// `name` is tried as a literal key first, then as a dotted path.
    pub fn property(&self, name: &str) -> Option<&Value> {
        find_in_tree(&self.properties, name).or_else(|| {
            self.job_spec.default_for(name).filter(|value| !value.is_null())
        })
    }

    /// The consumed link called `name`.
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.consumes.iter().find(|link| link.name == name)
    }

    pub fn link_names(&self) -> Vec<String> {
        self.consumes.iter().map(|link| link.name.clone()).collect()
    }

    /// Every property name a template could ask for: dotted leaf paths of the
    /// property tree plus everything the job spec declares.
    pub fn property_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_leaf_paths(&self.properties, "", &mut names);
        for declared in self.job_spec.properties.keys() {
            if !names.contains(declared) {
                names.push(declared.clone());
            }
        }
        names
    }

    /// Convert into the Tera binding.
    pub fn to_tera_context(&self) -> tera::Result<TeraContext> {
        TeraContext::from_serialize(self)
    }
}

/// Literal key first, then dotted path. `null` counts as absent.
pub(crate) fn find_in_tree<'a>(tree: &'a PropertyTree, name: &str) -> Option<&'a Value> {
    tree.get(name)
        .or_else(|| lookup_path(tree, name))
        .filter(|value| !value.is_null())
}

fn collect_leaf_paths(tree: &PropertyTree, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in tree {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => collect_leaf_paths(nested, &path, out),
            _ => out.push(path),
        }
    }
}
