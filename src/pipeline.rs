//! The render pipeline.
//!
//! Two entry points share the same steps:
//!
//! - [`RenderRequest`] takes five paths (context, job spec, instance, template,
//!   output) and is what the binary runs.
//! - [`JobRenderer`] takes an in-memory [`DeploymentContext`] and [`InstanceInfo`]
//!   for callers that already hold the data and only have the job spec on disk.
//!
//! Per render, in order: capture the template's permissions, assemble the
//! [`RenderContext`], render, then write the destination. A failure at any step
//! aborts the render; nothing is retried and no destination is created before
//! rendering succeeded.
//!
//! ```rust,no_run
//! use bosh_render::models::{DeploymentContext, InstanceInfo};
//! use bosh_render::pipeline::JobRenderer;
//! use serde_json::json;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), bosh_render::core::RenderError> {
//! let properties = json!({"redis": {"port": 6379}}).as_object().cloned().unwrap_or_default();
//! let instance = InstanceInfo {
//!     address: "redis-0.redis.internal".to_string(),
//!     ..InstanceInfo::default()
//! };
//!
//! let renderer = JobRenderer::new(
//!     DeploymentContext::new(properties),
//!     instance,
//!     Path::new("jobs/redis/job.MF"),
//! )?;
//! renderer.render(Path::new("jobs/redis/templates/redis.conf"), Path::new("out/config/redis.conf"))?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::core::error::{DocumentKind, RenderError};
use crate::loader::{LoadedContext, load_context, load_instance, load_job_spec};
use crate::models::{ConsumedLink, DeploymentContext, InstanceInfo, JobSpec};
use crate::output::{capture_source_permissions, write_output};
use crate::templating::{RenderContext, TemplateRenderer};

/// Renders one job's templates from in-memory context and instance data.
#[derive(Debug, Clone)]
pub struct JobRenderer {
    context: DeploymentContext,
    consumes: Vec<ConsumedLink>,
    instance: InstanceInfo,
    job_spec: JobSpec,
}

impl JobRenderer {
    /// Create a renderer, loading the job spec from `job_spec_path`.
    ///
    /// # Errors
    ///
    /// - [`RenderError::NotFound`] / [`RenderError::ParseError`] for the job spec
    /// - [`RenderError::ParseError`] if the context's consumes section is malformed
    pub fn new(
        context: DeploymentContext,
        instance: InstanceInfo,
        job_spec_path: &Path,
    ) -> Result<Self, RenderError> {
        let consumes = context.consumed_links().map_err(|e| RenderError::ParseError {
            kind: DocumentKind::Context,
            path: "<in-memory context>".to_string(),
            reason: e.to_string(),
        })?;
        let job_spec = load_job_spec(job_spec_path)?;

        Ok(Self::from_parts(
            LoadedContext {
                context,
                consumes,
            },
            job_spec,
            instance,
        ))
    }

    /// Create a renderer from already loaded documents.
    pub fn from_parts(loaded: LoadedContext, job_spec: JobSpec, instance: InstanceInfo) -> Self {
        Self {
            context: loaded.context,
            consumes: loaded.consumes,
            instance,
            job_spec,
        }
    }

    /// Render `template_path` into `output_path`.
    ///
    /// The renderer can be reused for several templates of the same job.
    ///
    /// # Errors
    ///
    /// - [`RenderError::NotFound`] if the template does not exist (no output is created)
    /// - [`RenderError::TemplateEvaluation`] if the template fails to render
    /// - [`RenderError::OutputWrite`] if the destination cannot be written
    pub fn render(&self, template_path: &Path, output_path: &Path) -> Result<(), RenderError> {
        let source_permissions = capture_source_permissions(template_path)?;

        let context = RenderContext::assemble(
            self.job_spec.clone(),
            self.context.clone(),
            &self.consumes,
            &self.instance,
        );

        let rendered = TemplateRenderer::new().render(template_path, context)?;
        write_output(output_path, &rendered, &source_permissions)
    }
}

/// The five paths one CLI invocation works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub context_path: PathBuf,
    pub job_spec_path: PathBuf,
    pub instance_path: PathBuf,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
}

impl RenderRequest {
    /// Load the three documents, then render the template into the output path.
    ///
    /// # Errors
    ///
    /// Any [`RenderError`] from loading, rendering or writing.
    pub fn run(&self) -> Result<(), RenderError> {
        tracing::info!("Context file: {}", self.context_path.display());
        tracing::info!("Instance file: {}", self.instance_path.display());
        tracing::info!("Spec file: {}", self.job_spec_path.display());
        tracing::info!("Template file: {}", self.template_path.display());
        tracing::info!("Output file: {}", self.output_path.display());

        let loaded = load_context(&self.context_path)?;
        let job_spec = load_job_spec(&self.job_spec_path)?;
        let instance = load_instance(&self.instance_path)?;

        JobRenderer::from_parts(loaded, job_spec, instance)
            .render(&self.template_path, &self.output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{JobWorkspace, init_test_logging};
    use serde::Serialize;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_run_without_links() {
        init_test_logging(None);
        let workspace = JobWorkspace::new()
            .with_context("properties:\n  foo: bar\n")
            .with_template(r#"{{ p(name="foo") }} {{ consumes | length }}"#);

        workspace.request("config/out").run().unwrap();

        assert_eq!(workspace.read_output("config/out"), "bar 0");
    }

    #[test]
    fn test_run_with_db_link() {
        let workspace = JobWorkspace::new()
            .with_context(
                r#"
properties:
  bosh_containerization:
    consumes:
      db:
        address: db.service.internal
        instances:
          - {address: db-0.internal, index: 0}
          - {address: db-1.internal, index: 1}
        properties: {port: 5432}
      pending:
        instances: []
"#,
            )
            .with_template(
                "{% for l in consumes %}{{ l.name }}:{% for i in l.instances %}{{ i.address }},{% endfor %}{% endfor %}",
            );

        workspace.request("config/out").run().unwrap();

        assert_eq!(workspace.read_output("config/out"), "db:db-0.internal,db-1.internal,");
    }

    #[test]
    fn test_missing_template_creates_nothing() {
        let workspace = JobWorkspace::new();
        let mut request = workspace.request("nested/dir/out");
        request.template_path = workspace.path().join("does-not-exist.tera");

        let error = request.run().unwrap_err();

        match error {
            RenderError::NotFound {
                kind,
                path,
            } => {
                assert_eq!(kind, DocumentKind::Template);
                assert!(path.ends_with("does-not-exist.tera"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(!workspace.path().join("nested").exists());
    }

    #[test]
    fn test_template_error_creates_nothing() {
        let workspace = JobWorkspace::new().with_template("{{ thisdoesntexist }}");

        let error = workspace.request("out/file").run().unwrap_err();

        assert!(matches!(error, RenderError::TemplateEvaluation { .. }));
        assert!(error.to_string().contains("thisdoesntexist"));
        assert!(!workspace.path().join("out").exists());
    }

    #[test]
    fn test_missing_instance_document() {
        let workspace = JobWorkspace::new();
        let mut request = workspace.request("out");
        request.instance_path = workspace.path().join("nope.yml");

        assert!(matches!(
            request.run().unwrap_err(),
            RenderError::NotFound {
                kind: DocumentKind::Instance,
                ..
            }
        ));
    }

    #[test]
    fn test_job_renderer_in_memory_context() {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Nested {
            foo: String,
            bar: String,
        }

        let workspace = JobWorkspace::new()
            .with_template(r#"{% set v = p(name="foo") %}{{ v | json_encode() }}"#);
        let nested = Nested {
            foo: "bar".to_string(),
            bar: "baz".to_string(),
        };
        let properties = json!({ "foo": nested });
        let context = DeploymentContext::new(properties.as_object().cloned().unwrap());

        let renderer =
            JobRenderer::new(context, InstanceInfo::default(), &workspace.spec_path()).unwrap();
        let output = workspace.path().join("out.json");
        renderer.render(&workspace.template_path(), &output).unwrap();

        assert_eq!(fs::read_to_string(output).unwrap(), r#"{"Foo":"bar","Bar":"baz"}"#);
    }

    #[test]
    fn test_job_renderer_reused_for_several_templates() {
        let workspace = JobWorkspace::new()
            .with_spec("properties:\n  port:\n    default: 8080\n")
            .with_template(r#"port={{ p(name="port") }}"#);
        let renderer =
            JobRenderer::new(DeploymentContext::default(), InstanceInfo::default(), &workspace.spec_path())
                .unwrap();

        for name in ["a.conf", "b.conf"] {
            renderer.render(&workspace.template_path(), &workspace.path().join(name)).unwrap();
        }

        assert_eq!(workspace.read_output("a.conf"), "port=8080");
        assert_eq!(workspace.read_output("b.conf"), "port=8080");
    }
}
