//! Sample input documents and a scratch job directory.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::pipeline::RenderRequest;

/// Context document with an empty property tree.
pub const EMPTY_CONTEXT: &str = "properties: {}\n";

/// Minimal job spec declaring nothing.
pub const EMPTY_SPEC: &str = "---\nname: test_job\ntemplates: {}\nproperties: {}\n";

/// Job spec declaring `foo` with default `baz`.
pub const SPEC_WITH_DEFAULT: &str = "---\nname: simple_job\ntemplates: {}\nproperties:\n  foo:\n    default: baz\n";

/// Job spec without a `properties` key at all.
pub const SPEC_WITHOUT_PROPERTIES: &str = "---\nname: no_properties\ntemplates: {}\n";

/// Instance document with every field set.
pub const FULL_INSTANCE: &str = r#"address: foo.deadbeef.com
az: myaz
bootstrap: false
deployment: mydeployment
id: "005443"
index: 123
ip: 256.256.256.256
name: foo
"#;

/// Context consuming one satisfied link (`myprovider`) and one without instances.
pub const LINKED_CONTEXT: &str = r#"properties:
  bosh_containerization:
    consumes:
      myprovider:
        address: myprovider.service.internal
        instances:
          - address: link.domain.foo
            az: linkaz
            bootstrap: true
            id: 11nk1d
            index: 11
            name: linkedjob
        properties:
          exported: toaster
      unsatisfied:
        instances: []
"#;

/// A temporary job directory holding the four input files.
///
/// Every `with_*` call rewrites the corresponding file immediately. Output paths
/// passed to [`JobWorkspace::request`] are relative to the workspace root.
pub struct JobWorkspace {
    temp_dir: TempDir,
}

impl JobWorkspace {
    const CONTEXT: &'static str = "context.yml";
    const SPEC: &'static str = "job.MF";
    const INSTANCE: &'static str = "instance.yml";
    const TEMPLATE: &'static str = "templates/template.tera";

    /// Workspace with an empty context, empty spec, full instance and empty template.
    pub fn new() -> Self {
        let workspace = Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        };
        workspace
            .with_context(EMPTY_CONTEXT)
            .with_spec(EMPTY_SPEC)
            .with_instance(FULL_INSTANCE)
            .with_template("")
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn context_path(&self) -> PathBuf {
        self.path().join(Self::CONTEXT)
    }

    pub fn spec_path(&self) -> PathBuf {
        self.path().join(Self::SPEC)
    }

    pub fn instance_path(&self) -> PathBuf {
        self.path().join(Self::INSTANCE)
    }

    pub fn template_path(&self) -> PathBuf {
        self.path().join(Self::TEMPLATE)
    }

    pub fn with_context(self, content: &str) -> Self {
        self.write(Self::CONTEXT, content)
    }

    pub fn with_spec(self, content: &str) -> Self {
        self.write(Self::SPEC, content)
    }

    pub fn with_instance(self, content: &str) -> Self {
        self.write(Self::INSTANCE, content)
    }

    pub fn with_template(self, content: &str) -> Self {
        self.write(Self::TEMPLATE, content)
    }

    /// Set the template's permission bits.
    #[cfg(unix)]
    pub fn with_template_mode(self, mode: u32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(self.template_path(), fs::Permissions::from_mode(mode))
            .expect("failed to chmod template");
        self
    }

    /// Request rendering the workspace's inputs into `output` (relative).
    pub fn request(&self, output: &str) -> RenderRequest {
        RenderRequest {
            context_path: self.context_path(),
            job_spec_path: self.spec_path(),
            instance_path: self.instance_path(),
            template_path: self.template_path(),
            output_path: self.path().join(output),
        }
    }

    pub fn read_output(&self, output: &str) -> String {
        fs::read_to_string(self.path().join(output)).expect("failed to read output")
    }

    fn write(self, relative: &str, content: &str) -> Self {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(&path, content).expect("failed to write fixture");
        self
    }
}

impl Default for JobWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
