//! Shared helpers for binary-level tests.
//!
//! Wraps [`JobWorkspace`] so each test gets a scratch job directory and a
//! ready-to-run `bosh-render` command pointing at it.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub use bosh_render::test_utils::{
    EMPTY_CONTEXT, FULL_INSTANCE, JobWorkspace, LINKED_CONTEXT, SPEC_WITH_DEFAULT,
    SPEC_WITHOUT_PROPERTIES,
};

/// A job directory plus the binary under test.
pub struct TestJob {
    workspace: JobWorkspace,
}

impl TestJob {
    pub fn new() -> Self {
        Self {
            workspace: JobWorkspace::new(),
        }
    }

    pub fn context(self, content: &str) -> Self {
        Self {
            workspace: self.workspace.with_context(content),
        }
    }

    pub fn spec(self, content: &str) -> Self {
        Self {
            workspace: self.workspace.with_spec(content),
        }
    }

    pub fn instance(self, content: &str) -> Self {
        Self {
            workspace: self.workspace.with_instance(content),
        }
    }

    pub fn template(self, content: &str) -> Self {
        Self {
            workspace: self.workspace.with_template(content),
        }
    }

    #[cfg(unix)]
    pub fn template_mode(self, mode: u32) -> Self {
        Self {
            workspace: self.workspace.with_template_mode(mode),
        }
    }

    pub fn path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn output_path(&self, output: &str) -> PathBuf {
        self.path().join(output)
    }

    pub fn read_output(&self, output: &str) -> String {
        self.workspace.read_output(output)
    }

    /// `bosh-render CONTEXT SPEC INSTANCE TEMPLATE OUTPUT` for this job.
    pub fn command(&self, output: &str) -> Command {
        let request = self.workspace.request(output);
        self.command_with(&request.template_path, output)
    }

    /// Same as [`TestJob::command`] with a different template path.
    pub fn command_with(&self, template: &Path, output: &str) -> Command {
        let mut cmd = Command::cargo_bin("bosh-render").expect("binary not built");
        cmd.arg(self.workspace.context_path())
            .arg(self.workspace.spec_path())
            .arg(self.workspace.instance_path())
            .arg(template)
            .arg(self.output_path(output))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Render and return the output, asserting success.
    pub fn render(&self, output: &str) -> String {
        self.command(output).assert().success();
        self.read_output(output)
    }
}

#[cfg(unix)]
pub fn mode(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).expect("missing output").permissions().mode() & 0o777
}
