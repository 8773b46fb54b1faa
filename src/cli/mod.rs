//! Command-line interface for bosh-render.
//!
//! One invocation renders one template:
//!
//! ```bash
//! bosh-render CONTEXT SPEC INSTANCE TEMPLATE OUTPUT
//! bosh-render context.yml job.MF instance.yml templates/ctl.tera /var/vcap/jobs/redis/bin/ctl
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--no-color` - Disable colored output
//!
//! Without `--verbose`/`--quiet` the log filter comes from `RUST_LOG`, falling
//! back to `info`. Logs go to stderr.
//!
//! The process exits non-zero with a human-readable message on any failure and
//! zero once the output file is written with its final permissions.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::core::RenderError;
use crate::pipeline::RenderRequest;


/// Log filter used when neither a flag nor `RUST_LOG` says otherwise.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can run a parsed command with a
/// different configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Explicit log filter. `None` defers to `RUST_LOG`, then `info`.
    pub log_level: Option<String>,

    /// Disable ANSI colors in logs and error output.
    pub no_color: bool,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The filter [`CliConfig::init_logging`] installs.
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        }
    }

    /// Install the stderr subscriber and apply the color setting.
    ///
    /// Only the first call in a process installs a subscriber.
    pub fn init_logging(&self) {
        if self.no_color {
            colored::control::set_override(false);
        }

        let installed = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_ansi(!self.no_color)
            .with_target(false)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!("Logging initialized with {:?}", self.log_level);
        }
    }
}

/// Render a BOSH job template from a deployment context, job spec and instance record.
#[derive(Parser, Debug)]
#[command(
    name = "bosh-render",
    about = "Render a BOSH job template against a deployment context",
    version,
    long_about = "Renders one job template using the deployment's properties and consumed links, \
                  the job spec's property defaults and this instance's identity. The output file \
                  gets mode 0755 inside a 'bin' directory and the template's own mode elsewhere."
)]
pub struct Cli {
    /// Deployment context document (YAML or JSON) with `properties` and consumed links
    #[arg(value_name = "CONTEXT")]
    context: PathBuf,

    /// Job spec document declaring the job's properties and their defaults
    #[arg(value_name = "SPEC")]
    spec: PathBuf,

    /// Instance document: address, az, bootstrap, id, index, name, ip, deployment
    #[arg(value_name = "INSTANCE")]
    instance: PathBuf,

    /// Template source file
    #[arg(value_name = "TEMPLATE")]
    template: PathBuf,

    /// Destination file; missing parent directories are created
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Enable debug logging.
    ///
    /// Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

impl Cli {
    /// Run with the configuration built from the parsed flags.
    pub fn execute(self) -> Result<(), RenderError> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            no_color: self.no_color,
        }
    }

    /// The five paths as a pipeline request.
    #[must_use]
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            context_path: self.context.clone(),
            job_spec_path: self.spec.clone(),
            instance_path: self.instance.clone(),
            template_path: self.template.clone(),
            output_path: self.output.clone(),
        }
    }

    /// Run with an explicit configuration.
    pub fn execute_with_config(self, config: CliConfig) -> Result<(), RenderError> {
        config.init_logging();
        self.render_request().run()
    }
}
