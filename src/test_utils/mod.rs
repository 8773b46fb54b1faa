//! Test utilities for bosh-render
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests under `tests/`.
//!
//! # Example
//!
//! ```rust,no_run
//! use bosh_render::test_utils::{JobWorkspace, LINKED_CONTEXT};
//!
//! let workspace = JobWorkspace::new()
//!     .with_context(LINKED_CONTEXT)
//!     .with_template(r#"{{ link_p(link="myprovider", name="exported") }}"#);
//!
//! workspace.request("config/out").run().unwrap();
//! assert_eq!(workspace.read_output("config/out"), "toaster");
//! ```

pub mod fixtures;

pub use fixtures::{
    EMPTY_CONTEXT, EMPTY_SPEC, FULL_INSTANCE, JobWorkspace, LINKED_CONTEXT, SPEC_WITH_DEFAULT,
    SPEC_WITHOUT_PROPERTIES,
};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, tests stay silent.
///
/// ```bash
/// RUST_LOG=bosh_render=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
