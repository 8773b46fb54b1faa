//! bosh-render - BOSH job template renderer
//!
//! Renders a single job template by combining three documents into one binding:
//! the deployment-wide property context (including consumed links), the job spec
//! (which declares properties and their defaults) and the identity/network record
//! of the instance being configured. The result is written to disk with the
//! template's own permissions, or `0755` when it lands in a `bin` directory.
//!
//! # Architecture Overview
//!
//! One invocation is a single-shot batch transform, five inputs in and one file out:
//!
//! ```text
//! context ──► loader::load_context ──► models::build_links ──┐
//! job spec ─► loader::load_job_spec ─────────────────────────┼─► templating::RenderContext
//! instance ─► loader::load_instance ─► InstanceSpec::for_self ┘            │
//!                                                                          ▼
//! template ─► output::capture_source_permissions ──► templating::TemplateRenderer
//!                                                                          │
//!                                                        output::write_output ◄┘
//! ```
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (five positional paths plus logging flags)
//! - [`core`] - Error types and user-facing error formatting
//! - [`loader`] - Context, job spec and instance document loaders
//! - [`models`] - Property trees, job spec, instances and links
//! - [`templating`] - Tera binding, lookup functions and template errors
//! - [`output`] - Destination writing and the permission policy
//! - [`pipeline`] - [`pipeline::RenderRequest`] and [`pipeline::JobRenderer`]
//! - [`utils`] - Filesystem helpers
//!
//! # Templates
//!
//! Templates are [Tera](https://keats.github.io/tera/) templates:
//!
//! ```text
//! #!/bin/bash
//! # {{ spec.name }}/{{ spec.index }} in {{ spec.az }}
//! exec redis-server --bind {{ spec.networks.default.ip }} --port {{ p(name="redis.port") }}
//! {% if has_link(name="sentinel") %}# sentinel at {{ link_p(link="sentinel", name="port") }}{% endif %}
//! ```
//!
//! See [`templating`] for the full binding.

pub mod cli;
pub mod core;
pub mod loader;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod templating;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
