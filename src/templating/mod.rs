//! Template evaluation.
//!
//! Job templates are [Tera](https://keats.github.io/tera/) templates evaluated
//! against a [`RenderContext`]. The binding exposes four top-level variables:
//!
//! | Variable     | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | `properties` | Deployment property tree                                        |
//! | `job_spec`   | `{ properties: <declared schema> }`                             |
//! | `spec`       | Self instance, including `networks.default.{ip,dns_record_name}`|
//! | `consumes`   | Consumed links, each `{ name, address, instances, properties }` |
//!
//! Property defaults are applied by the lookup functions (`p`, `has_p`,
//! `link`, `has_link`, `link_p`, see [`functions`]), never by rewriting the tree.
//!
//! ```text
//! bind {{ spec.networks.default.ip }}
//! port {{ p(name="redis.port") }}
//! {% for peer in consumes %}# {{ peer.name }}: {{ peer.instances | length }} instance(s)
//! {% endfor %}
//! ```

pub mod context;
pub mod error;
pub mod functions;
pub mod renderer;

pub use context::RenderContext;
pub use error::{ErrorLocation, TemplateError};
pub use renderer::TemplateRenderer;
