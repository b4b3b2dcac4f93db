//! # hypernova-renderer
//!
//! Client-side orchestrator for a batch server-side rendering service.
//! Jobs go through the plugin chain, out in one request, and come back as
//! per-job results. When the request is vetoed or fails, every job gets
//! client-side fallback markup instead.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hypernova_core::Job;
//! use hypernova_renderer::Renderer;
//!
//! let renderer = Renderer::new("http://localhost:3030/batch");
//! renderer.add_job("Nav", Job::new("Nav").insert_data("user", "ada"));
//! let response = renderer.render();
//! if let Some(html) = response.html("Nav") {
//!     println!("{html}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod renderer;
pub mod transport;

pub use config::RendererConfig;
pub use error::ConfigError;
pub use renderer::Renderer;
pub use transport::{Transport, TransportSettings, UreqTransport};
