//! Hypernova core library: render jobs and everything needed to send them.
//!
//! Public API surface:
//! - [`types`] — [`Job`], [`JobResult`], [`Response`] and the keyed collections
//! - [`error`] — [`RenderError`] and friends
//! - [`plugin`] — the [`Plugin`] hook trait
//! - [`wire`] — request encoding / reply decoding
//! - [`fallback`] — client-side placeholder markup

pub mod error;
pub mod fallback;
pub mod plugin;
pub mod types;
pub mod wire;

pub use error::{JobError, PluginError, RenderError, TransportError};
pub use plugin::Plugin;
pub use types::{Data, Job, JobResult, JobResults, Jobs, Response};
