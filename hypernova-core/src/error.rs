//! Error types for hypernova-core.

use thiserror::Error;

/// Error returned by a plugin's fallible hooks.
pub type PluginError = Box<dyn std::error::Error + Send + Sync>;

/// A render error reported by the service for a single job.
///
/// The service sends either a bare message or an object with a `message`,
/// an optional error `name`, and an optional stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct JobError {
    pub message: String,
    pub name: Option<String>,
    pub stack: Vec<String>,
}

impl JobError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: None,
            stack: Vec::new(),
        }
    }
}

/// Failures of the network exchange itself.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS, timeout, or any other failure before a reply arrived.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A reply arrived but its body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-success HTTP status with no readable body.
    #[error("{url} responded with HTTP {status} and no readable body")]
    Status { url: String, status: u16 },
}

/// Every error a render call can observe.
///
/// Only the exchange failures ([`RenderError::is_exchange_failure`]) change
/// the shape of a [`Response`](crate::Response); the rest are delivered to
/// plugins through `on_error` or carried on individual results.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A plugin's `get_view_data` hook failed for one job.
    #[error("view data for job `{job}` failed: {source}")]
    ViewData {
        job: String,
        #[source]
        source: PluginError,
    },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("request encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("response decoding error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("server response missing results")]
    EmptyResult,

    /// The reply contains a result for a job that was never sent.
    #[error("server returned a result for unknown job `{name}`")]
    UnknownJob { name: String },

    /// A sent job has no entry in the reply.
    #[error("server response has no result for job `{name}`")]
    MissingResult { name: String },

    /// Top-level `error` string of an otherwise usable reply.
    #[error("server reported an error: {0}")]
    Service(String),

    /// Job-level `error` of a single result.
    #[error("job failed to render: {0}")]
    Job(#[from] JobError),
}

impl RenderError {
    /// Whether this error aborts the wire exchange and forces fallback markup.
    pub fn is_exchange_failure(&self) -> bool {
        matches!(
            self,
            RenderError::Transport(_)
                | RenderError::Encode(_)
                | RenderError::Decode(_)
                | RenderError::EmptyResult
                | RenderError::UnknownJob { .. }
                | RenderError::MissingResult { .. }
        )
    }
}
