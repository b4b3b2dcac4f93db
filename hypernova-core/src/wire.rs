//! Wire codec for the rendering service.
//!
//! Request body: a JSON object keyed by job name, each value a serialized
//! [`Job`](crate::Job).
//!
//! Response body:
//!
//! ```text
//! {
//!   "result": { "<name>": { "html", "error"?, "success", "meta"?, "duration" }, ... },
//!   "error"?: "<message>"
//! }
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{JobError, RenderError};
use crate::types::{Job, JobResult, JobResults, Jobs};

// ---------------------------------------------------------------------------
// Reply shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub result: Option<BTreeMap<String, WireJobResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireJobResult {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<WireError>,
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, String>>,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Job-level error, either a bare message or a serialized exception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireError {
    Message(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
        message: String,
        #[serde(default)]
        stack: Vec<String>,
    },
}

impl WireError {
    fn into_job_error(self) -> Option<JobError> {
        match self {
            WireError::Message(message) if message.is_empty() => None,
            WireError::Message(message) => Some(JobError::new(message)),
            WireError::Detailed { name, message, stack } => Some(JobError {
                message,
                name,
                stack,
            }),
        }
    }
}

impl WireJobResult {
    fn into_result(self, original_job: Job) -> JobResult {
        let error = self.error.and_then(WireError::into_job_error);
        let duration = self
            .duration
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or_default();
        JobResult {
            html: self.html.unwrap_or_default(),
            success: self.success && error.is_none(),
            error,
            original_job,
            meta: self.meta.unwrap_or_default(),
            duration,
        }
    }
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// A decoded reply: one result per sent job, plus the service's top-level
/// error message if it sent a non-empty one.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedResponse {
    pub results: JobResults,
    pub service_error: Option<String>,
}

/// Serialize the job collection into a request body.
pub fn encode_request(jobs: &Jobs) -> Result<String, RenderError> {
    serde_json::to_string(jobs).map_err(RenderError::Encode)
}

/// Parse a reply body against the jobs that were sent.
///
/// Fails with [`RenderError::EmptyResult`] when `result` is empty or absent,
/// and with `UnknownJob` / `MissingResult` when the reply's keys do not
/// match the sent job names exactly.
pub fn decode_response(body: &str, sent: &Jobs) -> Result<DecodedResponse, RenderError> {
    let reply: WireResponse = serde_json::from_str(body).map_err(RenderError::Decode)?;

    let entries = reply.result.unwrap_or_default();
    if entries.is_empty() {
        return Err(RenderError::EmptyResult);
    }

    let mut results = JobResults::new();
    for (name, entry) in entries {
        let job = sent
            .get(&name)
            .ok_or_else(|| RenderError::UnknownJob { name: name.clone() })?;
        results.insert(name, entry.into_result(job.clone()));
    }

    if let Some(name) = sent.keys().find(|name| !results.contains_key(*name)) {
        return Err(RenderError::MissingResult { name: name.clone() });
    }

    Ok(DecodedResponse {
        results,
        service_error: reply.error.filter(|message| !message.is_empty()),
    })
}
