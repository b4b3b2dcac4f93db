//! Domain types for render requests and their outcomes.
//!
//! Collections are keyed by job name. Re-inserting a name replaces the
//! previous entry, which makes job registration idempotent.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{JobError, RenderError};

// ---------------------------------------------------------------------------
// Aliases
// ---------------------------------------------------------------------------

/// JSON object payload carried by a [`Job`] (`data` and `metadata`).
pub type Data = Map<String, Value>;

/// Jobs keyed by job name.
pub type Jobs = BTreeMap<String, Job>;

/// Results keyed by job name.
pub type JobResults = BTreeMap<String, JobResult>;

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// One named render request.
///
/// Serializes to the `{ "name", "data", "metadata" }` shape the rendering
/// service expects for each entry of the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub metadata: Data,
}

impl Job {
    /// A job with empty `data` and `metadata`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Data::new(),
            metadata: Data::new(),
        }
    }

    /// Replace the whole data payload.
    pub fn with_data(mut self, data: Data) -> Self {
        self.data = data;
        self
    }

    /// Replace the whole metadata payload.
    pub fn with_metadata(mut self, metadata: Data) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set a single data key.
    pub fn insert_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// JobResult
// ---------------------------------------------------------------------------

/// Outcome of rendering one [`Job`], from the service or from the fallback.
///
/// `original_job` is an owned copy of the job that produced the result, so
/// later hooks can recover the job's identity without sharing mutable state
/// with sibling results.
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    pub html: String,
    pub error: Option<JobError>,
    pub success: bool,
    pub original_job: Job,
    pub meta: BTreeMap<String, String>,
    pub duration: Duration,
}

impl JobResult {
    /// An empty, unsuccessful result bound to `original_job`.
    pub fn new(original_job: Job) -> Self {
        Self {
            html: String::new(),
            error: None,
            success: false,
            original_job,
            meta: BTreeMap::new(),
            duration: Duration::ZERO,
        }
    }

    /// Name of the job this result belongs to.
    pub fn name(&self) -> &str {
        &self.original_job.name
    }
}

impl fmt::Display for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Terminal value of a render call.
///
/// `error` is only set when the results are fallback markup produced because
/// the wire exchange failed. A plugin veto yields fallback markup with no error.
#[derive(Debug, Default)]
pub struct Response {
    pub results: JobResults,
    pub error: Option<RenderError>,
}

impl Response {
    /// Result for the job named `name`.
    pub fn get(&self, name: &str) -> Option<&JobResult> {
        self.results.get(name)
    }

    /// Rendered markup for the job named `name`.
    pub fn html(&self, name: &str) -> Option<&str> {
        self.results.get(name).map(|r| r.html.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
