//! `tracing` reporter for pipeline notifications.

use hypernova_core::{JobResult, Jobs, Plugin, RenderError};

/// Logs `will_send_request`, `on_error`, and `on_success` notifications.
///
/// Transforming hooks keep their pass-through defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPlugin;

impl LoggingPlugin {
    pub fn new() -> Self {
        LoggingPlugin
    }
}

fn job_names(jobs: &Jobs) -> String {
    jobs.keys().map(String::as_str).collect::<Vec<_>>().join(",")
}

impl Plugin for LoggingPlugin {
    fn will_send_request(&self, jobs: &Jobs) {
        tracing::debug!(jobs = %job_names(jobs), "sending render request");
    }

    fn on_error(&self, err: &RenderError, jobs: &Jobs) {
        tracing::error!(error = %err, jobs = %job_names(jobs), "render error");
    }

    fn on_success(&self, result: &JobResult) {
        tracing::debug!(
            job = %result.name(),
            duration_ms = result.duration.as_millis() as u64,
            "job rendered"
        );
    }
}
