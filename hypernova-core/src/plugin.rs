//! Plugin hooks: the extension points of the render pipeline.
//!
//! A renderer holds an ordered list of plugins and calls them in
//! registration order at each stage:
//!
//! | Stage            | Hook                  | Chaining                                    |
//! |------------------|-----------------------|---------------------------------------------|
//! | build jobs       | `get_view_data`       | per job, each plugin sees the previous output |
//! | prepare          | `prepare_request`     | whole collection, chained                   |
//! | decide           | `should_send_request` | stops at the first plugin returning `false` |
//! | send             | `will_send_request`   | every plugin, only when sending             |
//! | any error        | `on_error`            | every plugin                                |
//! | finalize         | `on_success`          | every plugin, once per successful result    |
//! | finalize         | `after_response`      | whole result set, chained                   |
//!
//! Every hook has a pass-through default, so an implementation only
//! overrides the stages it cares about.

use crate::error::{PluginError, RenderError};
use crate::types::{Data, JobResult, JobResults, Jobs};

/// Pipeline extension point.
///
/// Plugins are shared across render calls; a renderer used from several
/// threads calls the same plugin instance concurrently.
pub trait Plugin: Send + Sync {
    /// Transform one job's data before the job is built.
    ///
    /// On error the data is left as it was for this plugin's pass and the
    /// error is delivered to `on_error` with the full job snapshot.
    fn get_view_data(&self, _name: &str, data: &Data) -> Result<Data, PluginError> {
        Ok(data.clone())
    }

    /// Transform the job collection just before the send decision.
    ///
    /// `original_jobs` is always the untransformed snapshot. Map keys are
    /// authoritative: after the chain each job's `name` is reset to its key.
    fn prepare_request(&self, jobs: Jobs, _original_jobs: &Jobs) -> Jobs {
        jobs
    }

    /// Veto the network request. Plugins after the first `false` are not asked.
    fn should_send_request(&self, _jobs: &Jobs) -> bool {
        true
    }

    /// Called right before the request goes out.
    fn will_send_request(&self, _jobs: &Jobs) {}

    /// Called for every error seen during a render, with the jobs it concerns.
    fn on_error(&self, _err: &RenderError, _jobs: &Jobs) {}

    /// Called once per successful result.
    fn on_success(&self, _result: &JobResult) {}

    /// Final transform of the result collection.
    fn after_response(&self, results: JobResults) -> JobResults {
        results
    }
}
