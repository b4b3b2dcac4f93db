//! Render orchestration over the job registry and the plugin chain.
//!
//! ## `render` pipeline
//!
//! 1. Snapshot the registry.
//! 2. Build jobs: run `get_view_data` on every job through every plugin.
//! 3. Prepare: chain `prepare_request`, then ask `should_send_request`
//!    (stops at the first veto).
//! 4. Vetoed → fallback markup, no error.
//! 5. Send: `will_send_request`, encode, POST, decode.
//! 6. Exchange failure → `on_error` with every job, fallback markup, error set.
//! 7. Finalize: per-job `on_error`, then `on_success`, then chain `after_response`.
//!
//! Every stage runs sequentially on the calling thread; `render` never fails.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use hypernova_core::{
    fallback, wire, Job, JobResults, Jobs, Plugin, RenderError, Response,
};

use crate::config::RendererConfig;
use crate::transport::{Transport, UreqTransport};

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Client for a batch rendering service.
///
/// Configure the endpoint, transport, and plugins once, then reuse across
/// render calls. `add_job` and `render` take `&self` and may be called from
/// several threads; each `render` works on its own snapshot of the jobs.
pub struct Renderer {
    url: String,
    plugins: Vec<Arc<dyn Plugin>>,
    transport: Box<dyn Transport>,
    jobs: Mutex<Jobs>,
}

impl Renderer {
    /// Renderer posting to `url` over HTTP with no timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_transport(url, UreqTransport::default())
    }

    /// Renderer using a caller-supplied [`Transport`].
    pub fn with_transport(url: impl Into<String>, transport: impl Transport + 'static) -> Self {
        Renderer {
            url: url.into(),
            plugins: Vec::new(),
            transport: Box::new(transport),
            jobs: Mutex::new(Jobs::new()),
        }
    }

    /// Renderer built from a [`RendererConfig`], HTTP transport with the
    /// configured timeouts.
    pub fn from_config(config: &RendererConfig) -> Self {
        Self::with_transport(
            config.url.clone(),
            UreqTransport::new(&config.transport_settings()),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Append a plugin. Plugins run in the order they were added.
    pub fn add_plugin(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Builder form of [`Renderer::add_plugin`].
    pub fn with_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.add_plugin(plugin);
        self
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Register `job` under `name`, replacing any job already registered
    /// under that name. The registry key wins over `job.name`.
    ///
    /// Empty names are ignored.
    pub fn add_job(&self, name: impl Into<String>, mut job: Job) {
        let name = name.into();
        if name.is_empty() {
            tracing::warn!("ignoring job registered with an empty name");
            return;
        }
        job.name = name.clone();
        self.lock_jobs().insert(name, job);
    }

    /// Independent copy of the registered jobs.
    pub fn jobs(&self) -> Jobs {
        self.lock_jobs().clone()
    }

    /// Drop every registered job.
    pub fn clear_jobs(&self) {
        self.lock_jobs().clear();
    }

    /// Run the pipeline over a snapshot of the registered jobs.
    pub fn render(&self) -> Response {
        let started = Instant::now();
        let snapshot = self.jobs();
        tracing::debug!(jobs = snapshot.len(), url = %self.url, "render started");

        let jobs = self.create_jobs(&snapshot);
        let (should_send, jobs) = self.prepare_request(jobs);

        if !should_send {
            tracing::debug!("request vetoed by plugin; rendering fallback");
            return self.fallback(None, &jobs);
        }
        if jobs.is_empty() {
            tracing::debug!("no jobs to send");
            return Response::default();
        }

        let response = match self.make_request(&jobs) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "render request failed; rendering fallback");
                self.notify_error(&err, &jobs);
                self.fallback(Some(err), &jobs)
            }
        };
        tracing::debug!(
            results = response.results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "render finished"
        );
        response
    }

    // -----------------------------------------------------------------------
    // Pipeline stages
    // -----------------------------------------------------------------------

    fn create_jobs(&self, snapshot: &Jobs) -> Jobs {
        let mut jobs = Jobs::new();
        for (name, job) in snapshot {
            let mut created = job.clone();
            for plugin in &self.plugins {
                match plugin.get_view_data(&created.name, &created.data) {
                    Ok(data) => created.data = data,
                    Err(source) => {
                        let err = RenderError::ViewData {
                            job: name.clone(),
                            source,
                        };
                        tracing::warn!(job = %name, error = %err, "view data hook failed");
                        self.notify_error(&err, snapshot);
                    }
                }
            }
            jobs.insert(name.clone(), created);
        }
        jobs
    }

    fn prepare_request(&self, jobs: Jobs) -> (bool, Jobs) {
        let mut prepared = jobs.clone();
        for plugin in &self.plugins {
            prepared = plugin.prepare_request(prepared, &jobs);
        }
        // The map key is the job's identity on the wire and in the fallback.
        for (name, job) in prepared.iter_mut() {
            if job.name != *name {
                tracing::debug!(key = %name, job = %job.name, "renaming prepared job to its key");
                job.name = name.clone();
            }
        }
        let should_send = self
            .plugins
            .iter()
            .all(|plugin| plugin.should_send_request(&prepared));
        (should_send, prepared)
    }

    fn make_request(&self, jobs: &Jobs) -> Result<Response, RenderError> {
        for plugin in &self.plugins {
            plugin.will_send_request(jobs);
        }

        let body = wire::encode_request(jobs)?;
        let reply = self.transport.post_json(&self.url, &body)?;
        let decoded = wire::decode_response(&reply, jobs)?;
        tracing::debug!(results = decoded.results.len(), "render reply decoded");

        if let Some(message) = decoded.service_error {
            let err = RenderError::Service(message);
            tracing::warn!(error = %err, "rendering service reported an error");
            self.notify_error(&err, jobs);
        }

        Ok(self.finalize(decoded.results))
    }

    fn finalize(&self, results: JobResults) -> Response {
        for result in results.values() {
            if let Some(job_error) = &result.error {
                let err = RenderError::Job(job_error.clone());
                let scoped = Jobs::from([(result.name().to_string(), result.original_job.clone())]);
                self.notify_error(&err, &scoped);
            }
        }

        for result in results.values().filter(|r| r.success) {
            for plugin in &self.plugins {
                plugin.on_success(result);
            }
        }

        let results = self
            .plugins
            .iter()
            .fold(results, |acc, plugin| plugin.after_response(acc));

        Response {
            results,
            error: None,
        }
    }

    fn fallback(&self, error: Option<RenderError>, jobs: &Jobs) -> Response {
        Response {
            results: fallback::fallback_results(jobs),
            error,
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn notify_error(&self, err: &RenderError, jobs: &Jobs) {
        for plugin in &self.plugins {
            plugin.on_error(err, jobs);
        }
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, Jobs> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
