//! Development warning banner for failed renders.
//!
//! Meant for local development only: the banner exposes error messages to
//! whoever views the page.

use hypernova_core::{JobResult, JobResults, Plugin};

/// Prefixes the HTML of every result that carries an error with a red
/// "Development Warning!" banner naming the job and the error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevModePlugin;

impl DevModePlugin {
    pub fn new() -> Self {
        DevModePlugin
    }

    fn wrap_error(mut result: JobResult) -> JobResult {
        let message = match &result.error {
            Some(err) => escape_html(&err.message),
            None => return result,
        };
        result.html = format!(
            concat!(
                "<div style=\"background-color: #ff5a5f; color: #fff; padding: 12px;\">\n",
                "  <p style=\"margin: 0\"><strong>Development Warning!</strong></p>\n",
                "  <p>The <code>{name}</code> component failed to render with Hypernova. ",
                "Error message: {message}</p>\n",
                "</div>\n",
                "{html}"
            ),
            name = escape_html(result.name()),
            message = message,
            html = result.html,
        );
        result
    }
}

impl Plugin for DevModePlugin {
    fn after_response(&self, results: JobResults) -> JobResults {
        results
            .into_iter()
            .map(|(name, result)| (name, Self::wrap_error(result)))
            .collect()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
