//! Blocking request/response transport.
//!
//! The renderer only needs "POST this JSON, give me the reply body".
//! [`UreqTransport`] does that over HTTP; tests and embedders can supply any
//! other [`Transport`].

use std::time::Duration;

use hypernova_core::TransportError;

/// One blocking JSON round trip.
pub trait Transport: Send + Sync {
    /// POST `body` to `url` and return the reply body.
    fn post_json(&self, url: &str, body: &str) -> Result<String, TransportError>;
}

/// Timeouts and identification for [`UreqTransport`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportSettings {
    pub connect_timeout: Option<Duration>,
    /// Overall deadline for the whole exchange.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// HTTP transport backed by a shared `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(settings: &TransportSettings) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.timeout_connect(timeout);
        }
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Self {
            agent: builder.build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&TransportSettings::default())
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<String, TransportError> {
        let response = match self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_string(body)
        {
            Ok(response) => response,
            // The service reports failures inside the JSON body, so an error
            // status still goes to the decoder when the body is readable.
            Err(ureq::Error::Status(status, response)) => {
                tracing::warn!(url, status, "rendering service returned an error status");
                return response.into_string().map_err(|_| TransportError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(TransportError::Request {
                    url: url.to_string(),
                    source: Box::new(transport),
                });
            }
        };

        response.into_string().map_err(|source| TransportError::Body {
            url: url.to_string(),
            source,
        })
    }
}
