//! Production transport backed by a blocking ureq agent.
//!
//! # Design
//! The agent is configured with `http_status_as_error(false)` so 4xx/5xx
//! responses come back as data rather than `Err`; interpreting statuses is
//! the client's job. Credentials are applied as a precomputed basic-auth
//! header on every request.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::debug;

use crate::config::MailmanConfig;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Blocking [`Transport`] over ureq with basic-auth credentials.
pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
}

impl UreqTransport {
    pub fn new(config: &MailmanConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        let credentials = format!("{}:{}", config.admin_user, config.admin_pass);
        Self {
            agent,
            base_url: config.base_url(),
            authorization: format!("Basic {}", BASE64.encode(credentials)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url(&request.path);
        debug!("{:?} {url}", request.method);

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self
                    .agent
                    .get(&url)
                    .header("Authorization", &self.authorization);
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self
                    .agent
                    .post(&url)
                    .header("Authorization", &self.authorization);
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                builder.send_empty()
            }
            HttpMethod::Delete => {
                let mut builder = self
                    .agent
                    .delete(&url)
                    .header("Authorization", &self.authorization);
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                builder.call()
            }
        };

        let mut response =
            result.map_err(|e| TransportError::with_source(format!("request to {url} failed"), e))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::with_source("failed to read response body", e))?;

        Ok(HttpResponse { status, body })
    }
}
