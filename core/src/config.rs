//! Client configuration.
//!
//! The host application decides where the values come from: the struct is
//! serde-derived so it can be embedded in any configuration format, and
//! [`MailmanConfig::from_env`] covers the common deployment case. Defaults
//! match a stock local Mailman core (REST listener on port 8001, API 3.1).

use serde::{Deserialize, Serialize};

/// Connection settings for a Mailman REST endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailmanConfig {
    /// Scheme and host of the REST listener, e.g. `http://localhost`.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// API version segment of the URL.
    #[serde(default = "default_api")]
    pub api: String,
    #[serde(default = "default_admin_user")]
    pub admin_user: String,
    pub admin_pass: String,
}

fn default_host() -> String {
    "http://localhost".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_api() -> String {
    "3.1".to_string()
}

fn default_admin_user() -> String {
    "restadmin".to_string()
}

impl MailmanConfig {
    /// The base URL the transport prefixes onto every request path,
    /// composed as `{host}:{port}/{api}/`.
    pub fn base_url(&self) -> String {
        format!(
            "{}:{}/{}/",
            self.host.trim_end_matches('/'),
            self.port,
            self.api
        )
    }

    /// Read settings from `MAILMAN_HOST`, `MAILMAN_PORT`, `MAILMAN_API`,
    /// `MAILMAN_ADMIN_USER` and `MAILMAN_ADMIN_PASS`, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok();
        Self {
            host: var("MAILMAN_HOST").unwrap_or_else(default_host),
            port: var("MAILMAN_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or_else(default_port),
            api: var("MAILMAN_API").unwrap_or_else(default_api),
            admin_user: var("MAILMAN_ADMIN_USER").unwrap_or_else(default_admin_user),
            admin_pass: var("MAILMAN_ADMIN_PASS").unwrap_or_default(),
        }
    }
}
