//! Reminder workflow configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Settings for the hosted workflow service that sends renewal reminders
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Turn reminder scheduling on. When off, creation never triggers a run.
    #[serde(default)]
    pub enabled: bool,

    /// Workflow service base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the workflow service
    pub token: Option<SecretString>,

    /// Public URL of this server, used to build the callback target
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Trigger request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl WorkflowConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate workflow configuration. Nothing is checked while disabled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if self.token.is_none() {
            return Err(ValidationError::MissingRequired("WORKFLOW__TOKEN"));
        }
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidWorkflowUrl("base_url"));
        }
        if !is_http_url(&self.server_url) {
            return Err(ValidationError::InvalidWorkflowUrl("server_url"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            token: None,
            server_url: default_server_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_base_url() -> String {
    "https://qstash.upstash.io".to_string()
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    10
}
