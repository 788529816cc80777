//! Upstash-style workflow trigger over HTTP.
//!
//! Triggering is `POST {base_url}/v2/trigger/{workflow_url}` where the
//! workflow URL points back at this service's reminder endpoint. The
//! service replies with `{"workflowRunId": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SubscriptionId;
use crate::ports::{ReminderScheduler, WorkflowError, WorkflowRunId};

/// Path of the reminder workflow endpoint on this service.
const REMINDER_WORKFLOW_PATH: &str = "/api/v1/workflows/subscription/reminder";

/// Connection settings for the workflow service.
#[derive(Debug, Clone)]
pub struct WorkflowClientConfig {
    /// Workflow service base URL (e.g. "https://qstash.upstash.io")
    pub base_url: String,
    pub token: SecretString,
    /// Public URL of this API, used to build the workflow URL
    pub server_url: String,
    pub timeout: Duration,
}

impl WorkflowClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        token: SecretString,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            server_url: server_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn workflow_url(&self) -> String {
        format!(
            "{}{}",
            self.server_url.trim_end_matches('/'),
            REMINDER_WORKFLOW_PATH
        )
    }

    fn trigger_url(&self) -> String {
        format!(
            "{}/v2/trigger/{}",
            self.base_url.trim_end_matches('/'),
            self.workflow_url()
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerBody {
    subscription_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriggerResponse {
    workflow_run_id: String,
}

/// Reminder scheduler backed by the workflow service's HTTP API.
pub struct HttpReminderScheduler {
    config: WorkflowClientConfig,
    http_client: reqwest::Client,
}

impl HttpReminderScheduler {
    pub fn new(config: WorkflowClientConfig) -> Result<Self, WorkflowError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WorkflowError::Transport(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl ReminderScheduler for HttpReminderScheduler {
    async fn trigger_reminder(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<WorkflowRunId, WorkflowError> {
        let url = self.config.trigger_url();
        tracing::debug!(url = %url, subscription_id = %subscription_id, "triggering reminder workflow");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.token.expose_secret())
            .header("Upstash-Retries", "0")
            .json(&TriggerBody {
                subscription_id: subscription_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| WorkflowError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkflowError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: TriggerResponse = response
            .json()
            .await
            .map_err(|e| WorkflowError::InvalidResponse(e.to_string()))?;

        Ok(WorkflowRunId::new(body.workflow_run_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> WorkflowClientConfig {
        WorkflowClientConfig::new(
            base,
            SecretString::new("qstash-token".to_string()),
            "https://api.subtrack.dev/",
        )
    }

    #[test]
    fn trigger_url_embeds_workflow_url() {
        assert_eq!(
            config("https://qstash.upstash.io/").trigger_url(),
            "https://qstash.upstash.io/v2/trigger/https://api.subtrack.dev/api/v1/workflows/subscription/reminder"
        );
    }

    #[test]
    fn body_uses_camel_case_key() {
        let body = TriggerBody {
            subscription_id: "abc".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"subscriptionId":"abc"}"#
        );
    }

    #[test]
    fn response_parses_run_id() {
        let parsed: TriggerResponse =
            serde_json::from_str(r#"{"workflowRunId":"wfr_42","extra":true}"#).unwrap();
        assert_eq!(parsed.workflow_run_id, "wfr_42");
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let scheduler = HttpReminderScheduler::new(
            config("http://127.0.0.1:1").with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = scheduler
            .trigger_reminder(&SubscriptionId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Transport(_)));
    }
}
