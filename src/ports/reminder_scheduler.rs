//! Reminder workflow trigger port.
//!
//! Creating a subscription asks an external workflow service to schedule
//! renewal reminders. Only the trigger acknowledgement is awaited and a
//! failed trigger is never retried here.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::domain::foundation::SubscriptionId;

/// Identifier of a started workflow run, as returned by the workflow service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkflowRunId(String);

impl WorkflowRunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkflowRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Triggers the reminder workflow for a subscription.
#[async_trait]
pub trait ReminderScheduler: Send + Sync {
    /// Start the reminder workflow keyed by `subscription_id`, with zero retries.
    async fn trigger_reminder(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<WorkflowRunId, WorkflowError>;
}

/// Errors from triggering a workflow.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Workflow triggering is switched off in configuration.
    #[error("workflow triggering is disabled")]
    Disabled,

    #[error("workflow service unreachable: {0}")]
    Transport(String),

    #[error("workflow service rejected trigger with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("unexpected workflow response: {0}")]
    InvalidResponse(String),
}
