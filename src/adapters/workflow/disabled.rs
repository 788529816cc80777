//! Scheduler used when workflow triggering is switched off.

use async_trait::async_trait;

use crate::domain::foundation::SubscriptionId;
use crate::ports::{ReminderScheduler, WorkflowError, WorkflowRunId};

/// Always reports `WorkflowError::Disabled`; creation proceeds without a run id.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledReminderScheduler;

#[async_trait]
impl ReminderScheduler for DisabledReminderScheduler {
    async fn trigger_reminder(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<WorkflowRunId, WorkflowError> {
        tracing::debug!(subscription_id = %subscription_id, "reminder workflow disabled");
        Err(WorkflowError::Disabled)
    }
}
