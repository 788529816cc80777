//! CreateSubscriptionHandler - Command handler for tracking a new subscription.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionDraft};
use crate::ports::{ReminderScheduler, SubscriptionRepository, WorkflowRunId};

/// Command to create a subscription owned by the requester.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub owner: UserId,
    pub draft: SubscriptionDraft,
}

/// Result of successful subscription creation.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionResult {
    pub subscription: Subscription,
    /// `None` when the reminder workflow could not be triggered.
    pub workflow_run_id: Option<WorkflowRunId>,
}

/// Handler for creating subscriptions.
///
/// Persisting the subscription is the commit point. The reminder trigger
/// runs afterwards and its failure never undoes the creation.
pub struct CreateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
    scheduler: Arc<dyn ReminderScheduler>,
}

impl CreateSubscriptionHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> Self {
        Self {
            repository,
            scheduler,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<CreateSubscriptionResult, DomainError> {
        // 1. Build aggregate (validates dates, derives renewal)
        let subscription = Subscription::create(cmd.owner, cmd.draft, Timestamp::now())?;

        // 2. Persist
        self.repository.save(&subscription).await?;

        tracing::info!(
            subscription_id = %subscription.id(),
            user_id = %subscription.user_id(),
            "subscription created"
        );

        // 3. Best-effort reminder trigger
        let workflow_run_id = match self.scheduler.trigger_reminder(subscription.id()).await {
            Ok(run_id) => {
                tracing::info!(
                    subscription_id = %subscription.id(),
                    workflow_run_id = %run_id,
                    "reminder workflow triggered"
                );
                Some(run_id)
            }
            Err(e) => {
                tracing::warn!(
                    subscription_id = %subscription.id(),
                    error = %e,
                    "reminder workflow trigger failed"
                );
                None
            }
        };

        Ok(CreateSubscriptionResult {
            subscription,
            workflow_run_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{draft, seeded_store};
    use crate::domain::foundation::{ErrorCode, ErrorKind, SubscriptionId};
    use crate::ports::WorkflowError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingScheduler {
        triggered: Mutex<Vec<SubscriptionId>>,
        fail: bool,
    }

    impl RecordingScheduler {
        fn ok() -> Self {
            Self {
                triggered: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                triggered: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl ReminderScheduler for RecordingScheduler {
        async fn trigger_reminder(
            &self,
            subscription_id: &SubscriptionId,
        ) -> Result<WorkflowRunId, WorkflowError> {
            self.triggered.lock().unwrap().push(*subscription_id);
            if self.fail {
                Err(WorkflowError::Transport("connection refused".to_string()))
            } else {
                Ok(WorkflowRunId::new(format!("wfr_{}", subscription_id)))
            }
        }
    }

    #[tokio::test]
    async fn creates_subscription_and_triggers_reminder() {
        let (store, alice, _) = seeded_store().await;
        let scheduler = Arc::new(RecordingScheduler::ok());
        let handler = CreateSubscriptionHandler::new(Arc::new(store.clone()), scheduler.clone());

        let result = handler
            .handle(CreateSubscriptionCommand {
                owner: *alice.id(),
                draft: draft(),
            })
            .await
            .unwrap();

        assert_eq!(result.subscription.user_id(), alice.id());
        assert_eq!(
            result.workflow_run_id,
            Some(WorkflowRunId::new(format!("wfr_{}", result.subscription.id())))
        );
        assert_eq!(
            scheduler.triggered.lock().unwrap().as_slice(),
            &[*result.subscription.id()]
        );
        assert_eq!(store.subscription_count().await, 1);
    }

    #[tokio::test]
    async fn trigger_failure_keeps_the_subscription() {
        let (store, alice, _) = seeded_store().await;
        let handler = CreateSubscriptionHandler::new(
            Arc::new(store.clone()),
            Arc::new(RecordingScheduler::failing()),
        );

        let result = handler
            .handle(CreateSubscriptionCommand {
                owner: *alice.id(),
                draft: draft(),
            })
            .await
            .unwrap();

        assert!(result.workflow_run_id.is_none());
        assert_eq!(store.subscription_count().await, 1);
    }

    #[tokio::test]
    async fn invalid_dates_are_rejected_before_persisting() {
        let (store, alice, _) = seeded_store().await;
        let scheduler = Arc::new(RecordingScheduler::ok());
        let handler = CreateSubscriptionHandler::new(Arc::new(store.clone()), scheduler.clone());

        let mut bad = draft();
        bad.start_date = Timestamp::now().plus_days(3);
        let err = handler
            .handle(CreateSubscriptionCommand {
                owner: *alice.id(),
                draft: bad,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.subscription_count().await, 0);
        assert!(scheduler.triggered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_owner_is_rejected() {
        let (store, _, _) = seeded_store().await;
        let handler =
            CreateSubscriptionHandler::new(Arc::new(store), Arc::new(RecordingScheduler::ok()));

        let err = handler
            .handle(CreateSubscriptionCommand {
                owner: UserId::new(),
                draft: draft(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
