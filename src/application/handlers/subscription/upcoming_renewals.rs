//! UpcomingRenewalsHandler - Query for subscriptions renewing this week.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Timestamp};
use crate::domain::subscription::{select_upcoming, RenewalWindow, UpcomingRenewal};
use crate::ports::SubscriptionRepository;

#[derive(Debug, Clone)]
pub struct UpcomingRenewalsQuery {
    pub requester: AuthenticatedUser,
}

pub struct UpcomingRenewalsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl UpcomingRenewalsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    /// Active subscriptions renewing in the next seven days, earliest first.
    ///
    /// Admins see every user's renewals; everyone else only their own.
    pub async fn handle(
        &self,
        query: UpcomingRenewalsQuery,
    ) -> Result<Vec<UpcomingRenewal>, DomainError> {
        let window = RenewalWindow::starting_at(Timestamp::now());
        let owner = (!query.requester.is_admin).then_some(&query.requester.id);

        let candidates = self.repository.find_renewing_within(&window, owner).await?;
        Ok(select_upcoming(candidates, &query.requester, &window))
    }
}
