//! Upcoming-renewal selection.
//!
//! The repository narrows candidates with a range query; [`select_upcoming`]
//! re-applies the window, status and owner rules and fixes the ordering, so
//! the result holds the same guarantees whatever adapter produced the input.

use crate::domain::foundation::{AuthenticatedUser, SubscriptionId, Timestamp};
use serde::Serialize;

use super::{Category, Currency, Frequency, Subscription, SubscriptionStatus};

/// Length of the forward-looking renewal window.
pub const RENEWAL_WINDOW_DAYS: i64 = 7;

/// Closed interval `[start, end]` of renewal dates to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl RenewalWindow {
    /// The window beginning at `now` and spanning [`RENEWAL_WINDOW_DAYS`].
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            start: now,
            end: now.plus_days(RENEWAL_WINDOW_DAYS),
        }
    }

    pub fn contains(&self, ts: &Timestamp) -> bool {
        ts >= &self.start && ts <= &self.end
    }
}

/// Reduced view of a subscription that renews soon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRenewal {
    pub id: SubscriptionId,
    pub name: String,
    pub renewal_date: Timestamp,
    pub days_until_renewal: i64,
    pub currency: Currency,
    pub price: f64,
    pub frequency: Frequency,
    pub category: Category,
    pub status: SubscriptionStatus,
}

impl UpcomingRenewal {
    fn project(subscription: &Subscription, now: &Timestamp) -> Self {
        Self {
            id: *subscription.id(),
            name: subscription.name().as_str().to_string(),
            renewal_date: *subscription.renewal_date(),
            days_until_renewal: subscription.days_until_renewal(now),
            currency: subscription.currency(),
            price: subscription.price().amount(),
            frequency: subscription.frequency(),
            category: subscription.category(),
            status: subscription.status(),
        }
    }
}

/// Picks the active subscriptions renewing inside `window`, scoped to the
/// requester unless they are an admin, earliest renewal first.
///
/// Equal renewal dates are ordered by id.
pub fn select_upcoming<I>(
    candidates: I,
    requester: &AuthenticatedUser,
    window: &RenewalWindow,
) -> Vec<UpcomingRenewal>
where
    I: IntoIterator<Item = Subscription>,
{
    let mut selected: Vec<Subscription> = candidates
        .into_iter()
        .filter(|s| s.status().is_active())
        .filter(|s| window.contains(s.renewal_date()))
        .filter(|s| requester.is_admin || s.user_id() == &requester.id)
        .collect();

    selected.sort_by(|a, b| {
        a.renewal_date()
            .cmp(b.renewal_date())
            .then_with(|| a.id().cmp(b.id()))
    });

    selected
        .iter()
        .map(|s| UpcomingRenewal::project(s, &window.start))
        .collect()
}
