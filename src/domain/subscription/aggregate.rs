//! Subscription aggregate entity.
//!
//! A subscription is a recurring payment the owner wants to keep track of.
//! The owner is fixed at creation and the status only moves forward.

use crate::domain::foundation::{
    DomainError, ErrorCode, OwnedByUser, StateMachine, SubscriptionId, Timestamp, UserId,
    ValidationError,
};

use super::{
    Category, Currency, Frequency, PaymentMethod, Price, SubscriptionName, SubscriptionPatch,
    SubscriptionStatus,
};

/// Validated input for creating a subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionDraft {
    pub name: SubscriptionName,
    pub price: Price,
    pub currency: Currency,
    pub frequency: Frequency,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub start_date: Timestamp,
    /// Derived from `start_date` and `frequency` when absent.
    pub renewal_date: Option<Timestamp>,
}

/// Subscription aggregate.
///
/// # Invariants
///
/// - `user_id` never changes after creation
/// - `start_date` is not in the future
/// - `renewal_date` is strictly after `start_date`
/// - status only transitions `Active -> Cancelled`
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    id: SubscriptionId,
    user_id: UserId,
    name: SubscriptionName,
    price: Price,
    currency: Currency,
    frequency: Frequency,
    category: Category,
    payment_method: PaymentMethod,
    start_date: Timestamp,
    renewal_date: Timestamp,
    status: SubscriptionStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Subscription {
    /// Creates a new active subscription owned by `owner`.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if `start_date` is after `now`
    /// - `InvalidFormat` if `renewal_date` is not after `start_date`
    pub fn create(
        owner: UserId,
        draft: SubscriptionDraft,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let renewal_date = draft
            .renewal_date
            .unwrap_or_else(|| draft.start_date.plus_days(draft.frequency.period_days()));
        validate_dates(&draft.start_date, &renewal_date, &now)?;

        Ok(Self {
            id: SubscriptionId::new(),
            user_id: owner,
            name: draft.name,
            price: draft.price,
            currency: draft.currency,
            frequency: draft.frequency,
            category: draft.category,
            payment_method: draft.payment_method,
            start_date: draft.start_date,
            renewal_date,
            status: SubscriptionStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a subscription from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SubscriptionId,
        user_id: UserId,
        name: SubscriptionName,
        price: Price,
        currency: Currency,
        frequency: Frequency,
        category: Category,
        payment_method: PaymentMethod,
        start_date: Timestamp,
        renewal_date: Timestamp,
        status: SubscriptionStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            price,
            currency,
            frequency,
            category,
            payment_method,
            start_date,
            renewal_date,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &SubscriptionName {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn payment_method(&self) -> &PaymentMethod {
        &self.payment_method
    }

    pub fn start_date(&self) -> &Timestamp {
        &self.start_date
    }

    pub fn renewal_date(&self) -> &Timestamp {
        &self.renewal_date
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Whole days from `now` until the renewal date, rounded down.
    ///
    /// Negative once the renewal date has passed.
    pub fn days_until_renewal(&self, now: &Timestamp) -> i64 {
        self.renewal_date
            .duration_since(now)
            .num_seconds()
            .div_euclid(86_400)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies the fields present in `patch`; absent fields keep their value.
    ///
    /// Either the whole patch applies or nothing changes.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the resulting dates break the date invariants
    pub fn apply(&mut self, patch: SubscriptionPatch, now: Timestamp) -> Result<(), DomainError> {
        let start_date = patch.start_date.unwrap_or(self.start_date);
        let renewal_date = patch.renewal_date.unwrap_or(self.renewal_date);
        if patch.start_date.is_some() || patch.renewal_date.is_some() {
            validate_dates(&start_date, &renewal_date, &now)?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(payment_method) = patch.payment_method {
            self.payment_method = payment_method;
        }
        self.start_date = start_date;
        self.renewal_date = renewal_date;
        self.updated_at = now;
        Ok(())
    }

    /// Takes the editable fields and `updated_at` from `other`.
    ///
    /// Identity, owner, status and creation time are kept. Stores use this
    /// so a field edit never rewrites the lifecycle status.
    pub fn copy_details_from(&mut self, other: &Subscription) {
        self.name = other.name.clone();
        self.price = other.price;
        self.currency = other.currency;
        self.frequency = other.frequency;
        self.category = other.category;
        self.payment_method = other.payment_method.clone();
        self.start_date = other.start_date;
        self.renewal_date = other.renewal_date;
        self.updated_at = other.updated_at;
    }

    /// Cancels an active subscription.
    ///
    /// # Errors
    ///
    /// - `AlreadyCancelled` if the subscription is already cancelled; the
    ///   status is left untouched
    pub fn cancel(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(SubscriptionStatus::Cancelled)
            .map_err(|_| already_cancelled(&self.id))?;
        self.updated_at = now;
        Ok(())
    }
}

impl OwnedByUser for Subscription {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Conflict raised when cancelling a subscription that is not active.
pub fn already_cancelled(id: &SubscriptionId) -> DomainError {
    DomainError::new(ErrorCode::AlreadyCancelled, "Subscription is already cancelled")
        .with_detail("subscription_id", id.to_string())
}

fn validate_dates(
    start_date: &Timestamp,
    renewal_date: &Timestamp,
    now: &Timestamp,
) -> Result<(), DomainError> {
    if start_date.is_after(now) {
        return Err(ValidationError::invalid_format(
            "startDate",
            "Start date must be in the past",
        )
        .into());
    }
    if !renewal_date.is_after(start_date) {
        return Err(ValidationError::invalid_format(
            "renewalDate",
            "Renewal date must be after the start date",
        )
        .into());
    }
    Ok(())
}
