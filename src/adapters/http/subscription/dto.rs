//! Subscription request and response bodies. Keys are camelCase.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::subscription::{
    Category, Currency, Frequency, PaymentMethod, Price, Subscription, SubscriptionDraft,
    SubscriptionName, SubscriptionPatch, SubscriptionStatus,
};
use crate::ports::{OwnerSummary, SubscriptionWithOwner};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /subscriptions`. Any owner key is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub name: String,
    pub price: f64,
    /// Defaults to USD.
    pub currency: Option<String>,
    pub frequency: String,
    pub category: String,
    pub payment_method: String,
    pub start_date: Timestamp,
    /// Derived from the start date and frequency when omitted.
    pub renewal_date: Option<Timestamp>,
}

impl CreateSubscriptionRequest {
    pub fn into_draft(self) -> Result<SubscriptionDraft, DomainError> {
        Ok(SubscriptionDraft {
            name: SubscriptionName::parse(&self.name)?,
            price: Price::new(self.price)?,
            currency: match self.currency {
                Some(raw) => raw.parse::<Currency>()?,
                None => Currency::default(),
            },
            frequency: self.frequency.parse::<Frequency>()?,
            category: self.category.parse::<Category>()?,
            payment_method: PaymentMethod::parse(&self.payment_method)?,
            start_date: self.start_date,
            renewal_date: self.renewal_date,
        })
    }
}

/// Body of `PUT /subscriptions/:id`.
///
/// A present key is applied even when its value is falsy, so
/// `{"price": 0}` sets the price to zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub frequency: Option<String>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub start_date: Option<Timestamp>,
    pub renewal_date: Option<Timestamp>,
}

impl UpdateSubscriptionRequest {
    pub fn into_patch(self) -> Result<SubscriptionPatch, DomainError> {
        Ok(SubscriptionPatch {
            name: self.name.as_deref().map(SubscriptionName::parse).transpose()?,
            price: self.price.map(Price::new).transpose()?,
            currency: self.currency.map(|c| c.parse::<Currency>()).transpose()?,
            frequency: self.frequency.map(|f| f.parse::<Frequency>()).transpose()?,
            category: self.category.map(|c| c.parse::<Category>()).transpose()?,
            payment_method: self
                .payment_method
                .as_deref()
                .map(PaymentMethod::parse)
                .transpose()?,
            start_date: self.start_date,
            renewal_date: self.renewal_date,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub price: f64,
    pub currency: Currency,
    pub frequency: Frequency,
    pub category: Category,
    pub payment_method: String,
    pub start_date: Timestamp,
    pub renewal_date: Timestamp,
    pub status: SubscriptionStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Subscription> for SubscriptionResponse {
    fn from(s: &Subscription) -> Self {
        Self {
            id: s.id().to_string(),
            user_id: s.user_id().to_string(),
            name: s.name().as_str().to_string(),
            price: s.price().amount(),
            currency: s.currency(),
            frequency: s.frequency(),
            category: s.category(),
            payment_method: s.payment_method().as_str().to_string(),
            start_date: *s.start_date(),
            renewal_date: *s.renewal_date(),
            status: s.status(),
            created_at: *s.created_at(),
            updated_at: *s.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&OwnerSummary> for OwnerResponse {
    fn from(owner: &OwnerSummary) -> Self {
        Self {
            id: owner.id.to_string(),
            name: owner.name.clone(),
            email: owner.email.clone(),
        }
    }
}

/// Admin listing row: the subscription with its owner under `user`.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionWithOwnerResponse {
    #[serde(flatten)]
    pub subscription: SubscriptionResponse,
    pub user: OwnerResponse,
}

impl From<&SubscriptionWithOwner> for SubscriptionWithOwnerResponse {
    fn from(row: &SubscriptionWithOwner) -> Self {
        Self {
            subscription: (&row.subscription).into(),
            user: (&row.owner).into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSubscriptionResponse {
    pub subscription: SubscriptionResponse,
    /// `null` when the reminder workflow could not be triggered.
    pub workflow_run_id: Option<String>,
}
