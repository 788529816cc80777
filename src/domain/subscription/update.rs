//! Partial update of a subscription.

use crate::domain::foundation::Timestamp;

use super::{Category, Currency, Frequency, PaymentMethod, Price, SubscriptionName};

/// Validated set of field changes. `None` means the key was absent.
///
/// There is no owner field: ownership is not editable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionPatch {
    pub name: Option<SubscriptionName>,
    pub price: Option<Price>,
    pub currency: Option<Currency>,
    pub frequency: Option<Frequency>,
    pub category: Option<Category>,
    pub payment_method: Option<PaymentMethod>,
    pub start_date: Option<Timestamp>,
    pub renewal_date: Option<Timestamp>,
}

impl SubscriptionPatch {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.currency.is_none()
            && self.frequency.is_none()
            && self.category.is_none()
            && self.payment_method.is_none()
            && self.start_date.is_none()
            && self.renewal_date.is_none()
    }
}
