//! Subscription module - tracked recurring payments.
//!
//! # Domain Invariants
//!
//! 1. Owner is set once at creation and never reassigned
//! 2. Status moves `active -> cancelled` only; a second cancel is a conflict
//! 3. Renewal date is after the start date, which is not in the future
//! 4. Updates touch only the fields present in the request

mod aggregate;
mod renewal;
mod status;
mod update;
mod values;

pub use aggregate::{already_cancelled, Subscription, SubscriptionDraft};
pub use renewal::{select_upcoming, RenewalWindow, UpcomingRenewal, RENEWAL_WINDOW_DAYS};
pub use status::SubscriptionStatus;
pub use update::SubscriptionPatch;
pub use values::{Category, Currency, Frequency, PaymentMethod, Price, SubscriptionName};
