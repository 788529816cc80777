//! Reminder workflow adapters.

mod disabled;
mod http_scheduler;

pub use disabled::DisabledReminderScheduler;
pub use http_scheduler::{HttpReminderScheduler, WorkflowClientConfig};
