//! In-memory adapters.
//!
//! `InMemoryStore` backs every persistence port without a database. It is
//! used by the test suites and when no `database.url` is configured.

mod store;

pub use store::{FailurePoint, InMemoryStore};
