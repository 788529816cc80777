//! Subtrack - subscription tracking API.
//!
//! Users register and manage recurring-payment subscriptions; the service
//! reports upcoming renewals and triggers reminder workflows for new
//! subscriptions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
