//! Attendance and time-balance engine
//!
//! This crate turns raw clock-in/clock-out punch events into daily
//! attendance facts and monthly overtime/deficit balances. It reconciles
//! noisy punch streams into work intervals, resolves shift schedules,
//! folds daily deltas into monthly balances, and publishes read-only
//! dashboard metrics over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod publisher;
pub mod store;
