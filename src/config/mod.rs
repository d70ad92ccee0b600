//! Configuration loading and management for the attendance engine.
//!
//! This module provides the engine policy loaded from a YAML file:
//! site timezone, reconciliation knobs, midnight attribution, and cache
//! staleness.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::EnginePolicy;
//!
//! let policy = EnginePolicy::load("./config/engine.yaml").unwrap();
//! println!("Site timezone: {}", policy.timezone);
//! ```

mod loader;
mod types;

pub use types::{EnginePolicy, MidnightPolicy};
