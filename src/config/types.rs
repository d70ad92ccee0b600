//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed policy structure that is
//! deserialized from the engine's YAML configuration file. Every field
//! has a default, so an empty policy file is valid.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// How an interval that spans a site-local midnight is attributed to days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidnightPolicy {
    /// The whole interval counts toward the day it started.
    #[default]
    AttributeToStart,
    /// The interval is cut at each midnight and each piece counts toward
    /// its own day.
    SplitAtMidnight,
}

/// Engine-wide policy knobs controlling reconciliation and aggregation.
///
/// # Example
///
/// ```
/// use attendance_engine::config::EnginePolicy;
///
/// let policy = EnginePolicy::default();
/// assert_eq!(policy.timezone, "UTC");
/// assert_eq!(policy.lookback_days, 1);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct EnginePolicy {
    /// IANA timezone used to attribute punch instants to site-local days.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Days of punches fetched before a requested range so intervals that
    /// open earlier can still be closed. The loader rejects zero.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Seconds subtracted from a clock-in that force-closes a dangling
    /// interval left by a missed clock-out.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: i64,
    /// Attribution for intervals spanning a site-local midnight.
    #[serde(default)]
    pub midnight: MidnightPolicy,
    /// Whether anomalous intervals add to worked minutes.
    #[serde(default = "default_count_anomalous_minutes")]
    pub count_anomalous_minutes: bool,
    /// Lifetime of read-through cache entries, in seconds.
    #[serde(default = "default_cache_staleness_seconds")]
    pub cache_staleness_seconds: u64,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_lookback_days() -> u32 {
    1
}

fn default_tick_seconds() -> i64 {
    1
}

fn default_count_anomalous_minutes() -> bool {
    true
}

fn default_cache_staleness_seconds() -> u64 {
    300
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            lookback_days: default_lookback_days(),
            tick_seconds: default_tick_seconds(),
            midnight: MidnightPolicy::default(),
            count_anomalous_minutes: default_count_anomalous_minutes(),
            cache_staleness_seconds: default_cache_staleness_seconds(),
        }
    }
}

impl EnginePolicy {
    /// Parses the configured timezone name.
    ///
    /// # Returns
    ///
    /// Returns the timezone, or `InvalidTimezone` if the name is not a
    /// known IANA identifier.
    pub fn site_timezone(&self) -> EngineResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| EngineError::InvalidTimezone {
                name: self.timezone.clone(),
            })
    }
}
