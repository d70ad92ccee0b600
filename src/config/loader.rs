//! Configuration loading functionality.
//!
//! This module loads the [`EnginePolicy`] from a YAML file and validates
//! the parts that cannot be checked by deserialization alone.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EnginePolicy;

impl EnginePolicy {
    /// Loads the engine policy from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the policy file (e.g., "./config/engine.yaml")
    ///
    /// # Returns
    ///
    /// Returns the policy on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - The configured timezone is not a known IANA identifier
    /// - `lookback_days` is zero
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::EnginePolicy;
    ///
    /// let policy = EnginePolicy::load("./config/engine.yaml")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let policy: EnginePolicy =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        // Fail at load time rather than on the first query.
        policy.site_timezone()?;
        if policy.lookback_days == 0 {
            return Err(EngineError::ConfigParseError {
                path: path_str,
                message: "lookback_days must be at least 1".to_string(),
            });
        }

        Ok(policy)
    }
}
