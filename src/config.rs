//! Planning run configuration.
//!
//! Missing JSON fields fall back to defaults:
//!
//! ```
//! use u_rota::config::{PlanConfig, RegionScope};
//!
//! let cfg = PlanConfig::from_json(r#"{ "horizon_weeks": 13 }"#).unwrap();
//! assert_eq!(cfg.horizon_weeks, 13);
//! assert_eq!(cfg.region_scope, RegionScope::PerBucket);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Default planning horizon: one year of weeks.
pub const DEFAULT_HORIZON_WEEKS: u32 = 52;

/// Which slots share a regional-diversity exclusion set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionScope {
    /// Every role in a (week, bucket) group shares one region set, so two
    /// roles on the same day avoid each other's regions.
    #[default]
    PerBucket,
    /// Each (week, bucket, role) group keeps its own region set.
    PerBucketRole,
}

/// Settings of one planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Number of weeks to plan.
    pub horizon_weeks: u32,
    /// Scope of regional diversity.
    pub region_scope: RegionScope,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            horizon_weeks: DEFAULT_HORIZON_WEEKS,
            region_scope: RegionScope::default(),
        }
    }
}

impl PlanConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the horizon length.
    pub fn with_horizon_weeks(mut self, weeks: u32) -> Self {
        self.horizon_weeks = weeks;
        self
    }

    /// Sets the region scope.
    pub fn with_region_scope(mut self, scope: RegionScope) -> Self {
        self.region_scope = scope;
        self
    }

    /// Rejects an empty horizon.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.horizon_weeks == 0 {
            return Err(ConfigurationError::InvalidHorizon(self.horizon_weeks));
        }
        Ok(())
    }
}
