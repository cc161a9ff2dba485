//! Run parameters and engine configuration.
//!
//! `RunParameters` carries the per-run numbers a user types into the
//! balancing form. `BalanceConfig` carries engine behavior switches that
//! rarely change between runs. Both deserialize from JSON with defaults
//! for any missing field.

use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, Result};

/// Station fit tolerance: a task fits when `load + t <= takt + EPSILON`.
pub const DEFAULT_EPSILON: f64 = 0.01;

/// Increment used by the takt sweep.
pub const DEFAULT_TAKT_STEP: f64 = 0.5;

/// Tolerance of the infeasibility pre-check (`cycle time > takt + tol`).
pub const FEASIBILITY_TOLERANCE: f64 = 0.001;

/// Per-run numeric parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParameters {
    /// Target takt time (seconds per unit). Must be positive.
    pub takt_time: f64,
    /// Maximum number of tasks a station may hold. At least 1.
    pub max_tasks_per_station: usize,
    /// Cycle-time spread as a fraction of the bottleneck load, in [0, 1].
    pub variance_fraction: f64,
    /// Shift length in seconds. Must be positive.
    pub shift_duration_seconds: f64,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            takt_time: 60.0,
            max_tasks_per_station: 3,
            variance_fraction: 0.1,
            shift_duration_seconds: 28_800.0,
        }
    }
}

impl RunParameters {
    /// Creates parameters for the given takt time, other fields default.
    pub fn new(takt_time: f64) -> Self {
        Self {
            takt_time,
            ..Self::default()
        }
    }

    /// Sets the station size cap.
    pub fn with_max_tasks_per_station(mut self, max: usize) -> Self {
        self.max_tasks_per_station = max;
        self
    }

    /// Sets the variance fraction (0.1 = 10%).
    pub fn with_variance_fraction(mut self, fraction: f64) -> Self {
        self.variance_fraction = fraction;
        self
    }

    /// Sets the variance from a percentage as typed in the form (10 = 10%).
    pub fn with_variance_percent(mut self, percent: f64) -> Self {
        self.variance_fraction = percent / 100.0;
        self
    }

    /// Sets the shift duration in seconds.
    pub fn with_shift_duration(mut self, seconds: f64) -> Self {
        self.shift_duration_seconds = seconds;
        self
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if !(self.takt_time.is_finite() && self.takt_time > 0.0) {
            return Err(BalanceError::invalid_parameter(
                "takt_time",
                format!("must be a positive number, got {}", self.takt_time),
            ));
        }
        if self.max_tasks_per_station < 1 {
            return Err(BalanceError::invalid_parameter(
                "max_tasks_per_station",
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.variance_fraction) {
            return Err(BalanceError::invalid_parameter(
                "variance_fraction",
                format!("must be within [0, 1], got {}", self.variance_fraction),
            ));
        }
        if !(self.shift_duration_seconds.is_finite() && self.shift_duration_seconds > 0.0) {
            return Err(BalanceError::invalid_parameter(
                "shift_duration_seconds",
                format!("must be positive, got {}", self.shift_duration_seconds),
            ));
        }
        Ok(())
    }
}

/// How ranked positional weight sums successor times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpwMode {
    /// Own time plus direct successors only.
    #[default]
    DirectSuccessors,
    /// Own time plus every transitive successor (classical RPW).
    AllSuccessors,
}

/// When a tentative machine reduction is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceRule {
    /// Fewer stations, or equal stations with equal-or-better smoothness.
    #[default]
    Canonical,
    /// Any result with no more stations than the current best.
    #[deprecated(note = "ignores smoothness; use AcceptanceRule::Canonical")]
    Legacy,
}

/// Which optimization follows the initial assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceMode {
    /// Keep the requested takt, try to remove parallel machines.
    #[default]
    Fixed,
    /// Sweep takt times for the smoothest line.
    Auto,
}

/// Engine behavior switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub rpw_mode: RpwMode,
    pub acceptance_rule: AcceptanceRule,
    /// Station fit tolerance.
    pub epsilon: f64,
    /// Takt sweep increment.
    pub takt_step: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            rpw_mode: RpwMode::default(),
            acceptance_rule: AcceptanceRule::default(),
            epsilon: DEFAULT_EPSILON,
            takt_step: DEFAULT_TAKT_STEP,
        }
    }
}

impl BalanceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rpw_mode(mut self, mode: RpwMode) -> Self {
        self.rpw_mode = mode;
        self
    }

    pub fn with_acceptance_rule(mut self, rule: AcceptanceRule) -> Self {
        self.acceptance_rule = rule;
        self
    }

    pub fn with_takt_step(mut self, step: f64) -> Self {
        self.takt_step = step;
        self
    }

    /// Rejects a non-positive sweep step (the sweep would never advance).
    pub fn validate(&self) -> Result<()> {
        if !(self.takt_step.is_finite() && self.takt_step > 0.0) {
            return Err(BalanceError::invalid_parameter(
                "takt_step",
                format!("must be positive, got {}", self.takt_step),
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(BalanceError::invalid_parameter(
                "epsilon",
                format!("must be non-negative, got {}", self.epsilon),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(RunParameters::default().validate().is_ok());
        assert!(BalanceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parameter_builder() {
        let p = RunParameters::new(45.0)
            .with_max_tasks_per_station(2)
            .with_variance_percent(15.0)
            .with_shift_duration(3600.0);
        assert_eq!(p.takt_time, 45.0);
        assert_eq!(p.max_tasks_per_station, 2);
        assert!((p.variance_fraction - 0.15).abs() < 1e-12);
        assert_eq!(p.shift_duration_seconds, 3600.0);
    }

    #[test]
    fn test_invalid_takt() {
        let err = RunParameters::new(0.0).validate().unwrap_err();
        assert!(matches!(
            err,
            BalanceError::InvalidParameter { name: "takt_time", .. }
        ));
        assert!(RunParameters::new(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_invalid_station_cap() {
        let err = RunParameters::new(10.0)
            .with_max_tasks_per_station(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            BalanceError::InvalidParameter { name: "max_tasks_per_station", .. }
        ));
    }

    #[test]
    fn test_invalid_variance_and_shift() {
        assert!(RunParameters::new(10.0)
            .with_variance_fraction(1.5)
            .validate()
            .is_err());
        assert!(RunParameters::new(10.0)
            .with_shift_duration(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_defaults() {
        let c = BalanceConfig::default();
        assert_eq!(c.rpw_mode, RpwMode::DirectSuccessors);
        assert_eq!(c.acceptance_rule, AcceptanceRule::Canonical);
        assert!((c.epsilon - 0.01).abs() < 1e-12);
        assert!((c.takt_step - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_config_rejects_zero_step() {
        assert!(BalanceConfig::new().with_takt_step(0.0).validate().is_err());
    }

    #[test]
    fn test_config_from_partial_json() {
        let c: BalanceConfig = serde_json::from_str(r#"{"rpw_mode":"all_successors"}"#).unwrap();
        assert_eq!(c.rpw_mode, RpwMode::AllSuccessors);
        assert!((c.takt_step - DEFAULT_TAKT_STEP).abs() < 1e-12);

        let p: RunParameters = serde_json::from_str(r#"{"takt_time":12.5}"#).unwrap();
        assert_eq!(p.takt_time, 12.5);
        assert_eq!(p.max_tasks_per_station, 3);
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&BalanceMode::Auto).unwrap(), "\"auto\"");
        let m: BalanceMode = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(m, BalanceMode::Fixed);
    }
}
