//! Health-data snapshot seam.
//!
//! The core never talks to a health platform directly. It consumes an
//! abstract daily snapshot in which every field may be absent, through a
//! capability trait. Concrete providers are chosen by an explicit enum at
//! startup -- a strategy seam, not runtime reflection.

use serde::{Deserialize, Serialize};

use crate::day::LocalDay;
use crate::error::Result;

/// One sleep measurement, minutes asleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepSample {
    pub total_minutes: u32,
}

/// Daily health snapshot. Every field is optional; consumers must treat
/// each as possibly absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    #[serde(default)]
    pub step_count: Option<u32>,
    /// Sleep reported by the platform
    #[serde(default)]
    pub sleep: Option<SleepSample>,
    /// Sleep inferred by the estimator, used when the platform has none
    #[serde(default)]
    pub estimated_sleep: Option<SleepSample>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub hrv: Option<f64>,
}

impl HealthSnapshot {
    /// Best available sleep figure: platform data wins over the estimate.
    pub fn effective_sleep_minutes(&self) -> Option<u32> {
        self.sleep
            .or(self.estimated_sleep)
            .map(|sample| sample.total_minutes)
    }
}

/// Capability interface over a health-data source.
pub trait HealthService {
    /// Stable provider identifier.
    fn name(&self) -> &str;

    /// Snapshot for the given local day. Absent data is not an error --
    /// return a snapshot with empty fields instead.
    fn snapshot(&self, day: LocalDay) -> Result<HealthSnapshot>;
}

/// Available providers, selected explicitly at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthProvider {
    /// No sensor source; the user logs everything by hand
    #[default]
    Manual,
    /// Deterministic canned data for demos and tests
    Simulated,
}

impl HealthProvider {
    /// Construct the service for this provider.
    pub fn build(self) -> Box<dyn HealthService> {
        match self {
            HealthProvider::Manual => Box::new(ManualHealthService),
            HealthProvider::Simulated => Box::new(SimulatedHealthService),
        }
    }
}

/// Provider for manual-entry setups: every snapshot is empty.
pub struct ManualHealthService;

impl HealthService for ManualHealthService {
    fn name(&self) -> &str {
        "manual"
    }

    fn snapshot(&self, _day: LocalDay) -> Result<HealthSnapshot> {
        Ok(HealthSnapshot::default())
    }
}

/// Deterministic fake provider keyed on the day, for demos and tests.
pub struct SimulatedHealthService;

impl HealthService for SimulatedHealthService {
    fn name(&self) -> &str {
        "simulated"
    }

    fn snapshot(&self, day: LocalDay) -> Result<HealthSnapshot> {
        // Vary by weekday so a simulated week has some shape to analyze.
        let weekday = day.weekday().num_days_from_monday();
        let weekend = weekday >= 5;
        Ok(HealthSnapshot {
            step_count: Some(if weekend { 9000 } else { 4500 + weekday * 500 }),
            sleep: Some(SleepSample {
                total_minutes: if weekend { 8 * 60 } else { 6 * 60 + 30 },
            }),
            estimated_sleep: None,
            heart_rate: Some(62.0 + weekday as f64),
            hrv: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_sleep_prefers_platform_data() {
        let snapshot = HealthSnapshot {
            sleep: Some(SleepSample { total_minutes: 420 }),
            estimated_sleep: Some(SleepSample { total_minutes: 300 }),
            ..Default::default()
        };
        assert_eq!(snapshot.effective_sleep_minutes(), Some(420));

        let estimated_only = HealthSnapshot {
            estimated_sleep: Some(SleepSample { total_minutes: 300 }),
            ..Default::default()
        };
        assert_eq!(estimated_only.effective_sleep_minutes(), Some(300));

        assert_eq!(HealthSnapshot::default().effective_sleep_minutes(), None);
    }

    #[test]
    fn test_manual_provider_returns_empty_snapshot() {
        let service = HealthProvider::Manual.build();
        let day = LocalDay::parse("2026-08-03").unwrap();
        let snapshot = service.snapshot(day).unwrap();
        assert_eq!(snapshot, HealthSnapshot::default());
    }

    #[test]
    fn test_simulated_provider_is_deterministic() {
        let service = HealthProvider::Simulated.build();
        let day = LocalDay::parse("2026-08-03").unwrap();
        assert_eq!(service.snapshot(day).unwrap(), service.snapshot(day).unwrap());
        assert!(service.snapshot(day).unwrap().step_count.is_some());
    }

    #[test]
    fn test_snapshot_tolerates_partial_json() {
        let snapshot: HealthSnapshot = serde_json::from_str("{\"step_count\": 1234}").unwrap();
        assert_eq!(snapshot.step_count, Some(1234));
        assert!(snapshot.sleep.is_none());
        assert!(snapshot.hrv.is_none());
    }
}
