//! Configuration types for compliance evaluation.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from YAML configuration files. Every structure also has a
//! documented default so the engine can run without any files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{DEFAULT_OVERTIME_AFTER_SEQUENCE, RoleThresholds, StaffRole};

/// Code of the location used when a request names none.
pub const DEFAULT_LOCATION_CODE: &str = "default";

/// Attendance policy for one work location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPolicy {
    /// Human-readable name of the location.
    pub name: String,
    /// Minutes after the scheduled start still counted as on time.
    #[serde(default)]
    pub late_tolerance_minutes: i64,
    /// How early before the scheduled start a check-in may match the duty.
    #[serde(default = "default_checkin_before")]
    pub checkin_before_shift_minutes: i64,
    /// How long after the scheduled end a check-in may still match the duty.
    #[serde(default = "default_checkout_after")]
    pub checkout_after_shift_minutes: i64,
}

fn default_checkin_before() -> i64 {
    60
}

fn default_checkout_after() -> i64 {
    120
}

impl Default for LocationPolicy {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            late_tolerance_minutes: 0,
            checkin_before_shift_minutes: default_checkin_before(),
            checkout_after_shift_minutes: default_checkout_after(),
        }
    }
}

/// Contents of `policy.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Location used when a request names none.
    #[serde(default = "default_location_code")]
    pub default_location: String,
    /// Sequence numbers above this value are overtime.
    #[serde(default = "default_overtime_after_sequence")]
    pub overtime_after_sequence: u32,
    /// Percentage points a rate must move before a trend is reported.
    #[serde(default = "default_trend_dead_band")]
    pub trend_dead_band: Decimal,
    /// Completion rate above which no attendance advice is given.
    #[serde(default = "default_excellence_threshold")]
    pub excellence_threshold: Decimal,
    /// Per-location attendance policy, keyed by location code.
    pub locations: HashMap<String, LocationPolicy>,
}

fn default_location_code() -> String {
    DEFAULT_LOCATION_CODE.to_string()
}

fn default_overtime_after_sequence() -> u32 {
    DEFAULT_OVERTIME_AFTER_SEQUENCE
}

fn default_trend_dead_band() -> Decimal {
    Decimal::from(2)
}

fn default_excellence_threshold() -> Decimal {
    Decimal::from(95)
}

impl Default for PolicySettings {
    fn default() -> Self {
        let mut locations = HashMap::new();
        locations.insert(default_location_code(), LocationPolicy::default());
        Self {
            default_location: default_location_code(),
            overtime_after_sequence: default_overtime_after_sequence(),
            trend_dead_band: default_trend_dead_band(),
            excellence_threshold: default_excellence_threshold(),
            locations,
        }
    }
}

/// Role thresholds keyed by role, as read from `standards.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardsTable {
    /// Threshold row per role.
    pub roles: HashMap<StaffRole, RoleThresholds>,
}

impl StandardsTable {
    /// Returns the thresholds configured for a role.
    pub fn thresholds_for(&self, role: StaffRole) -> EngineResult<&RoleThresholds> {
        self.roles
            .get(&role)
            .ok_or_else(|| EngineError::UnknownRole {
                role: role.as_str().to_string(),
            })
    }
}

impl Default for StandardsTable {
    /// The clinic's published standards: doctors 95% / 2 late / 95% GPS,
    /// paramedics 90% / 4 / 90%, non-paramedics 85% / 6 / 85%.
    fn default() -> Self {
        let row = |attendance: i64, late: u32, gps: i64| RoleThresholds {
            min_attendance_rate: Decimal::from(attendance),
            max_late_arrivals: late,
            min_gps_validation_rate: Decimal::from(gps),
        };
        let mut roles = HashMap::new();
        roles.insert(StaffRole::Doctor, row(95, 2, 95));
        roles.insert(StaffRole::Paramedic, row(90, 4, 90));
        roles.insert(StaffRole::NonParamedic, row(85, 6, 85));
        Self { roles }
    }
}

/// The complete policy loaded from a configuration directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    settings: PolicySettings,
    standards: StandardsTable,
}

impl PolicyConfig {
    /// Creates a PolicyConfig from its component parts.
    pub fn new(settings: PolicySettings, standards: StandardsTable) -> Self {
        Self {
            settings,
            standards,
        }
    }

    /// Returns the general policy settings.
    pub fn settings(&self) -> &PolicySettings {
        &self.settings
    }

    /// Returns the role standards table.
    pub fn standards(&self) -> &StandardsTable {
        &self.standards
    }

    /// Returns the policy for a location, falling back to the default
    /// location when `code` is `None`.
    pub fn location(&self, code: Option<&str>) -> EngineResult<(&str, &LocationPolicy)> {
        let code = code.unwrap_or(&self.settings.default_location);
        self.settings
            .locations
            .get_key_value(code)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| EngineError::UnknownLocation {
                code: code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_standards_match_published_table() {
        let table = StandardsTable::default();

        let doctor = table.thresholds_for(StaffRole::Doctor).unwrap();
        assert_eq!(doctor.min_attendance_rate, Decimal::from(95));
        assert_eq!(doctor.max_late_arrivals, 2);

        let paramedic = table.thresholds_for(StaffRole::Paramedic).unwrap();
        assert_eq!(paramedic.min_gps_validation_rate, Decimal::from(90));
        assert_eq!(paramedic.max_late_arrivals, 4);

        let other = table.thresholds_for(StaffRole::NonParamedic).unwrap();
        assert_eq!(other.min_attendance_rate, Decimal::from(85));
        assert_eq!(other.max_late_arrivals, 6);
    }

    #[test]
    fn test_missing_role_is_an_error() {
        let table = StandardsTable {
            roles: HashMap::new(),
        };
        match table.thresholds_for(StaffRole::Doctor) {
            Err(EngineError::UnknownRole { role }) => assert_eq!(role, "doctor"),
            other => panic!("Expected UnknownRole, got {:?}", other),
        }
    }

    #[test]
    fn test_default_location_lookup() {
        let config = PolicyConfig::default();
        let (code, policy) = config.location(None).unwrap();
        assert_eq!(code, "default");
        assert_eq!(policy.late_tolerance_minutes, 0);
        assert_eq!(policy.checkin_before_shift_minutes, 60);
    }

    #[test]
    fn test_unknown_location_lookup() {
        let config = PolicyConfig::default();
        assert!(matches!(
            config.location(Some("nowhere")),
            Err(EngineError::UnknownLocation { .. })
        ));
    }

    #[test]
    fn test_location_policy_yaml_defaults() {
        let policy: LocationPolicy = serde_yaml::from_str("name: Outpatient\n").unwrap();
        assert_eq!(policy.late_tolerance_minutes, 0);
        assert_eq!(policy.checkin_before_shift_minutes, 60);
        assert_eq!(policy.checkout_after_shift_minutes, 120);
    }
}
