//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading compliance
//! policy from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{RoleThresholds, StaffRole};

use super::types::{LocationPolicy, PolicyConfig, PolicySettings, StandardsTable};

/// Loads and provides access to compliance policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml     # Locations, overtime sequence, trend dead-band
/// └── standards.yaml  # Per-role thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use duty_compliance::config::ConfigLoader;
/// use duty_compliance::models::StaffRole;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let doctor = loader.thresholds(StaffRole::Doctor).unwrap();
/// println!("Doctors must attend {}% of duties", doctor.min_attendance_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PolicyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any value is out of range (negative windows, rates above 100%)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let settings = Self::load_yaml::<PolicySettings>(&policy_path)?;
        Self::check_settings(&policy_path, &settings)?;

        let standards_path = path.join("standards.yaml");
        let standards = Self::load_yaml::<StandardsTable>(&standards_path)?;
        Self::check_standards(&standards_path, &standards)?;

        debug!(
            path = %path.display(),
            locations = settings.locations.len(),
            roles = standards.roles.len(),
            "Loaded compliance policy"
        );

        Ok(Self {
            config: PolicyConfig::new(settings, standards),
        })
    }

    /// Wraps an in-memory policy, e.g. [`PolicyConfig::default`].
    pub fn from_config(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_settings(path: &Path, settings: &PolicySettings) -> EngineResult<()> {
        if !settings.locations.contains_key(&settings.default_location) {
            return Err(Self::invalid(
                path,
                format!(
                    "default_location '{}' is not defined under locations",
                    settings.default_location
                ),
            ));
        }
        if settings.trend_dead_band < Decimal::ZERO {
            return Err(Self::invalid(path, "trend_dead_band must not be negative"));
        }
        Self::check_rate(path, "excellence_threshold", settings.excellence_threshold)?;
        for (code, location) in &settings.locations {
            Self::check_location(path, code, location)?;
        }
        Ok(())
    }

    fn check_location(path: &Path, code: &str, location: &LocationPolicy) -> EngineResult<()> {
        let windows = [
            ("late_tolerance_minutes", location.late_tolerance_minutes),
            (
                "checkin_before_shift_minutes",
                location.checkin_before_shift_minutes,
            ),
            (
                "checkout_after_shift_minutes",
                location.checkout_after_shift_minutes,
            ),
        ];
        for (field, minutes) in windows {
            if minutes < 0 {
                return Err(Self::invalid(
                    path,
                    format!("location '{}': {} must not be negative", code, field),
                ));
            }
        }
        Ok(())
    }

    fn check_standards(path: &Path, standards: &StandardsTable) -> EngineResult<()> {
        for (role, thresholds) in &standards.roles {
            Self::check_rate(
                path,
                &format!("{}.min_attendance_rate", role.as_str()),
                thresholds.min_attendance_rate,
            )?;
            Self::check_rate(
                path,
                &format!("{}.min_gps_validation_rate", role.as_str()),
                thresholds.min_gps_validation_rate,
            )?;
        }
        Ok(())
    }

    fn check_rate(path: &Path, field: &str, rate: Decimal) -> EngineResult<()> {
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(Self::invalid(
                path,
                format!("{} must be between 0 and 100, got {}", field, rate),
            ));
        }
        Ok(())
    }

    fn invalid(path: &Path, message: impl Into<String>) -> EngineError {
        let error = EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: message.into(),
        };
        warn!(error = %error, "Rejected compliance policy");
        error
    }

    /// Returns the underlying policy configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Gets the policy for a work location.
    pub fn location(&self, code: &str) -> EngineResult<&LocationPolicy> {
        self.config.location(Some(code)).map(|(_, policy)| policy)
    }

    /// Gets the thresholds for a role.
    pub fn thresholds(&self, role: StaffRole) -> EngineResult<&RoleThresholds> {
        self.config.standards().thresholds_for(role)
    }
}
