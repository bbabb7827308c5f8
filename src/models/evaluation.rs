//! Verdict, trend and recommendation models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ReportingPeriod, StaffRole};

/// Threshold row applied to one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleThresholds {
    /// Minimum completion rate, as a percentage.
    pub min_attendance_rate: Decimal,
    /// Maximum late arrivals allowed per period.
    pub max_late_arrivals: u32,
    /// Minimum GPS validation rate, as a percentage.
    pub min_gps_validation_rate: Decimal,
}

/// Pass/fail verdict for a summary against a role's thresholds.
///
/// The thresholds used are copied into the verdict so recommendations can be
/// generated from the verdict alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    /// The staff member.
    pub staff_id: String,
    /// The evaluated period.
    pub period: ReportingPeriod,
    /// Role the thresholds were selected for.
    pub role: StaffRole,
    /// Thresholds applied.
    pub thresholds: RoleThresholds,
    /// Completion rate meets the minimum.
    pub attendance_compliant: bool,
    /// Late arrivals do not exceed the maximum.
    pub punctuality_compliant: bool,
    /// GPS validation rate meets the minimum.
    pub gps_compliant: bool,
    /// All three checks pass.
    pub overall_compliant: bool,
    /// Weighted score in `[0, 100]` for ranking.
    pub score: Decimal,
}

/// Direction of a metric across periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Latest value is above the baseline by more than the dead-band.
    Improving,
    /// Latest value is within the dead-band of the baseline.
    Stable,
    /// Latest value is below the baseline by more than the dead-band.
    Declining,
}

/// Trend of a single rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTrend {
    /// Value in the most recent period.
    pub latest: Decimal,
    /// Mean of the preceding periods.
    pub baseline: Decimal,
    /// `latest - baseline`.
    pub delta: Decimal,
    /// Classified direction.
    pub direction: TrendDirection,
}

/// Trend across consecutive summaries for one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Number of periods considered.
    pub periods: usize,
    /// Earliest period considered, if any.
    pub first_period: Option<ReportingPeriod>,
    /// Most recent period considered, if any.
    pub latest_period: Option<ReportingPeriod>,
    /// Headline direction, taken from the attendance trend.
    pub direction: TrendDirection,
    /// Completion rate trend.
    pub attendance: MetricTrend,
    /// Punctuality rate trend.
    pub punctuality: MetricTrend,
    /// GPS validation rate trend.
    pub gps_validation: MetricTrend,
}

/// Area a recommendation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    /// Attendance / completion.
    Attendance,
    /// Punctuality.
    Punctuality,
    /// GPS location validity.
    GpsValidation,
}

/// Urgency of a recommendation. Orders from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Needs action this period.
    High,
    /// Should be addressed.
    Medium,
    /// Worth a mention.
    Low,
}

/// One rule-based improvement recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Identifier of the rule that fired.
    pub rule_id: String,
    /// Area addressed.
    pub category: RecommendationCategory,
    /// Urgency.
    pub priority: Priority,
    /// Suggested action.
    pub action: String,
    /// Explanation quoting the observed value and threshold.
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_orders_high_first() {
        let mut priorities = vec![Priority::Low, Priority::High, Priority::Medium];
        priorities.sort();
        assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn test_thresholds_deserialize_from_numbers() {
        let json = r#"{
            "min_attendance_rate": 95,
            "max_late_arrivals": 2,
            "min_gps_validation_rate": "95.0"
        }"#;
        let thresholds: RoleThresholds = serde_json::from_str(json).unwrap();
        assert_eq!(thresholds.min_attendance_rate, Decimal::from(95));
        assert_eq!(thresholds.max_late_arrivals, 2);
        assert_eq!(thresholds.min_gps_validation_rate, Decimal::from(95));
    }
}
