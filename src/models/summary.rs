//! Compliance summary models.
//!
//! A [`ComplianceSummary`] aggregates the shift outcomes of one staff member
//! over a [`ReportingPeriod`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ReportingPeriod, ScheduleCompliance};

/// Overall classification of a completion rate.
///
/// `excellent` at 95% or above, `good` at 85% or above, `average` at 70% or
/// above, `poor` below that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceStatus {
    /// Completion rate of at least 95%.
    Excellent,
    /// Completion rate of at least 85%.
    Good,
    /// Completion rate of at least 70%.
    Average,
    /// Completion rate below 70%.
    Poor,
}

impl PerformanceStatus {
    /// Classifies a completion rate expressed as a percentage.
    ///
    /// # Example
    ///
    /// ```
    /// use duty_compliance::models::PerformanceStatus;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(PerformanceStatus::from_rate(Decimal::new(950, 1)), PerformanceStatus::Excellent);
    /// assert_eq!(PerformanceStatus::from_rate(Decimal::new(849, 1)), PerformanceStatus::Average);
    /// ```
    pub fn from_rate(rate: Decimal) -> Self {
        if rate >= Decimal::from(95) {
            PerformanceStatus::Excellent
        } else if rate >= Decimal::from(85) {
            PerformanceStatus::Good
        } else if rate >= Decimal::from(70) {
            PerformanceStatus::Average
        } else {
            PerformanceStatus::Poor
        }
    }
}

/// Number of present shifts per punctuality bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceBreakdown {
    /// Shifts checked in fifteen or more minutes early.
    pub very_early: u32,
    /// Shifts checked in on time.
    pub on_time: u32,
    /// Shifts checked in up to fifteen minutes late.
    pub acceptable_late: u32,
    /// Shifts checked in sixteen to thirty minutes late.
    pub late: u32,
    /// Shifts checked in more than thirty minutes late.
    pub very_late: u32,
}

impl ComplianceBreakdown {
    /// Increments the counter for a bucket.
    pub fn record(&mut self, bucket: ScheduleCompliance) {
        match bucket {
            ScheduleCompliance::VeryEarly => self.very_early += 1,
            ScheduleCompliance::OnTime => self.on_time += 1,
            ScheduleCompliance::AcceptableLate => self.acceptable_late += 1,
            ScheduleCompliance::Late => self.late += 1,
            ScheduleCompliance::VeryLate => self.very_late += 1,
        }
    }

    /// Returns the number of bucketed shifts.
    pub fn total(&self) -> u32 {
        self.very_early + self.on_time + self.acceptable_late + self.late + self.very_late
    }
}

/// Aggregated attendance metrics for one staff member over one period.
///
/// Percentages are rounded to one decimal place and lie within `[0, 100]`.
/// `attended_shifts + missed_shifts == total_scheduled_shifts` always holds;
/// leave and pending duties are counted separately and excluded from the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// The staff member.
    pub staff_id: String,
    /// The period summarized.
    pub period: ReportingPeriod,
    /// Duties that required attendance and whose window has closed.
    pub total_scheduled_shifts: u32,
    /// Duties with a check-in.
    pub attended_shifts: u32,
    /// Duties that were absent or no-show.
    pub missed_shifts: u32,
    /// Duties covered by approved leave.
    pub leave_shifts: u32,
    /// Duties covered by leave awaiting approval.
    pub pending_leave_shifts: u32,
    /// Duties whose attendance window was still open at evaluation time.
    pub pending_shifts: u32,
    /// Attended duties flagged as overtime.
    pub overtime_shifts: u32,
    /// Attended duties checked in within the late tolerance.
    pub on_time_shifts: u32,
    /// Attended duties checked in after the late tolerance.
    pub late_arrivals: u32,
    /// Attended duties checked out before the scheduled end.
    pub early_departures: u32,
    /// Attended duties with a valid GPS fix.
    pub gps_valid_shifts: u32,
    /// `attended / total * 100`.
    pub completion_rate: Decimal,
    /// `on_time / attended * 100`.
    pub punctuality_rate: Decimal,
    /// `gps_valid / attended * 100`.
    pub gps_validation_rate: Decimal,
    /// Mean hours over duties with both check-in and check-out.
    pub average_work_hours: Decimal,
    /// Total hours over duties with both check-in and check-out.
    pub total_work_hours: Decimal,
    /// Mean lateness in minutes over late arrivals only.
    pub average_late_minutes: Decimal,
    /// Punctuality bucket counts.
    pub compliance_breakdown: ComplianceBreakdown,
    /// Classification of the completion rate.
    pub status: PerformanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_boundaries() {
        assert_eq!(PerformanceStatus::from_rate(Decimal::from(100)), PerformanceStatus::Excellent);
        assert_eq!(PerformanceStatus::from_rate(Decimal::from(95)), PerformanceStatus::Excellent);
        assert_eq!(PerformanceStatus::from_rate(Decimal::new(949, 1)), PerformanceStatus::Good);
        assert_eq!(PerformanceStatus::from_rate(Decimal::from(85)), PerformanceStatus::Good);
        assert_eq!(PerformanceStatus::from_rate(Decimal::from(70)), PerformanceStatus::Average);
        assert_eq!(PerformanceStatus::from_rate(Decimal::new(699, 1)), PerformanceStatus::Poor);
        assert_eq!(PerformanceStatus::from_rate(Decimal::ZERO), PerformanceStatus::Poor);
    }

    #[test]
    fn test_breakdown_records_each_bucket() {
        let mut breakdown = ComplianceBreakdown::default();
        for bucket in ScheduleCompliance::ALL {
            breakdown.record(bucket);
        }
        breakdown.record(ScheduleCompliance::OnTime);

        assert_eq!(breakdown.on_time, 2);
        assert_eq!(breakdown.very_late, 1);
        assert_eq!(breakdown.total(), 6);
    }
}
