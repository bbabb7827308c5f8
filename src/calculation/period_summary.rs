//! Aggregation of shift outcomes into a period summary.
//!
//! All rates are percentages rounded to one decimal place. A zero
//! denominator yields `0`; these are display metrics, not failure paths.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    ComplianceBreakdown, ComplianceSummary, DutyStatus, OutcomeStatus, PerformanceStatus,
    ReportingPeriod, ShiftOutcome,
};

const MINUTES_PER_HOUR: i64 = 60;

/// Returns `numerator / denominator * 100` rounded to one decimal place, or
/// zero when the denominator is zero.
///
/// # Example
///
/// ```
/// use duty_compliance::calculation::percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(percentage(15, 18), Decimal::new(833, 1));
/// assert_eq!(percentage(3, 0), Decimal::ZERO);
/// ```
pub fn percentage(numerator: u32, denominator: u32) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(numerator) * Decimal::ONE_HUNDRED / Decimal::from(denominator))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn mean(total: i64, count: u32, dp: u32) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(total) / Decimal::from(count))
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Aggregates the outcomes of one staff member into a [`ComplianceSummary`].
///
/// Outcomes dated outside `period` are ignored. Leave and pending outcomes are
/// counted separately and excluded from `total_scheduled_shifts`, so
/// `attended + missed == total` holds. A present shift is on time when its
/// `late_minutes` does not exceed `late_tolerance_minutes`.
pub fn summarize_outcomes(
    staff_id: &str,
    period: ReportingPeriod,
    outcomes: &[ShiftOutcome],
    late_tolerance_minutes: i64,
) -> ComplianceSummary {
    let mut attended = 0u32;
    let mut missed = 0u32;
    let mut leave = 0u32;
    let mut pending_leave = 0u32;
    let mut pending = 0u32;
    let mut overtime = 0u32;
    let mut on_time = 0u32;
    let mut late_arrivals = 0u32;
    let mut late_minutes_total = 0i64;
    let mut early_departures = 0u32;
    let mut gps_valid = 0u32;
    let mut complete_shifts = 0u32;
    let mut work_minutes_total = 0i64;
    let mut breakdown = ComplianceBreakdown::default();

    for outcome in outcomes.iter().filter(|o| period.contains_date(o.date)) {
        match outcome.status {
            OutcomeStatus::Present => {
                attended += 1;
                if outcome.is_overtime {
                    overtime += 1;
                }
                let late = outcome.late_minutes.unwrap_or(0);
                if late <= late_tolerance_minutes {
                    on_time += 1;
                } else {
                    late_arrivals += 1;
                    late_minutes_total += late;
                }
                if outcome.early_departure_minutes.is_some() {
                    early_departures += 1;
                }
                if outcome.gps_valid {
                    gps_valid += 1;
                }
                if outcome.has_complete_attendance() {
                    complete_shifts += 1;
                    work_minutes_total += outcome.work_minutes;
                }
                if let Some(bucket) = outcome.schedule_compliance {
                    breakdown.record(bucket);
                }
            }
            OutcomeStatus::Absent | OutcomeStatus::NoShow => missed += 1,
            OutcomeStatus::Leave => {
                if outcome.duty_status == DutyStatus::LeavePending {
                    pending_leave += 1;
                } else {
                    leave += 1;
                }
            }
            OutcomeStatus::Pending => pending += 1,
        }
    }

    let total = attended + missed;
    let completion_rate = percentage(attended, total);

    ComplianceSummary {
        staff_id: staff_id.to_string(),
        period,
        total_scheduled_shifts: total,
        attended_shifts: attended,
        missed_shifts: missed,
        leave_shifts: leave,
        pending_leave_shifts: pending_leave,
        pending_shifts: pending,
        overtime_shifts: overtime,
        on_time_shifts: on_time,
        late_arrivals,
        early_departures,
        gps_valid_shifts: gps_valid,
        completion_rate,
        punctuality_rate: percentage(on_time, attended),
        gps_validation_rate: percentage(gps_valid, attended),
        average_work_hours: mean(work_minutes_total, complete_shifts * MINUTES_PER_HOUR as u32, 2),
        total_work_hours: mean(work_minutes_total, MINUTES_PER_HOUR as u32, 2),
        average_late_minutes: mean(late_minutes_total, late_arrivals, 1),
        compliance_breakdown: breakdown,
        status: PerformanceStatus::from_rate(completion_rate),
    }
}
