//! Standards evaluation of a summary against role thresholds.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::StandardsTable;
use crate::error::EngineResult;
use crate::models::{ComplianceSummary, ComplianceVerdict, RoleThresholds, StaffRole};

/// Weight of the completion rate in the composite score.
pub const ATTENDANCE_WEIGHT: Decimal = Decimal::from_parts(50, 0, 0, false, 2);
/// Weight of the punctuality rate in the composite score.
pub const PUNCTUALITY_WEIGHT: Decimal = Decimal::from_parts(30, 0, 0, false, 2);
/// Weight of the GPS validation rate in the composite score.
pub const GPS_WEIGHT: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Returns the weighted score `0.5 * completion + 0.3 * punctuality + 0.2 * gps`,
/// rounded to one decimal place.
pub fn composite_score(summary: &ComplianceSummary) -> Decimal {
    (summary.completion_rate * ATTENDANCE_WEIGHT
        + summary.punctuality_rate * PUNCTUALITY_WEIGHT
        + summary.gps_validation_rate * GPS_WEIGHT)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Compares a summary with explicit thresholds.
pub fn evaluate_against(
    summary: &ComplianceSummary,
    role: StaffRole,
    thresholds: RoleThresholds,
) -> ComplianceVerdict {
    let attendance_compliant = summary.completion_rate >= thresholds.min_attendance_rate;
    let punctuality_compliant = summary.late_arrivals <= thresholds.max_late_arrivals;
    let gps_compliant = summary.gps_validation_rate >= thresholds.min_gps_validation_rate;

    ComplianceVerdict {
        staff_id: summary.staff_id.clone(),
        period: summary.period,
        role,
        thresholds,
        attendance_compliant,
        punctuality_compliant,
        gps_compliant,
        overall_compliant: attendance_compliant && punctuality_compliant && gps_compliant,
        score: composite_score(summary),
    }
}

/// Looks up the role's thresholds in `table` and evaluates the summary.
///
/// # Errors
///
/// Returns `UnknownRole` when the table has no row for `role`.
pub fn evaluate_standards(
    summary: &ComplianceSummary,
    role: StaffRole,
    table: &StandardsTable,
) -> EngineResult<ComplianceVerdict> {
    let thresholds = *table.thresholds_for(role)?;
    Ok(evaluate_against(summary, role, thresholds))
}
