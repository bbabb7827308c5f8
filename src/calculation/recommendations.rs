//! Rule-based improvement recommendations.
//!
//! Rules are grouped per category and evaluated in table order; the first rule
//! of a category that matches wins. The output is ordered by priority.

use rust_decimal::Decimal;

use crate::models::{
    ComplianceSummary, ComplianceVerdict, Priority, Recommendation, RecommendationCategory,
};

/// Default rate at or above which no "sustain" advice is produced.
pub const DEFAULT_EXCELLENCE_THRESHOLD: Decimal = Decimal::from_parts(95, 0, 0, false, 0);

struct RuleInput<'a> {
    summary: &'a ComplianceSummary,
    verdict: &'a ComplianceVerdict,
    excellence_threshold: Decimal,
}

struct Rule {
    id: &'static str,
    priority: Priority,
    action: &'static str,
    applies: fn(&RuleInput<'_>) -> bool,
    detail: fn(&RuleInput<'_>) -> String,
}

const ATTENDANCE_RULES: &[Rule] = &[
    Rule {
        id: "ATTENDANCE_BELOW_MINIMUM",
        priority: Priority::High,
        action: "review attendance - schedule or staffing issue",
        applies: |input| !input.verdict.attendance_compliant,
        detail: |input| {
            format!(
                "completion rate {}% is below the {}% minimum ({} missed of {} scheduled)",
                input.summary.completion_rate,
                input.verdict.thresholds.min_attendance_rate,
                input.summary.missed_shifts,
                input.summary.total_scheduled_shifts
            )
        },
    },
    Rule {
        id: "ATTENDANCE_SUSTAIN",
        priority: Priority::Low,
        action: "sustain attendance - monitor for slippage",
        applies: |input| {
            input.summary.total_scheduled_shifts > 0
                && input.summary.completion_rate < input.excellence_threshold
        },
        detail: |input| {
            format!(
                "completion rate {}% meets the minimum but is below {}%",
                input.summary.completion_rate, input.excellence_threshold
            )
        },
    },
];

const PUNCTUALITY_RULES: &[Rule] = &[Rule {
    id: "PUNCTUALITY_LATE_ARRIVALS",
    priority: Priority::Medium,
    action: "counsel on punctuality",
    applies: |input| !input.verdict.punctuality_compliant,
    detail: |input| {
        format!(
            "{} late arrivals exceed the maximum of {} (average {} minutes late)",
            input.summary.late_arrivals,
            input.verdict.thresholds.max_late_arrivals,
            input.summary.average_late_minutes
        )
    },
}];

const GPS_RULES: &[Rule] = &[Rule {
    id: "GPS_BELOW_MINIMUM",
    priority: Priority::Medium,
    action: "verify device/location settings",
    applies: |input| !input.verdict.gps_compliant,
    detail: |input| {
        format!(
            "GPS validation rate {}% is below the {}% minimum",
            input.summary.gps_validation_rate, input.verdict.thresholds.min_gps_validation_rate
        )
    },
}];

fn rule_tables() -> [(RecommendationCategory, &'static [Rule]); 3] {
    [
        (RecommendationCategory::Attendance, ATTENDANCE_RULES),
        (RecommendationCategory::Punctuality, PUNCTUALITY_RULES),
        (RecommendationCategory::GpsValidation, GPS_RULES),
    ]
}

/// Produces prioritized recommendations for a summary and its verdict.
///
/// At most one recommendation is emitted per category. A fully compliant,
/// excellent summary yields an empty list.
pub fn generate_recommendations(
    summary: &ComplianceSummary,
    verdict: &ComplianceVerdict,
    excellence_threshold: Decimal,
) -> Vec<Recommendation> {
    let input = RuleInput {
        summary,
        verdict,
        excellence_threshold,
    };

    let mut recommendations: Vec<Recommendation> = rule_tables()
        .into_iter()
        .filter_map(|(category, rules)| {
            rules
                .iter()
                .find(|rule| (rule.applies)(&input))
                .map(|rule| Recommendation {
                    rule_id: rule.id.to_string(),
                    category,
                    priority: rule.priority,
                    action: rule.action.to_string(),
                    detail: (rule.detail)(&input),
                })
        })
        .collect();

    // Stable sort keeps category order within a priority.
    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::evaluate_standards;
    use crate::config::StandardsTable;
    use crate::models::{ComplianceBreakdown, PerformanceStatus, ReportingPeriod, StaffRole};

    fn summary(completion: i64, late_arrivals: u32, gps: i64) -> ComplianceSummary {
        let completion_rate = Decimal::from(completion);
        ComplianceSummary {
            staff_id: "staff_001".to_string(),
            period: ReportingPeriod::month(2026, 1).unwrap(),
            total_scheduled_shifts: 20,
            attended_shifts: 18,
            missed_shifts: 2,
            leave_shifts: 0,
            pending_leave_shifts: 0,
            pending_shifts: 0,
            overtime_shifts: 0,
            on_time_shifts: 18 - late_arrivals.min(18),
            late_arrivals,
            early_departures: 0,
            gps_valid_shifts: 18,
            completion_rate,
            punctuality_rate: Decimal::from(100),
            gps_validation_rate: Decimal::from(gps),
            average_work_hours: Decimal::from(7),
            total_work_hours: Decimal::from(126),
            average_late_minutes: Decimal::from(12),
            compliance_breakdown: ComplianceBreakdown::default(),
            status: PerformanceStatus::from_rate(completion_rate),
        }
    }

    fn recommend(s: &ComplianceSummary, role: StaffRole) -> Vec<Recommendation> {
        let verdict = evaluate_standards(s, role, &StandardsTable::default()).unwrap();
        generate_recommendations(s, &verdict, DEFAULT_EXCELLENCE_THRESHOLD)
    }

    #[test]
    fn test_attendance_below_minimum_is_high_priority() {
        let recs = recommend(&summary(80, 0, 100), StaffRole::NonParamedic);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, RecommendationCategory::Attendance);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].action, "review attendance - schedule or staffing issue");
        assert!(recs[0].detail.contains("80%"));
        assert!(recs[0].detail.contains("85%"));
    }

    #[test]
    fn test_compliant_but_not_excellent_gets_sustain_advice() {
        let recs = recommend(&summary(90, 0, 100), StaffRole::NonParamedic);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].rule_id, "ATTENDANCE_SUSTAIN");
        assert_eq!(recs[0].priority, Priority::Low);
    }

    #[test]
    fn test_excellent_compliant_summary_has_no_recommendations() {
        let recs = recommend(&summary(100, 0, 100), StaffRole::Doctor);

        assert!(recs.is_empty());
    }

    #[test]
    fn test_late_arrivals_above_maximum_counsels_punctuality() {
        let recs = recommend(&summary(100, 3, 100), StaffRole::Doctor);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, RecommendationCategory::Punctuality);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert_eq!(recs[0].action, "counsel on punctuality");
    }

    #[test]
    fn test_gps_below_minimum_verifies_device() {
        let recs = recommend(&summary(100, 0, 80), StaffRole::Paramedic);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, RecommendationCategory::GpsValidation);
        assert_eq!(recs[0].action, "verify device/location settings");
    }

    #[test]
    fn test_one_recommendation_per_category_sorted_by_priority() {
        let recs = recommend(&summary(70, 9, 60), StaffRole::NonParamedic);

        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].category, RecommendationCategory::Punctuality);
        assert_eq!(recs[2].category, RecommendationCategory::GpsValidation);
        assert!(recs.windows(2).all(|w| w[0].priority <= w[1].priority));
    }

    #[test]
    fn test_empty_period_gets_no_sustain_advice() {
        let mut s = summary(0, 0, 0);
        s.total_scheduled_shifts = 0;
        s.attended_shifts = 0;
        s.missed_shifts = 0;
        let verdict = ComplianceVerdict {
            attendance_compliant: true,
            punctuality_compliant: true,
            gps_compliant: true,
            overall_compliant: true,
            ..evaluate_standards(&s, StaffRole::Doctor, &StandardsTable::default()).unwrap()
        };

        assert!(generate_recommendations(&s, &verdict, DEFAULT_EXCELLENCE_THRESHOLD).is_empty());
    }
}
