//! Compliance report models.
//!
//! This module contains the [`ComplianceReport`] type and the audit structures
//! that record every matching and aggregation decision taken while building it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ComplianceSummary, ReportingPeriod, ShiftOutcome};

/// A single step in the audit trace recording a computation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during computation.
///
/// Warnings flag data worth a look that did not stop the computation, such
/// as attendance records no duty could claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of computation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during computation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the existing steps.
    pub fn push_step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }
}

/// Everything computed for one staff member over one period.
///
/// Reports are pure functions of their inputs: building the same report twice
/// from the same duties, attendance and context yields equal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// The staff member.
    pub staff_id: String,
    /// The period covered.
    pub period: ReportingPeriod,
    /// Work-location code whose policy was applied.
    pub location: String,
    /// Evaluation instant supplied by the caller.
    pub as_of: NaiveDateTime,
    /// Aggregated metrics.
    pub summary: ComplianceSummary,
    /// One outcome per duty, ordered by date then sequence.
    pub daily_breakdown: Vec<ShiftOutcome>,
    /// Identifiers of attendance records no duty matched.
    pub unmatched_attendance: Vec<String>,
    /// Decisions taken while building the report.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_step_numbers_sequentially() {
        let mut trace = AuditTrace::default();
        trace.push_step(
            "shift_matching",
            "Shift Matching",
            serde_json::json!({"duties": 2}),
            serde_json::json!({"matched": 2}),
            "matched both duties".to_string(),
        );
        trace.push_step(
            "period_aggregation",
            "Period Aggregation",
            serde_json::json!({}),
            serde_json::json!({}),
            "aggregated".to_string(),
        );

        assert_eq!(trace.steps[0].step_number, 1);
        assert_eq!(trace.steps[1].step_number, 2);
        assert_eq!(trace.steps[1].rule_id, "period_aggregation");
    }

    #[test]
    fn test_audit_trace_serialization() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning {
                code: "UNMATCHED_ATTENDANCE".to_string(),
                message: "extra check-in".to_string(),
                severity: "low".to_string(),
            }],
        };
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("\"code\":\"UNMATCHED_ATTENDANCE\""));
        assert!(json.contains("\"severity\":\"low\""));
    }
}
