//! Reporting period model.
//!
//! This module contains the [`ReportingPeriod`] type that bounds a compliance
//! summary, typically one calendar month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range a summary is computed over.
///
/// # Example
///
/// ```
/// use duty_compliance::models::ReportingPeriod;
/// use chrono::NaiveDate;
///
/// let january = ReportingPeriod::month(2026, 1).unwrap();
/// assert_eq!(january.end_date, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
/// assert!(january.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert_eq!(january.label(), "2026-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl ReportingPeriod {
    /// Creates a period, rejecting ranges that end before they start.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Creates the period covering one calendar month.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod {
            message: format!("{}-{:02} is not a valid month", year, month),
        };
        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let end_date = next_month.pred_opt().ok_or_else(invalid)?;
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Checks that the period does not end before it starts.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidPeriod {
                message: format!(
                    "period ends on {} before it starts on {}",
                    self.end_date, self.start_date
                ),
            });
        }
        Ok(())
    }

    /// Checks if a date falls within the period (inclusive of both ends).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns `YYYY-MM` for a single calendar month, otherwise `start..end`.
    pub fn label(&self) -> String {
        let is_calendar_month = self.start_date.day() == 1
            && self.start_date.year() == self.end_date.year()
            && self.start_date.month() == self.end_date.month()
            && self.end_date.succ_opt().is_none_or(|next| next.day() == 1);
        if is_calendar_month {
            format!("{}-{:02}", self.start_date.year(), self.start_date.month())
        } else {
            format!("{}..{}", self.start_date, self.end_date)
        }
    }
}
