//! Trend computation across consecutive period summaries.
//!
//! The most recent value of each rate is compared with the mean of the
//! preceding values. Movements within the dead-band are `stable`. The
//! reported baseline and delta are rounded to two decimal places; the
//! direction is decided on the unrounded values.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ComplianceSummary, MetricTrend, TrendDirection, TrendResult};

/// Default dead-band, in percentage points.
pub const DEFAULT_TREND_DEAD_BAND: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

fn metric_trend(values: &[Decimal], dead_band: Decimal) -> MetricTrend {
    let Some((&latest, preceding)) = values.split_last() else {
        return MetricTrend {
            latest: Decimal::ZERO,
            baseline: Decimal::ZERO,
            delta: Decimal::ZERO,
            direction: TrendDirection::Stable,
        };
    };
    if preceding.is_empty() {
        return MetricTrend {
            latest,
            baseline: latest,
            delta: Decimal::ZERO,
            direction: TrendDirection::Stable,
        };
    }

    let sum: Decimal = preceding.iter().copied().sum();
    let mean = sum / Decimal::from(preceding.len());
    let delta = latest - mean;
    let direction = if delta > dead_band {
        TrendDirection::Improving
    } else if delta < -dead_band {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    MetricTrend {
        latest,
        baseline: mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        delta: delta.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        direction,
    }
}

/// Computes the trend of completion, punctuality and GPS validation rates.
///
/// Summaries are ordered by period start before comparison, so callers may
/// pass them in any order. With fewer than two periods every trend is
/// `stable`.
///
/// # Example
///
/// ```no_run
/// use duty_compliance::calculation::{compute_trend, DEFAULT_TREND_DEAD_BAND};
/// # let summaries: Vec<duty_compliance::models::ComplianceSummary> = Vec::new();
/// let trend = compute_trend(&summaries, DEFAULT_TREND_DEAD_BAND);
/// println!("{:?}", trend.direction);
/// ```
pub fn compute_trend(summaries: &[ComplianceSummary], dead_band: Decimal) -> TrendResult {
    let mut ordered: Vec<&ComplianceSummary> = summaries.iter().collect();
    ordered.sort_by_key(|s| s.period.start_date);

    let series = |rate: fn(&ComplianceSummary) -> Decimal| -> Vec<Decimal> {
        ordered.iter().map(|s| rate(s)).collect()
    };

    let attendance = metric_trend(&series(|s| s.completion_rate), dead_band);
    let punctuality = metric_trend(&series(|s| s.punctuality_rate), dead_band);
    let gps_validation = metric_trend(&series(|s| s.gps_validation_rate), dead_band);

    TrendResult {
        periods: ordered.len(),
        first_period: ordered.first().map(|s| s.period),
        latest_period: ordered.last().map(|s| s.period),
        direction: attendance.direction,
        attendance,
        punctuality,
        gps_validation,
    }
}
