// Chart model: axis bounds, value labels, and titles derived from an
// aggregate result. Rendering lives in the dashboard crate.

use crate::engine::AggregateResult;
use crate::stats::StatisticKind;

/// Headroom above the tallest bar.
const UPPER_HEADROOM: f64 = 1.2;
/// Batting-average axes start just below the lowest bar so small
/// differences stay visible.
const RATE_LOWER_FACTOR: f64 = 0.95;

/// Value-axis range for a bar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub lower: f64,
    pub upper: f64,
}

impl ChartBounds {
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Position of `value` within the bounds as a fraction in [0, 1].
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 1.0;
        }
        ((value - self.lower) / span).clamp(0.0, 1.0)
    }
}

/// Value-axis bounds for `result`, or `None` when there is nothing to plot.
pub fn y_bounds(result: &AggregateResult) -> Option<ChartBounds> {
    let max = result.max_value()?;
    let min = result.min_value()?;
    let lower = match result.stat {
        StatisticKind::BattingAverage => min * RATE_LOWER_FACTOR,
        _ => 0.0,
    };
    Some(ChartBounds {
        lower,
        upper: max * UPPER_HEADROOM,
    })
}

/// Format a value the way bar labels and table cells show it:
/// three decimals for batting average, whole numbers otherwise.
pub fn format_value(stat: StatisticKind, value: f64) -> String {
    match stat {
        StatisticKind::BattingAverage => format!("{value:.3}"),
        _ => format!("{}", value.round() as u64),
    }
}

/// Chart title, e.g. "Hits ranking through month 9".
pub fn chart_title(stat: StatisticKind, cutoff_month: u32) -> String {
    format!("{} ranking through month {}", stat.label(), cutoff_month)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RankedRow;

    fn result(stat: StatisticKind, values: &[f64]) -> AggregateResult {
        AggregateResult {
            stat,
            cutoff_month: 9,
            rows: values
                .iter()
                .enumerate()
                .map(|(i, v)| RankedRow {
                    player: format!("P{i}"),
                    value: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn counting_bounds_start_at_zero() {
        let bounds = y_bounds(&result(StatisticKind::Hits, &[117.0, 100.0, 40.0])).unwrap();
        assert_eq!(bounds.lower, 0.0);
        assert!((bounds.upper - 140.4).abs() < 1e-9);
    }

    #[test]
    fn batting_average_bounds_hug_minimum() {
        let bounds =
            y_bounds(&result(StatisticKind::BattingAverage, &[0.281, 0.275])).unwrap();
        assert!((bounds.lower - 0.275 * 0.95).abs() < 1e-12);
        assert!((bounds.upper - 0.281 * 1.2).abs() < 1e-12);
    }

    #[test]
    fn empty_result_has_no_bounds() {
        assert!(y_bounds(&result(StatisticKind::Rbi, &[])).is_none());
    }

    #[test]
    fn fraction_is_clamped() {
        let bounds = ChartBounds {
            lower: 0.0,
            upper: 10.0,
        };
        assert_eq!(bounds.fraction(5.0), 0.5);
        assert_eq!(bounds.fraction(-1.0), 0.0);
        assert_eq!(bounds.fraction(20.0), 1.0);
    }

    #[test]
    fn degenerate_span_fills_the_bar() {
        let bounds = ChartBounds {
            lower: 1.0,
            upper: 1.0,
        };
        assert_eq!(bounds.fraction(1.0), 1.0);
    }

    #[test]
    fn value_labels() {
        assert_eq!(format_value(StatisticKind::BattingAverage, 0.281), "0.281");
        assert_eq!(format_value(StatisticKind::BattingAverage, 0.3), "0.300");
        assert_eq!(format_value(StatisticKind::Hits, 117.0), "117");
        assert_eq!(format_value(StatisticKind::StolenBases, 40.0), "40");
    }

    #[test]
    fn title_names_stat_and_month() {
        assert_eq!(
            chart_title(StatisticKind::HomeRuns, 5),
            "Home Runs ranking through month 5"
        );
    }
}
