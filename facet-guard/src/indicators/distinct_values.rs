//! Distinct-value indicator.

use serde::Serialize;
use tracing::instrument;

use crate::indicators::{round2, Indicator, IndicatorReport, IndicatorResult};
use crate::source::ColumnView;

/// Indicator that partitions the distinct values of a column into unique
/// (occurring exactly once) and duplicate (occurring at least twice) values.
///
/// Missing values are excluded; the statistics describe present data only.
#[derive(Debug, Clone, Default)]
pub struct DistinctValuesIndicator;

impl DistinctValuesIndicator {
    /// Creates a new distinct-value indicator.
    pub fn new() -> Self {
        Self
    }
}

/// Distinct-value statistics for one column.
///
/// `unique_values_total + duplicate_values_total == distinct_values_total`;
/// both percentages are computed against `distinct_values_total` and are
/// zero when the column has no present values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistinctValuesReport {
    /// Number of distinct present values.
    pub distinct_values_total: u64,
    /// Distinct values occurring exactly once.
    pub unique_values_total: u64,
    /// Unique values as a percentage of distinct values.
    pub unique_values_percentage: f64,
    /// Distinct values occurring at least twice.
    pub duplicate_values_total: u64,
    /// Duplicate values as a percentage of distinct values.
    pub duplicate_values_percentage: f64,
}

impl Indicator for DistinctValuesIndicator {
    #[instrument(skip(self, column), fields(indicator = "distinct_values", column = %column.name()))]
    fn analyze(&self, column: &ColumnView<'_>) -> IndicatorResult<IndicatorReport> {
        let histogram = column.histogram(true);

        let distinct_values_total = histogram.len() as u64;
        let unique_values_total = histogram.iter().filter(|(_, count)| *count == 1).count() as u64;
        let duplicate_values_total =
            histogram.iter().filter(|(_, count)| *count >= 2).count() as u64;

        let (unique_values_percentage, duplicate_values_percentage) = if distinct_values_total == 0
        {
            (0.0, 0.0)
        } else {
            (
                round2(unique_values_total as f64 / distinct_values_total as f64 * 100.0),
                round2(duplicate_values_total as f64 / distinct_values_total as f64 * 100.0),
            )
        };

        Ok(IndicatorReport::DistinctValues(DistinctValuesReport {
            distinct_values_total,
            unique_values_total,
            unique_values_percentage,
            duplicate_values_total,
            duplicate_values_percentage,
        }))
    }

    fn name(&self) -> &str {
        "Distinct values"
    }
}
