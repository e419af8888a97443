//! Missing-value indicator.

use serde::Serialize;
use tracing::instrument;

use crate::indicators::{round2, Indicator, IndicatorReport, IndicatorResult};
use crate::source::ColumnView;

/// Indicator that counts missing and available values in a column.
///
/// # Example
///
/// ```rust,ignore
/// let indicator = NullValuesIndicator::new();
/// let report = indicator.analyze(&column)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullValuesIndicator;

impl NullValuesIndicator {
    /// Creates a new missing-value indicator.
    pub fn new() -> Self {
        Self
    }
}

/// Missing-value statistics for one column.
///
/// `missing_values_total + available_values_total == values_total` always
/// holds; the percentages are rounded to two decimals and are both zero for
/// an empty column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullValuesReport {
    /// Total number of rows.
    pub values_total: u64,
    /// Number of missing values.
    pub missing_values_total: u64,
    /// Number of present values.
    pub available_values_total: u64,
    /// Missing values as a percentage of all rows.
    pub missing_values_percentage: f64,
    /// Present values as a percentage of all rows.
    pub available_values_percentage: f64,
}

impl Indicator for NullValuesIndicator {
    #[instrument(skip(self, column), fields(indicator = "null_values", column = %column.name()))]
    fn analyze(&self, column: &ColumnView<'_>) -> IndicatorResult<IndicatorReport> {
        let values_total = column.len() as u64;
        let missing_values_total = column.null_count() as u64;
        let available_values_total = values_total - missing_values_total;

        let (missing_values_percentage, available_values_percentage) = if values_total == 0 {
            (0.0, 0.0)
        } else {
            (
                round2(missing_values_total as f64 / values_total as f64 * 100.0),
                round2(available_values_total as f64 / values_total as f64 * 100.0),
            )
        };

        Ok(IndicatorReport::NullValues(NullValuesReport {
            values_total,
            missing_values_total,
            available_values_total,
            missing_values_percentage,
            available_values_percentage,
        }))
    }

    fn name(&self) -> &str {
        "Missing values"
    }
}
