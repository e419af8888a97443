//! Value-range indicator.

use serde::Serialize;
use tracing::instrument;

use crate::indicators::{Indicator, IndicatorReport, IndicatorResult};
use crate::source::{CellValue, ColumnView};

/// Indicator that reports the full value histogram of a column.
///
/// Missing values are counted as a value of their own, so the report covers
/// every row of the column.
#[derive(Debug, Clone, Default)]
pub struct ValueRangeIndicator;

impl ValueRangeIndicator {
    /// Creates a new value-range indicator.
    pub fn new() -> Self {
        Self
    }
}

/// One value with its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    /// The distinct value.
    pub value: CellValue,
    /// How often it occurs in the column.
    pub count: u64,
}

/// Value histogram in descending frequency order.
///
/// Ties keep first-seen order, so the report is deterministic for a given
/// column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRangeReport {
    /// Histogram entries, most frequent first.
    pub entries: Vec<ValueCount>,
}

impl Indicator for ValueRangeIndicator {
    #[instrument(skip(self, column), fields(indicator = "value_range", column = %column.name()))]
    fn analyze(&self, column: &ColumnView<'_>) -> IndicatorResult<IndicatorReport> {
        let entries = column
            .histogram(false)
            .ranked()
            .into_iter()
            .map(|(value, count)| ValueCount { value, count })
            .collect();

        Ok(IndicatorReport::ValueRange(ValueRangeReport { entries }))
    }

    fn name(&self) -> &str {
        "Value range"
    }
}
