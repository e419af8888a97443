//! Shortest-values indicator.

use serde::Serialize;
use tracing::instrument;

use crate::indicators::{Indicator, IndicatorReport, IndicatorResult};
use crate::source::{CellValue, ColumnView};

/// Default number of values to report.
pub const DEFAULT_NUMBER_OF_VALUES: usize = 100;

/// Indicator that reports the lowest-length distinct values.
///
/// Suspiciously short values often point at truncation or placeholder data,
/// so the report surfaces them with their lengths and occurrence counts.
#[derive(Debug, Clone)]
pub struct ShortestValuesIndicator {
    number_of_values: usize,
    dropna: bool,
}

impl ShortestValuesIndicator {
    /// Creates a new shortest-values indicator.
    ///
    /// # Arguments
    ///
    /// * `number_of_values` - Maximum number of entries in the report
    /// * `dropna` - Whether to exclude missing values
    pub fn new(number_of_values: usize, dropna: bool) -> Self {
        Self {
            number_of_values,
            dropna,
        }
    }

    /// Maximum number of reported entries.
    pub fn number_of_values(&self) -> usize {
        self.number_of_values
    }

    /// Whether missing values are excluded.
    pub fn dropna(&self) -> bool {
        self.dropna
    }
}

impl Default for ShortestValuesIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_NUMBER_OF_VALUES, true)
    }
}

/// One value with its character length and occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestValue {
    /// The distinct value.
    pub value: CellValue,
    /// Length of the value in characters; a missing value has length zero.
    pub length: u64,
    /// How often it occurs in the column.
    pub count: u64,
}

/// The shortest distinct values, ascending by length.
///
/// Ties keep the histogram's descending-frequency order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestValuesReport {
    /// The reported values, shortest first.
    pub entries: Vec<ShortestValue>,
}

impl Indicator for ShortestValuesIndicator {
    #[instrument(skip(self, column), fields(indicator = "shortest_values", column = %column.name()))]
    fn analyze(&self, column: &ColumnView<'_>) -> IndicatorResult<IndicatorReport> {
        let mut entries: Vec<ShortestValue> = column
            .histogram(self.dropna)
            .ranked()
            .into_iter()
            .map(|(value, count)| ShortestValue {
                length: value.char_len() as u64,
                value,
                count,
            })
            .collect();

        entries.sort_by_key(|entry| entry.length);
        entries.truncate(self.number_of_values);

        Ok(IndicatorReport::ShortestValues(ShortestValuesReport {
            entries,
        }))
    }

    fn name(&self) -> &str {
        "Shortest values"
    }
}
