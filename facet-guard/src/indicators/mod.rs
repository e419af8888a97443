//! Descriptive indicators computed over a single attribute.
//!
//! Each indicator is a pure computation over one column: given the same data
//! it always produces the same typed report. Indicators are registered on an
//! [`AttributeAnalysis`](crate::analysis::AttributeAnalysis) in order and run
//! fail-fast; any computation error aborts the whole analysis.
//!
//! ## Available indicators
//!
//! - [`NullValuesIndicator`]: missing/available counts and percentages
//! - [`DistinctValuesIndicator`]: distinct/unique/duplicate statistics
//! - [`ValueRangeIndicator`]: value histogram, descending frequency
//! - [`SimilarValuesIndicator`]: clusters of near-identical values
//! - [`PatternFrequencyIndicator`]: character-shape pattern histogram
//! - [`ShortestValuesIndicator`]: the shortest values with lengths

use std::fmt::Debug;

use serde::Serialize;

use crate::source::ColumnView;

mod distinct_values;
mod errors;
mod null_values;
mod pattern_frequency;
mod shortest_values;
mod similar_values;
mod value_range;

pub use distinct_values::{DistinctValuesIndicator, DistinctValuesReport};
pub use errors::{IndicatorError, IndicatorResult};
pub use null_values::{NullValuesIndicator, NullValuesReport};
pub use pattern_frequency::{PatternCount, PatternFrequencyIndicator, PatternFrequencyReport};
pub use shortest_values::{
    ShortestValue, ShortestValuesIndicator, ShortestValuesReport, DEFAULT_NUMBER_OF_VALUES,
};
pub use similar_values::{
    SimilarValueGroup, SimilarValuesIndicator, SimilarValuesReport, DEFAULT_MIN_RATIO,
};
pub use value_range::{ValueCount, ValueRangeIndicator, ValueRangeReport};

/// A descriptive statistic computed over one attribute.
///
/// Implementations must be pure given the column: no hidden state, no
/// mutation. Reports are typed per indicator and carried in the exhaustive
/// [`IndicatorReport`] enum so downstream consumers match on them at compile
/// time.
pub trait Indicator: Debug + Send + Sync {
    /// Computes this indicator's report for the given column.
    fn analyze(&self, column: &ColumnView<'_>) -> IndicatorResult<IndicatorReport>;

    /// Display label for reports.
    fn name(&self) -> &str;
}

/// The typed result of one indicator run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "indicator", content = "result")]
pub enum IndicatorReport {
    /// Missing-value statistics.
    NullValues(NullValuesReport),
    /// Distinct/unique/duplicate statistics.
    DistinctValues(DistinctValuesReport),
    /// Value histogram in descending frequency order.
    ValueRange(ValueRangeReport),
    /// Clusters of mutually similar values.
    SimilarValues(SimilarValuesReport),
    /// Shape-pattern histogram in ascending frequency order.
    PatternFrequency(PatternFrequencyReport),
    /// Shortest values, ascending by length.
    ShortestValues(ShortestValuesReport),
}

/// Rounds a percentage to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests;
