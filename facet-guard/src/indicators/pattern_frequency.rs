//! Pattern-frequency indicator.

use serde::Serialize;
use tracing::instrument;

use crate::classify::shape_pattern;
use crate::indicators::{Indicator, IndicatorReport, IndicatorResult};
use crate::source::ColumnView;

/// Indicator that re-buckets the value histogram by character-shape pattern.
///
/// Each distinct value contributes its full occurrence count to the bucket
/// of its pattern (see [`shape_pattern`]). Missing values are excluded.
#[derive(Debug, Clone, Default)]
pub struct PatternFrequencyIndicator;

impl PatternFrequencyIndicator {
    /// Creates a new pattern-frequency indicator.
    pub fn new() -> Self {
        Self
    }
}

/// One shape pattern with its aggregated occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternCount {
    /// The shape pattern.
    pub pattern: String,
    /// Summed occurrence count of all values with this pattern.
    pub count: u64,
}

/// Pattern histogram in ascending count order.
///
/// Ties keep the order in which patterns were first encountered. Reports
/// render this descending; the ascending order here mirrors how the
/// histogram is accumulated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternFrequencyReport {
    /// Pattern entries, least frequent first.
    pub entries: Vec<PatternCount>,
}

impl Indicator for PatternFrequencyIndicator {
    #[instrument(skip(self, column), fields(indicator = "pattern_frequency", column = %column.name()))]
    fn analyze(&self, column: &ColumnView<'_>) -> IndicatorResult<IndicatorReport> {
        let mut entries: Vec<PatternCount> = Vec::new();

        for (value, count) in column.histogram(true).ranked() {
            let Some(text) = value.as_text() else {
                continue;
            };
            let pattern = shape_pattern(text);
            match entries.iter_mut().find(|entry| entry.pattern == pattern) {
                Some(entry) => entry.count += count,
                None => entries.push(PatternCount { pattern, count }),
            }
        }

        entries.sort_by_key(|entry| entry.count);

        Ok(IndicatorReport::PatternFrequency(PatternFrequencyReport {
            entries,
        }))
    }

    fn name(&self) -> &str {
        "Pattern frequency"
    }
}
