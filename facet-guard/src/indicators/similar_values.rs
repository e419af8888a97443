//! Similar-value clustering indicator.

use serde::Serialize;
use tracing::instrument;

use crate::classify::similarity_ratio;
use crate::indicators::{Indicator, IndicatorReport, IndicatorResult};
use crate::source::ColumnView;

/// Default similarity threshold for clustering.
pub const DEFAULT_MIN_RATIO: f64 = 0.9;

/// Indicator that groups distinct values whose pairwise similarity ratio
/// reaches a configured threshold.
///
/// Every unordered pair of distinct values is compared once, so the run time
/// is quadratic in the number of distinct values. This is the most expensive
/// indicator on high-cardinality columns.
///
/// A matching pair joins the first existing group that already contains one
/// of its members; otherwise the pair starts a new group. Groups are
/// reported in discovery order. Missing values are excluded.
#[derive(Debug, Clone)]
pub struct SimilarValuesIndicator {
    min_ratio: f64,
}

impl SimilarValuesIndicator {
    /// Creates a new similar-value indicator with the given threshold.
    pub fn new(min_ratio: f64) -> Self {
        Self { min_ratio }
    }

    /// The configured similarity threshold.
    pub fn min_ratio(&self) -> f64 {
        self.min_ratio
    }
}

impl Default for SimilarValuesIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RATIO)
    }
}

/// One group of mutually similar values.
///
/// Every member is similar to at least one other member of the same group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarValueGroup {
    /// Group members with their occurrence counts.
    pub members: Vec<(String, u64)>,
}

impl SimilarValueGroup {
    /// True iff `value` is a member of this group.
    pub fn contains(&self, value: &str) -> bool {
        self.members.iter().any(|(member, _)| member == value)
    }
}

/// Similar-value clusters in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarValuesReport {
    /// The matching groups.
    pub groups: Vec<SimilarValueGroup>,
}

impl SimilarValuesReport {
    /// Returns the group containing `value`, if any.
    pub fn group_of(&self, value: &str) -> Option<&SimilarValueGroup> {
        self.groups.iter().find(|group| group.contains(value))
    }
}

impl Indicator for SimilarValuesIndicator {
    #[instrument(skip(self, column), fields(indicator = "similar_values", column = %column.name()))]
    fn analyze(&self, column: &ColumnView<'_>) -> IndicatorResult<IndicatorReport> {
        let ranked = column.histogram(true).ranked();
        let values: Vec<(String, u64)> = ranked
            .into_iter()
            .filter_map(|(value, count)| value.as_text().map(|s| (s.to_string(), count)))
            .collect();

        let mut groups: Vec<SimilarValueGroup> = Vec::new();
        for (i, a) in values.iter().enumerate() {
            for b in &values[i + 1..] {
                if similarity_ratio(&a.0, &b.0) >= self.min_ratio {
                    assign_to_group(&mut groups, a, b);
                }
            }
        }

        Ok(IndicatorReport::SimilarValues(SimilarValuesReport {
            groups,
        }))
    }

    fn name(&self) -> &str {
        "Similar values"
    }
}

/// Adds a matching pair to the first group containing either member, or
/// starts a new group.
fn assign_to_group(
    groups: &mut Vec<SimilarValueGroup>,
    a: &(String, u64),
    b: &(String, u64),
) {
    for group in groups.iter_mut() {
        if group.contains(&a.0) || group.contains(&b.0) {
            if !group.contains(&a.0) {
                group.members.push(a.clone());
            }
            if !group.contains(&b.0) {
                group.members.push(b.clone());
            }
            return;
        }
    }

    groups.push(SimilarValueGroup {
        members: vec![a.clone(), b.clone()],
    });
}
