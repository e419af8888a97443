//! The nested business-rule result structure.
//!
//! Results are partitioned by validity, then keyed by rule (plus an
//! `overall` bucket combining all rules). Each bucket accumulates the
//! occurrence counts of the values that landed in it and keeps one entry per
//! distinct value with its per-rule outcomes and row back-references.

use serde::Serialize;

use crate::source::CellValue;

/// Which partition a value landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    /// The value satisfied the rule (or all rules, for `overall`).
    Valid,
    /// The value violated the rule (or at least one rule, for `overall`).
    Invalid,
}

/// Outcome of one rule for one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleOutcome {
    /// Identifier of the evaluated rule.
    pub rule_id: String,
    /// Whether the value satisfied the rule.
    pub valid: bool,
}

/// One distinct value inside a bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueEntry {
    /// The distinct value.
    pub value: CellValue,
    /// Per-rule outcomes in rule registration order.
    pub outcomes: Vec<RuleOutcome>,
    /// Occurrence count of the value in the column.
    pub count: u64,
    /// Row indexes of all occurrences, referring into the analyzed table.
    pub rows: Vec<usize>,
}

impl ValueEntry {
    /// Overall validity: AND over all per-rule outcomes.
    pub fn overall_valid(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.valid)
    }
}

/// A single result bucket: running occurrence total plus per-value entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleBucket {
    /// Sum of the occurrence counts of all values in this bucket.
    pub count: u64,
    /// One entry per distinct value, in visit order.
    pub values: Vec<ValueEntry>,
}

impl RuleBucket {
    fn push(&mut self, entry: &ValueEntry) {
        self.count += entry.count;
        self.values.push(entry.clone());
    }

    /// Returns the entry for a value, if the value landed in this bucket.
    pub fn value(&self, value: &CellValue) -> Option<&ValueEntry> {
        self.values.iter().find(|entry| &entry.value == value)
    }

    /// Number of distinct values in this bucket.
    pub fn distinct_values(&self) -> usize {
        self.values.len()
    }
}

/// One validity partition: the `overall` bucket plus one bucket per rule.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionResults {
    overall: RuleBucket,
    rules: Vec<(String, RuleBucket)>,
}

impl PartitionResults {
    fn new(rule_ids: &[String]) -> Self {
        Self {
            overall: RuleBucket::default(),
            rules: rule_ids
                .iter()
                .map(|id| (id.clone(), RuleBucket::default()))
                .collect(),
        }
    }

    /// The bucket combining all rules.
    pub fn overall(&self) -> &RuleBucket {
        &self.overall
    }

    /// The bucket of a single rule.
    pub fn rule(&self, rule_id: &str) -> Option<&RuleBucket> {
        self.rules
            .iter()
            .find(|(id, _)| id == rule_id)
            .map(|(_, bucket)| bucket)
    }

    /// All per-rule buckets in rule registration order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleBucket)> {
        self.rules.iter().map(|(id, bucket)| (id.as_str(), bucket))
    }

    fn rule_mut(&mut self, rule_id: &str) -> &mut RuleBucket {
        // Buckets are pre-created from the registered rule ids, so the
        // lookup cannot miss for outcomes produced by the aggregator.
        &mut self
            .rules
            .iter_mut()
            .find(|(id, _)| id == rule_id)
            .expect("rule bucket exists for registered rule")
            .1
    }
}

/// Business-rule results for one attribute.
///
/// Invariant: for every rule r (and for `overall`),
/// `valid.rule(r).count + invalid.rule(r).count` equals the occurrence sum
/// of all values that were not dropped.
#[derive(Debug, Clone, Serialize)]
pub struct RuleResults {
    valid: PartitionResults,
    invalid: PartitionResults,
}

impl RuleResults {
    /// Creates empty results with one bucket per rule id in each partition.
    pub(crate) fn new(rule_ids: &[String]) -> Self {
        Self {
            valid: PartitionResults::new(rule_ids),
            invalid: PartitionResults::new(rule_ids),
        }
    }

    /// Records one distinct value: its occurrence count is added to the
    /// matching partition of every rule bucket and of the overall bucket.
    pub(crate) fn record(&mut self, entry: &ValueEntry) {
        for outcome in &entry.outcomes {
            self.partition_mut(outcome.valid)
                .rule_mut(&outcome.rule_id)
                .push(entry);
        }
        let overall = entry.overall_valid();
        self.partition_mut(overall).overall.push(entry);
    }

    fn partition_mut(&mut self, valid: bool) -> &mut PartitionResults {
        if valid {
            &mut self.valid
        } else {
            &mut self.invalid
        }
    }

    /// The partition holding values that satisfied a rule.
    pub fn valid(&self) -> &PartitionResults {
        &self.valid
    }

    /// The partition holding values that violated a rule.
    pub fn invalid(&self) -> &PartitionResults {
        &self.invalid
    }

    /// Partition lookup by validity.
    pub fn partition(&self, validity: Validity) -> &PartitionResults {
        match validity {
            Validity::Valid => &self.valid,
            Validity::Invalid => &self.invalid,
        }
    }

    /// Total occurrence count of all recorded values.
    pub fn total_count(&self) -> u64 {
        self.valid.overall.count + self.invalid.overall.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: &str, count: u64, outcomes: &[(&str, bool)]) -> ValueEntry {
        ValueEntry {
            value: CellValue::text(value),
            outcomes: outcomes
                .iter()
                .map(|(rule_id, valid)| RuleOutcome {
                    rule_id: rule_id.to_string(),
                    valid: *valid,
                })
                .collect(),
            count,
            rows: Vec::new(),
        }
    }

    #[test]
    fn test_record_accumulates_per_rule_and_overall() {
        let rule_ids = vec!["a".to_string(), "b".to_string()];
        let mut results = RuleResults::new(&rule_ids);

        results.record(&entry("ok", 3, &[("a", true), ("b", true)]));
        results.record(&entry("half", 2, &[("a", true), ("b", false)]));
        results.record(&entry("bad", 1, &[("a", false), ("b", false)]));

        assert_eq!(results.valid().rule("a").unwrap().count, 5);
        assert_eq!(results.invalid().rule("a").unwrap().count, 1);
        assert_eq!(results.valid().rule("b").unwrap().count, 3);
        assert_eq!(results.invalid().rule("b").unwrap().count, 3);

        assert_eq!(results.valid().overall().count, 3);
        assert_eq!(results.invalid().overall().count, 3);
        assert_eq!(results.total_count(), 6);
    }

    #[test]
    fn test_partition_sums_agree_across_rules() {
        let rule_ids = vec!["a".to_string(), "b".to_string()];
        let mut results = RuleResults::new(&rule_ids);

        results.record(&entry("x", 4, &[("a", true), ("b", false)]));
        results.record(&entry("y", 6, &[("a", false), ("b", true)]));

        let total = results.total_count();
        for rule_id in ["a", "b"] {
            let valid = results.valid().rule(rule_id).unwrap().count;
            let invalid = results.invalid().rule(rule_id).unwrap().count;
            assert_eq!(valid + invalid, total);
        }
    }

    #[test]
    fn test_overall_validity_is_conjunction() {
        let all_valid = entry("v", 1, &[("a", true), ("b", true)]);
        let one_invalid = entry("i", 1, &[("a", true), ("b", false)]);
        assert!(all_valid.overall_valid());
        assert!(!one_invalid.overall_valid());
    }

    #[test]
    fn test_value_lookup() {
        let rule_ids = vec!["a".to_string()];
        let mut results = RuleResults::new(&rule_ids);
        results.record(&entry("x", 2, &[("a", false)]));

        let bucket = results.invalid().rule("a").unwrap();
        let entry = bucket.value(&CellValue::text("x")).unwrap();
        assert_eq!(entry.count, 2);
        assert!(bucket.value(&CellValue::text("y")).is_none());
    }
}
