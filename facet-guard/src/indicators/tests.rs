//! Tests for the indicator engine.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use super::*;
use crate::source::{CellValue, DataTable};

/// Builds a single-column table from the given cells.
fn table_of(cells: Vec<Option<&str>>) -> DataTable {
    let array = StringArray::from(cells);
    let batch = RecordBatch::try_new(
        Arc::new(Schema::new(vec![Field::new("value", DataType::Utf8, true)])),
        vec![Arc::new(array) as ArrayRef],
    )
    .unwrap();
    DataTable::from_record_batch(&batch).unwrap()
}

mod null_values_tests {
    use super::*;

    #[test]
    fn test_counts_and_percentages() {
        let table = table_of(vec![Some("a"), None, Some("b"), None]);
        let column = table.column("value").unwrap();

        let report = NullValuesIndicator::new().analyze(&column).unwrap();
        let IndicatorReport::NullValues(report) = report else {
            panic!("wrong report variant");
        };

        assert_eq!(report.values_total, 4);
        assert_eq!(report.missing_values_total, 2);
        assert_eq!(report.available_values_total, 2);
        assert_eq!(report.missing_values_percentage, 50.0);
        assert_eq!(report.available_values_percentage, 50.0);
    }

    #[test]
    fn test_percentage_sum_within_rounding() {
        let table = table_of(vec![Some("a"), Some("b"), None]);
        let column = table.column("value").unwrap();

        let report = NullValuesIndicator::new().analyze(&column).unwrap();
        let IndicatorReport::NullValues(report) = report else {
            panic!("wrong report variant");
        };

        assert_eq!(
            report.missing_values_total + report.available_values_total,
            report.values_total
        );
        let sum = report.missing_values_percentage + report.available_values_percentage;
        assert!((sum - 100.0).abs() <= 0.02, "percentages sum to {sum}");
    }

    #[test]
    fn test_empty_column_does_not_divide_by_zero() {
        let table = table_of(vec![]);
        let column = table.column("value").unwrap();

        let report = NullValuesIndicator::new().analyze(&column).unwrap();
        let IndicatorReport::NullValues(report) = report else {
            panic!("wrong report variant");
        };

        assert_eq!(report.values_total, 0);
        assert_eq!(report.missing_values_percentage, 0.0);
        assert_eq!(report.available_values_percentage, 0.0);
    }
}

mod distinct_values_tests {
    use super::*;

    #[test]
    fn test_unique_and_duplicate_partition() {
        let table = table_of(vec![
            Some("a"),
            Some("b"),
            Some("a"),
            Some("c"),
            None,
            Some("c"),
            Some("c"),
        ]);
        let column = table.column("value").unwrap();

        let report = DistinctValuesIndicator::new().analyze(&column).unwrap();
        let IndicatorReport::DistinctValues(report) = report else {
            panic!("wrong report variant");
        };

        assert_eq!(report.distinct_values_total, 3);
        assert_eq!(report.unique_values_total, 1); // "b"
        assert_eq!(report.duplicate_values_total, 2); // "a", "c"
        assert_eq!(
            report.unique_values_total + report.duplicate_values_total,
            report.distinct_values_total
        );
        assert_eq!(report.unique_values_percentage, 33.33);
        assert_eq!(report.duplicate_values_percentage, 66.67);
    }

    #[test]
    fn test_all_null_column_yields_zeroes() {
        let table = table_of(vec![None, None]);
        let column = table.column("value").unwrap();

        let report = DistinctValuesIndicator::new().analyze(&column).unwrap();
        let IndicatorReport::DistinctValues(report) = report else {
            panic!("wrong report variant");
        };

        assert_eq!(report.distinct_values_total, 0);
        assert_eq!(report.unique_values_percentage, 0.0);
        assert_eq!(report.duplicate_values_percentage, 0.0);
    }
}

mod value_range_tests {
    use super::*;

    #[test]
    fn test_descending_frequency_with_nulls() {
        let table = table_of(vec![Some("x"), Some("y"), None, Some("y"), None, None]);
        let column = table.column("value").unwrap();

        let report = ValueRangeIndicator::new().analyze(&column).unwrap();
        let IndicatorReport::ValueRange(report) = report else {
            panic!("wrong report variant");
        };

        let entries: Vec<_> = report
            .entries
            .iter()
            .map(|e| (e.value.clone(), e.count))
            .collect();
        assert_eq!(
            entries,
            vec![
                (CellValue::Null, 3),
                (CellValue::text("y"), 2),
                (CellValue::text("x"), 1),
            ]
        );
    }
}

mod similar_values_tests {
    use super::*;

    #[test]
    fn test_groups_near_identical_values() {
        let table = table_of(vec![
            Some("Schneider"),
            Some("Schneiders"),
            Some("Schneider"),
            Some("completely-different"),
        ]);
        let column = table.column("value").unwrap();

        let report = SimilarValuesIndicator::new(0.9).analyze(&column).unwrap();
        let IndicatorReport::SimilarValues(report) = report else {
            panic!("wrong report variant");
        };

        assert_eq!(report.groups.len(), 1);
        let group = &report.groups[0];
        assert_eq!(
            group.members,
            vec![
                ("Schneider".to_string(), 2),
                ("Schneiders".to_string(), 1),
            ]
        );
        assert!(report.group_of("completely-different").is_none());
    }

    #[test]
    fn test_group_membership_is_order_independent() {
        let forward = table_of(vec![Some("Meier"), Some("Meyer"), Some("Huber")]);
        let backward = table_of(vec![Some("Meyer"), Some("Meier"), Some("Huber")]);

        let indicator = SimilarValuesIndicator::new(0.7);
        for table in [forward, backward] {
            let column = table.column("value").unwrap();
            let report = indicator.analyze(&column).unwrap();
            let IndicatorReport::SimilarValues(report) = report else {
                panic!("wrong report variant");
            };

            let group = report.group_of("Meier").expect("Meier should be grouped");
            assert!(group.contains("Meyer"));
            assert!(report.group_of("Huber").is_none());
        }
    }

    #[test]
    fn test_shared_member_joins_existing_group() {
        // "aaaa"/"aaab" and "aaab"/"aabb" both match at 0.75; the second
        // pair must extend the first group instead of starting a new one.
        let table = table_of(vec![Some("aaaa"), Some("aaab"), Some("aabb")]);
        let column = table.column("value").unwrap();

        let report = SimilarValuesIndicator::new(0.75).analyze(&column).unwrap();
        let IndicatorReport::SimilarValues(report) = report else {
            panic!("wrong report variant");
        };

        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].members.len(), 3);
    }

    #[test]
    fn test_no_groups_below_threshold() {
        let table = table_of(vec![Some("abc"), Some("xyz")]);
        let column = table.column("value").unwrap();

        let report = SimilarValuesIndicator::default().analyze(&column).unwrap();
        let IndicatorReport::SimilarValues(report) = report else {
            panic!("wrong report variant");
        };
        assert!(report.groups.is_empty());
    }
}

mod pattern_frequency_tests {
    use super::*;

    #[test]
    fn test_buckets_by_pattern_ascending() {
        let table = table_of(vec![Some("Ab1"), Some("Cd2"), Some("xy")]);
        let column = table.column("value").unwrap();

        let report = PatternFrequencyIndicator::new().analyze(&column).unwrap();
        let IndicatorReport::PatternFrequency(report) = report else {
            panic!("wrong report variant");
        };

        let entries: Vec<_> = report
            .entries
            .iter()
            .map(|e| (e.pattern.as_str(), e.count))
            .collect();
        assert_eq!(entries, vec![("aa", 1), ("Aa9", 2)]);
    }

    #[test]
    fn test_counts_aggregate_occurrences() {
        let table = table_of(vec![Some("12"), Some("34"), Some("34"), None]);
        let column = table.column("value").unwrap();

        let report = PatternFrequencyIndicator::new().analyze(&column).unwrap();
        let IndicatorReport::PatternFrequency(report) = report else {
            panic!("wrong report variant");
        };

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].pattern, "99");
        assert_eq!(report.entries[0].count, 3);
    }
}

mod shortest_values_tests {
    use super::*;

    #[test]
    fn test_ascending_by_length_with_truncation() {
        let table = table_of(vec![Some("aa"), Some("b"), Some("ccc"), Some("b")]);
        let column = table.column("value").unwrap();

        let report = ShortestValuesIndicator::new(2, true)
            .analyze(&column)
            .unwrap();
        let IndicatorReport::ShortestValues(report) = report else {
            panic!("wrong report variant");
        };

        let entries: Vec<_> = report
            .entries
            .iter()
            .map(|e| (e.value.clone(), e.length, e.count))
            .collect();
        assert_eq!(
            entries,
            vec![
                (CellValue::text("b"), 1, 2),
                (CellValue::text("aa"), 2, 1),
            ]
        );
    }

    #[test]
    fn test_null_has_length_zero_when_kept() {
        let table = table_of(vec![Some("aa"), None]);
        let column = table.column("value").unwrap();

        let report = ShortestValuesIndicator::new(10, false)
            .analyze(&column)
            .unwrap();
        let IndicatorReport::ShortestValues(report) = report else {
            panic!("wrong report variant");
        };

        assert_eq!(report.entries[0].value, CellValue::Null);
        assert_eq!(report.entries[0].length, 0);
        assert_eq!(report.entries[1].value, CellValue::text("aa"));
    }
}
