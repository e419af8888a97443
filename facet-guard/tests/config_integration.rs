//! End-to-end tests: JSON configuration over a CSV-loaded table, through the
//! aggregator, into rendered reports.

use std::io::Write as _;
use std::sync::Arc;

use facet_guard::config::{AttributeAnalysisSpec, ConfigError};
use facet_guard::indicators::IndicatorReport;
use facet_guard::report::{HtmlReportFormatter, JsonReportFormatter, ReportFormatter};
use facet_guard::source::{CellValue, CsvOptions, CsvSource};

const CONTACTS_CSV: &str = "\
name,email,country
Ada Lovelace,ada@calc.org,GB
Grace Hopper,grace@navy.mil,US
Grace Hopper,grace@navy.mil,US
,bad-email,XX
Alan Turing,,GB
";

fn contacts_table() -> Arc<facet_guard::source::DataTable> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONTACTS_CSV.as_bytes()).unwrap();
    file.flush().unwrap();

    let table = CsvSource::new(file.path())
        .with_options(CsvOptions::default())
        .load()
        .unwrap();
    Arc::new(table)
}

const EMAIL_SPEC: &str = r#"{
    "attribute_name": "email",
    "dropna": false,
    "indicators": [
        {"indicator_name": "NullValuesIndicator", "indicator_config": {}},
        {"indicator_name": "DistinctValuesIndicator", "indicator_config": {}},
        {"indicator_name": "ValueRangeIndicator", "indicator_config": {}},
        {"indicator_name": "SimilarValuesIndicator", "indicator_config": {"min_ratio": 0.9}},
        {"indicator_name": "PatternFrequencyIndicator", "indicator_config": {}},
        {"indicator_name": "ShortestValuesIndicator",
         "indicator_config": {"number_of_values": 3, "dropna": false}}
    ],
    "business_rules": [
        {"business_rule_name": "NotNullRule", "business_rule_config": {}},
        {"business_rule_name": "EmailMatchingRule", "business_rule_config": {"dropna": false}}
    ]
}"#;

#[test]
fn test_full_pipeline_from_json_config() {
    let table = contacts_table();
    let spec = AttributeAnalysisSpec::from_json(EMAIL_SPEC).unwrap();
    let mut analysis = spec.build(table).unwrap();
    analysis.run().unwrap();

    assert!(analysis.is_complete());
    assert_eq!(analysis.indicator_outcomes().len(), 6);

    // email column: ada@calc.org, grace@navy.mil x2, bad-email, null
    let results = analysis.rule_results().unwrap();
    assert_eq!(results.valid().overall().count, 3);
    assert_eq!(results.invalid().overall().count, 2);
    assert!(results
        .invalid()
        .overall()
        .value(&CellValue::text("bad-email"))
        .is_some());
    assert!(results.invalid().overall().value(&CellValue::Null).is_some());
}

#[test]
fn test_indicator_reports_from_pipeline() {
    let table = contacts_table();
    let spec = AttributeAnalysisSpec::from_json(EMAIL_SPEC).unwrap();
    let mut analysis = spec.build(table).unwrap();
    analysis.run().unwrap();

    for outcome in analysis.indicator_outcomes() {
        match &outcome.report {
            IndicatorReport::NullValues(report) => {
                assert_eq!(report.values_total, 5);
                assert_eq!(report.missing_values_total, 1);
                assert_eq!(report.available_values_total, 4);
            }
            IndicatorReport::DistinctValues(report) => {
                // ada@calc.org, grace@navy.mil, bad-email
                assert_eq!(report.distinct_values_total, 3);
                assert_eq!(report.unique_values_total, 2);
                assert_eq!(report.duplicate_values_total, 1);
            }
            IndicatorReport::ValueRange(report) => {
                assert_eq!(report.entries[0].value, CellValue::text("grace@navy.mil"));
                assert_eq!(report.entries[0].count, 2);
                assert_eq!(report.entries.len(), 4);
            }
            IndicatorReport::ShortestValues(report) => {
                assert_eq!(report.entries.len(), 3);
                assert_eq!(report.entries[0].value, CellValue::Null);
                assert_eq!(report.entries[0].length, 0);
            }
            IndicatorReport::SimilarValues(_) | IndicatorReport::PatternFrequency(_) => {}
        }
    }
}

#[test]
fn test_reports_render_from_pipeline() {
    let table = contacts_table();
    let spec = AttributeAnalysisSpec::from_json(EMAIL_SPEC).unwrap();
    let mut analysis = spec.build(table).unwrap();
    analysis.run().unwrap();

    let json = JsonReportFormatter::new().format(&analysis).unwrap();
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(document["attribute_name"], "email");
    assert_eq!(document["indicators"].as_array().unwrap().len(), 6);

    let html = HtmlReportFormatter::new().format(&analysis).unwrap();
    assert!(html.contains("Attribute analysis: email"));
    assert!(html.contains("bad-email"));
}

#[test]
fn test_domain_and_whitespace_rules_from_config() {
    let table = contacts_table();
    let spec = AttributeAnalysisSpec::from_json(
        r#"{
            "attribute_name": "country",
            "dropna": false,
            "business_rules": [
                {"business_rule_name": "DomainListMatchingRule",
                 "business_rule_config": {"values": ["GB", "US"], "dropna": false}},
                {"business_rule_name": "NoWhitespacePaddingRule", "business_rule_config": {}},
                {"business_rule_name": "CountryCodeMatchingRule", "business_rule_config": {}}
            ]
        }"#,
    )
    .unwrap();

    let mut analysis = spec.build(table).unwrap();
    analysis.run().unwrap();

    let results = analysis.rule_results().unwrap();
    // "XX" is a well-formed country code but outside the domain list.
    assert_eq!(
        results
            .invalid()
            .rule("DomainListMatchingRule")
            .unwrap()
            .count,
        1
    );
    assert_eq!(
        results
            .valid()
            .rule("CountryCodeMatchingRule")
            .unwrap()
            .count,
        5
    );
    assert_eq!(results.invalid().overall().count, 1);
}

#[test]
fn test_unknown_attribute_surfaces_as_config_error() {
    let table = contacts_table();
    let spec = AttributeAnalysisSpec::from_json(
        r#"{"attribute_name": "no_such_column", "dropna": true}"#,
    )
    .unwrap();

    assert!(matches!(
        spec.build(table),
        Err(ConfigError::Analysis(_))
    ));
}

#[test]
fn test_duplicate_rule_surfaces_as_config_error() {
    let table = contacts_table();
    let spec = AttributeAnalysisSpec::from_json(
        r#"{
            "attribute_name": "email",
            "dropna": false,
            "business_rules": [
                {"business_rule_name": "NotNullRule", "business_rule_config": {}},
                {"business_rule_name": "NotNullRule", "business_rule_config": {}}
            ]
        }"#,
    )
    .unwrap();

    assert!(matches!(
        spec.build(table),
        Err(ConfigError::Analysis(_))
    ));
}
