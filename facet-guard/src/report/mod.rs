//! Report rendering over completed analyses.
//!
//! Formatters consume the read-only accessors of
//! [`AttributeAnalysis`](crate::analysis::AttributeAnalysis) and produce a
//! string document; they never mutate analysis state. Two formatters ship
//! with the crate: [`JsonReportFormatter`] for programmatic consumption and
//! [`HtmlReportFormatter`] for the static per-attribute report page.

use serde::Serialize;
use thiserror::Error;

use crate::analysis::{AttributeAnalysis, IndicatorOutcome, RuleResults};

mod html;

pub use html::HtmlReportFormatter;

/// Errors raised while rendering a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON serialization failure.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// String formatting failure.
    #[error("formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type for report rendering.
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Configuration options for report rendering.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Maximum number of back-reference row indexes listed per value.
    pub max_listed_rows: usize,
    /// Maximum number of value-range entries rendered.
    pub max_value_range_entries: usize,
    /// Whether to render the valid-values drill-down in addition to the
    /// invalid one.
    pub include_valid_values: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_listed_rows: 50,
            max_value_range_entries: 100,
            include_valid_values: false,
        }
    }
}

impl ReportConfig {
    /// Creates a minimal configuration showing summaries only.
    pub fn minimal() -> Self {
        Self {
            max_listed_rows: 0,
            max_value_range_entries: 20,
            include_valid_values: false,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self {
            max_listed_rows: usize::MAX,
            max_value_range_entries: usize::MAX,
            include_valid_values: true,
        }
    }

    /// Sets the maximum number of listed back-reference rows.
    pub fn with_max_listed_rows(mut self, max: usize) -> Self {
        self.max_listed_rows = max;
        self
    }

    /// Sets whether to render the valid-values drill-down.
    pub fn with_valid_values(mut self, include: bool) -> Self {
        self.include_valid_values = include;
        self
    }
}

/// Trait for rendering a completed analysis into an output document.
pub trait ReportFormatter {
    /// Renders the analysis into a string document.
    fn format(&self, analysis: &AttributeAnalysis) -> ReportResult<String>;
}

/// Description of one configured rule, for report headers.
#[derive(Debug, Clone, Serialize)]
struct RuleDescriptor {
    id: String,
    name: String,
    description: String,
}

/// The serializable analysis document produced by [`JsonReportFormatter`].
#[derive(Debug, Serialize)]
struct AnalysisDocument<'a> {
    attribute_name: &'a str,
    generated_at: String,
    dropna: bool,
    indicators: &'a [IndicatorOutcome],
    business_rules: Vec<RuleDescriptor>,
    business_rules_results: Option<&'a RuleResults>,
}

fn rule_descriptors(analysis: &AttributeAnalysis) -> Vec<RuleDescriptor> {
    analysis
        .business_rules()
        .iter()
        .map(|rule| RuleDescriptor {
            id: rule.id().to_string(),
            name: rule.name().to_string(),
            description: rule.description(),
        })
        .collect()
}

/// Formats an analysis as a pretty-printed JSON document.
#[derive(Debug, Clone, Default)]
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    /// Creates a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, analysis: &AttributeAnalysis) -> ReportResult<String> {
        let document = AnalysisDocument {
            attribute_name: analysis.attribute_name(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            dropna: analysis.dropna(),
            indicators: analysis.indicator_outcomes(),
            business_rules: rule_descriptors(analysis),
            business_rules_results: analysis.rule_results(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AttributeAnalysis;
    use crate::indicators::NullValuesIndicator;
    use crate::rules::NotNullRule;
    use crate::source::DataTable;
    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    fn completed_analysis() -> AttributeAnalysis {
        let values = StringArray::from(vec![Some("a"), None, Some("a")]);
        let batch = RecordBatch::try_new(
            Arc::new(Schema::new(vec![Field::new("v", DataType::Utf8, true)])),
            vec![Arc::new(values) as ArrayRef],
        )
        .unwrap();
        let table = Arc::new(DataTable::from_record_batch(&batch).unwrap());

        let mut analysis = AttributeAnalysis::new("v", table, false).unwrap();
        analysis.add_indicator(Box::new(NullValuesIndicator::new()));
        analysis
            .add_business_rule(Box::new(NotNullRule::new()))
            .unwrap();
        analysis.run().unwrap();
        analysis
    }

    #[test]
    fn test_json_document_structure() {
        let analysis = completed_analysis();
        let json = JsonReportFormatter::new().format(&analysis).unwrap();
        let document: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(document["attribute_name"], "v");
        assert_eq!(document["dropna"], false);
        assert_eq!(document["business_rules"][0]["id"], "NotNullRule");
        assert!(document["business_rules_results"].is_object());
        assert_eq!(
            document["indicators"][0]["report"]["indicator"],
            "NullValues"
        );
    }

    #[test]
    fn test_report_config_presets() {
        let minimal = ReportConfig::minimal();
        assert_eq!(minimal.max_listed_rows, 0);
        assert!(!minimal.include_valid_values);

        let detailed = ReportConfig::detailed();
        assert!(detailed.include_valid_values);
    }
}
