//! Static HTML report rendering.

use std::fmt::Write;

use crate::analysis::{AttributeAnalysis, PartitionResults, RuleBucket, ValueEntry};
use crate::indicators::IndicatorReport;
use crate::report::{ReportConfig, ReportFormatter, ReportResult};

/// Renders an analysis as a single static Bootstrap-styled HTML page.
///
/// The page carries one section per indicator, a business-rule summary with
/// per-rule and overall valid/invalid counts, and a drill-down of invalid
/// values with their rule outcomes and affected row indexes.
#[derive(Debug, Clone, Default)]
pub struct HtmlReportFormatter {
    config: ReportConfig,
}

impl HtmlReportFormatter {
    /// Creates a formatter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with the given configuration.
    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }
}

impl ReportFormatter for HtmlReportFormatter {
    fn format(&self, analysis: &AttributeAnalysis) -> ReportResult<String> {
        let mut out = String::new();

        write_header(&mut out, analysis.attribute_name())?;
        write_indicator_sections(&mut out, analysis, &self.config)?;
        write_rule_summary(&mut out, analysis)?;
        write_value_drilldowns(&mut out, analysis, &self.config)?;
        write_footer(&mut out)?;

        Ok(out)
    }
}

/// Escapes text for safe embedding in HTML.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn write_header(out: &mut String, attribute_name: &str) -> ReportResult<()> {
    let title = escape(attribute_name);
    let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");
    write!(
        out,
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Attribute analysis: {title}</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
</head>
<body>
<div class="container my-4">
<h1>Attribute analysis: {title}</h1>
<p class="text-muted">Generated {generated}</p>
"#
    )?;
    Ok(())
}

fn write_footer(out: &mut String) -> ReportResult<()> {
    write!(out, "</div>\n</body>\n</html>\n")?;
    Ok(())
}

fn write_indicator_sections(
    out: &mut String,
    analysis: &AttributeAnalysis,
    config: &ReportConfig,
) -> ReportResult<()> {
    if analysis.indicator_outcomes().is_empty() {
        return Ok(());
    }

    writeln!(out, r#"<h2 class="mt-4">Indicators</h2>"#)?;
    for outcome in analysis.indicator_outcomes() {
        writeln!(
            out,
            r#"<div class="card my-3"><div class="card-header"><h5 class="mb-0">{}</h5></div><div class="card-body">"#,
            escape(&outcome.name)
        )?;
        write_indicator_body(out, &outcome.report, config)?;
        writeln!(out, "</div></div>")?;
    }
    Ok(())
}

fn write_indicator_body(
    out: &mut String,
    report: &IndicatorReport,
    config: &ReportConfig,
) -> ReportResult<()> {
    match report {
        IndicatorReport::NullValues(report) => {
            writeln!(out, r#"<table class="table table-sm">"#)?;
            writeln!(
                out,
                "<tr><th>Total values</th><td>{}</td></tr>",
                report.values_total
            )?;
            writeln!(
                out,
                "<tr><th>Missing</th><td>{} ({}%)</td></tr>",
                report.missing_values_total, report.missing_values_percentage
            )?;
            writeln!(
                out,
                "<tr><th>Available</th><td>{} ({}%)</td></tr>",
                report.available_values_total, report.available_values_percentage
            )?;
            writeln!(out, "</table>")?;
        }
        IndicatorReport::DistinctValues(report) => {
            writeln!(out, r#"<table class="table table-sm">"#)?;
            writeln!(
                out,
                "<tr><th>Distinct values</th><td>{}</td></tr>",
                report.distinct_values_total
            )?;
            writeln!(
                out,
                "<tr><th>Unique (occurring once)</th><td>{} ({}%)</td></tr>",
                report.unique_values_total, report.unique_values_percentage
            )?;
            writeln!(
                out,
                "<tr><th>Duplicated (occurring more than once)</th><td>{} ({}%)</td></tr>",
                report.duplicate_values_total, report.duplicate_values_percentage
            )?;
            writeln!(out, "</table>")?;
        }
        IndicatorReport::ValueRange(report) => {
            writeln!(
                out,
                r#"<table class="table table-sm table-striped"><tr><th>Value</th><th>Count</th></tr>"#
            )?;
            for entry in report.entries.iter().take(config.max_value_range_entries) {
                writeln!(
                    out,
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape(&entry.value.to_string()),
                    entry.count
                )?;
            }
            writeln!(out, "</table>")?;
            if report.entries.len() > config.max_value_range_entries {
                writeln!(
                    out,
                    r#"<p class="text-muted">{} further values omitted.</p>"#,
                    report.entries.len() - config.max_value_range_entries
                )?;
            }
        }
        IndicatorReport::SimilarValues(report) => {
            if report.groups.is_empty() {
                writeln!(out, r#"<p class="text-muted">No similar values found.</p>"#)?;
            }
            for (index, group) in report.groups.iter().enumerate() {
                let members = group
                    .members
                    .iter()
                    .map(|(value, count)| format!("{} ({count})", escape(value)))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "<p><b>Group {}:</b> {}</p>", index + 1, members)?;
            }
        }
        IndicatorReport::PatternFrequency(report) => {
            writeln!(
                out,
                r#"<table class="table table-sm table-striped"><tr><th>Pattern</th><th>Count</th></tr>"#
            )?;
            // Accumulated ascending; the report page shows the most common
            // patterns first.
            for entry in report.entries.iter().rev() {
                writeln!(
                    out,
                    "<tr><td><code>{}</code></td><td>{}</td></tr>",
                    escape(&entry.pattern),
                    entry.count
                )?;
            }
            writeln!(out, "</table>")?;
        }
        IndicatorReport::ShortestValues(report) => {
            writeln!(
                out,
                r#"<table class="table table-sm table-striped"><tr><th>Value</th><th>Length</th><th>Count</th></tr>"#
            )?;
            for entry in &report.entries {
                writeln!(
                    out,
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape(&entry.value.to_string()),
                    entry.length,
                    entry.count
                )?;
            }
            writeln!(out, "</table>")?;
        }
    }
    Ok(())
}

fn write_rule_summary(out: &mut String, analysis: &AttributeAnalysis) -> ReportResult<()> {
    let Some(results) = analysis.rule_results() else {
        return Ok(());
    };
    if analysis.business_rules().is_empty() {
        return Ok(());
    }

    writeln!(out, r#"<h2 class="mt-4">Business rules</h2>"#)?;
    writeln!(
        out,
        r#"<table class="table table-sm"><tr><th>Rule</th><th>Description</th><th>Valid</th><th>Invalid</th></tr>"#
    )?;
    for rule in analysis.business_rules() {
        let valid = bucket_count(results.valid(), rule.id());
        let invalid = bucket_count(results.invalid(), rule.id());
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{valid}</td><td>{invalid}</td></tr>",
            escape(rule.name()),
            escape(&rule.description()),
        )?;
    }
    writeln!(
        out,
        "<tr><th>Overall</th><th>All rules combined</th><th>{}</th><th>{}</th></tr>",
        results.valid().overall().count,
        results.invalid().overall().count
    )?;
    writeln!(out, "</table>")?;
    Ok(())
}

fn bucket_count(partition: &PartitionResults, rule_id: &str) -> u64 {
    partition.rule(rule_id).map_or(0, |bucket| bucket.count)
}

fn write_value_drilldowns(
    out: &mut String,
    analysis: &AttributeAnalysis,
    config: &ReportConfig,
) -> ReportResult<()> {
    let Some(results) = analysis.rule_results() else {
        return Ok(());
    };
    if analysis.business_rules().is_empty() {
        return Ok(());
    }

    write_drilldown(
        out,
        analysis,
        config,
        "Invalid values",
        results.invalid().overall(),
    )?;
    if config.include_valid_values {
        write_drilldown(
            out,
            analysis,
            config,
            "Valid values",
            results.valid().overall(),
        )?;
    }
    Ok(())
}

fn write_drilldown(
    out: &mut String,
    analysis: &AttributeAnalysis,
    config: &ReportConfig,
    title: &str,
    bucket: &RuleBucket,
) -> ReportResult<()> {
    writeln!(out, r#"<h2 class="mt-4">{title}</h2>"#)?;
    writeln!(
        out,
        r#"<p>{} distinct values, {} affected rows of {} rows in total.</p>"#,
        bucket.distinct_values(),
        bucket.count,
        analysis.table().num_rows()
    )?;

    for entry in &bucket.values {
        write_value_entry(out, analysis, config, entry)?;
    }
    Ok(())
}

fn write_value_entry(
    out: &mut String,
    analysis: &AttributeAnalysis,
    config: &ReportConfig,
    entry: &ValueEntry,
) -> ReportResult<()> {
    writeln!(
        out,
        r#"<div class="card my-2"><div class="card-header">Value: <b>{}</b></div><div class="card-body">"#,
        escape(&entry.value.to_string())
    )?;

    writeln!(
        out,
        r#"<table class="table table-sm"><tr><th>Business rule</th><th>Valid</th></tr>"#
    )?;
    for outcome in &entry.outcomes {
        let description = analysis
            .business_rules()
            .iter()
            .find(|rule| rule.id() == outcome.rule_id)
            .map(|rule| rule.description())
            .unwrap_or_else(|| outcome.rule_id.clone());
        let badge = if outcome.valid {
            r#"<span class="badge bg-success">YES</span>"#
        } else {
            r#"<span class="badge bg-danger">NO</span>"#
        };
        writeln!(
            out,
            "<tr><td>{}</td><td>{badge}</td></tr>",
            escape(&description)
        )?;
    }
    writeln!(out, "</table>")?;

    writeln!(out, "<h6>{} affected rows</h6>", entry.count)?;
    if config.max_listed_rows > 0 {
        let listed: Vec<String> = entry
            .rows
            .iter()
            .take(config.max_listed_rows)
            .map(|row| row.to_string())
            .collect();
        let suffix = if entry.rows.len() > config.max_listed_rows {
            ", …"
        } else {
            ""
        };
        writeln!(
            out,
            r#"<p class="text-muted">Row indexes: {}{suffix}</p>"#,
            listed.join(", ")
        )?;
    }
    writeln!(out, "</div></div>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AttributeAnalysis;
    use crate::indicators::{NullValuesIndicator, ValueRangeIndicator};
    use crate::rules::{NotNullRule, RegexPatternRule};
    use crate::source::DataTable;
    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    fn completed_analysis() -> AttributeAnalysis {
        let emails = StringArray::from(vec![
            Some("a@x.com"),
            Some("<bad&value>"),
            None,
            Some("a@x.com"),
        ]);
        let batch = RecordBatch::try_new(
            Arc::new(Schema::new(vec![Field::new("email", DataType::Utf8, true)])),
            vec![Arc::new(emails) as ArrayRef],
        )
        .unwrap();
        let table = Arc::new(DataTable::from_record_batch(&batch).unwrap());

        let mut analysis = AttributeAnalysis::new("email", table, false).unwrap();
        analysis.add_indicator(Box::new(NullValuesIndicator::new()));
        analysis.add_indicator(Box::new(ValueRangeIndicator::new()));
        analysis
            .add_business_rule(Box::new(NotNullRule::new()))
            .unwrap();
        analysis
            .add_business_rule(Box::new(RegexPatternRule::email(false)))
            .unwrap();
        analysis.run().unwrap();
        analysis
    }

    #[test]
    fn test_html_report_contains_sections() {
        let analysis = completed_analysis();
        let html = HtmlReportFormatter::new().format(&analysis).unwrap();

        assert!(html.contains("Attribute analysis: email"));
        assert!(html.contains("Missing values"));
        assert!(html.contains("Value range"));
        assert!(html.contains("Business rules"));
        assert!(html.contains("Invalid values"));
        assert!(html.contains("a@x.com"));
    }

    #[test]
    fn test_html_report_escapes_values() {
        let analysis = completed_analysis();
        let html = HtmlReportFormatter::new().format(&analysis).unwrap();

        assert!(html.contains("&lt;bad&amp;value&gt;"));
        assert!(!html.contains("<bad&value>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a&b"), "a&amp;b");
        assert_eq!(escape("<x>"), "&lt;x&gt;");
        assert_eq!(escape("plain"), "plain");
    }
}
