//! The attribute analysis aggregator.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::analysis::results::{RuleOutcome, RuleResults, ValueEntry};
use crate::error::Result;
use crate::indicators::{Indicator, IndicatorReport};
use crate::rules::{BusinessRule, RuleError};
use crate::source::{DataTable, SourceError};

/// Errors raised by the aggregator lifecycle.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The analyzed attribute does not exist in the table.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// A completed analysis phase was run again.
    #[error("{0} has already run; the analysis is single-use")]
    AlreadyRun(&'static str),

    /// Two registered rules share the same identifier.
    #[error("duplicate business rule id '{0}'")]
    DuplicateRule(String),
}

/// One indicator together with its computed report.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorOutcome {
    /// Display label of the indicator.
    pub name: String,
    /// The typed report.
    pub report: IndicatorReport,
}

/// Completion state of the two analysis phases.
#[derive(Debug, Clone, Copy, Default)]
struct Phases {
    indicators_run: bool,
    rules_run: bool,
}

/// Analysis of a single attribute: descriptive indicators plus business-rule
/// evaluation over all of its distinct values.
///
/// The aggregator is single-use: construct it, register indicators and
/// rules, call [`run`](AttributeAnalysis::run) once, then read the results.
/// Re-running a completed phase is an error, and every accessor is
/// read-only, so a finished analysis can be handed to reporting code as-is.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, StringArray};
/// use arrow::datatypes::{DataType, Field, Schema};
/// use arrow::record_batch::RecordBatch;
/// use facet_guard::analysis::AttributeAnalysis;
/// use facet_guard::indicators::NullValuesIndicator;
/// use facet_guard::rules::NotNullRule;
/// use facet_guard::source::DataTable;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let emails = StringArray::from(vec![Some("a@x.com"), None]);
/// let batch = RecordBatch::try_new(
///     Arc::new(Schema::new(vec![Field::new("email", DataType::Utf8, true)])),
///     vec![Arc::new(emails) as ArrayRef],
/// )?;
/// let table = Arc::new(DataTable::from_record_batch(&batch)?);
///
/// let mut analysis = AttributeAnalysis::new("email", table, false)?;
/// analysis.add_indicator(Box::new(NullValuesIndicator::new()));
/// analysis.add_business_rule(Box::new(NotNullRule::new()))?;
/// analysis.run()?;
///
/// let results = analysis.rule_results().expect("rules have run");
/// assert_eq!(results.invalid().overall().count, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AttributeAnalysis {
    attribute_name: String,
    table: Arc<DataTable>,
    dropna: bool,
    indicators: Vec<Box<dyn Indicator>>,
    rules: Vec<Box<dyn BusinessRule>>,
    indicator_outcomes: Vec<IndicatorOutcome>,
    rule_results: Option<RuleResults>,
    phases: Phases,
}

impl AttributeAnalysis {
    /// Creates an analysis for one attribute of the given table.
    ///
    /// Fails immediately when the attribute does not exist, so configuration
    /// mistakes surface before any analysis runs.
    ///
    /// # Arguments
    ///
    /// * `attribute_name` - The column to analyze
    /// * `table` - The shared data table
    /// * `dropna` - Whether missing values are excluded from the
    ///   business-rules phase entirely
    pub fn new(
        attribute_name: impl Into<String>,
        table: Arc<DataTable>,
        dropna: bool,
    ) -> std::result::Result<Self, AnalysisError> {
        let attribute_name = attribute_name.into();
        if table.column(&attribute_name).is_err() {
            return Err(AnalysisError::UnknownAttribute(attribute_name));
        }
        Ok(Self {
            attribute_name,
            table,
            dropna,
            indicators: Vec::new(),
            rules: Vec::new(),
            indicator_outcomes: Vec::new(),
            rule_results: None,
            phases: Phases::default(),
        })
    }

    /// Registers an indicator; indicators run in registration order.
    pub fn add_indicator(&mut self, indicator: Box<dyn Indicator>) {
        self.indicators.push(indicator);
    }

    /// Registers a business rule; rules run in registration order.
    ///
    /// Rule identifiers key the result partitions, so a duplicate id is
    /// rejected rather than silently merging two rules' counts.
    pub fn add_business_rule(
        &mut self,
        rule: Box<dyn BusinessRule>,
    ) -> std::result::Result<(), AnalysisError> {
        if self.rules.iter().any(|existing| existing.id() == rule.id()) {
            return Err(AnalysisError::DuplicateRule(rule.id().to_string()));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Runs the full analysis: indicators first, then business rules.
    #[instrument(skip(self), fields(attribute = %self.attribute_name))]
    pub fn run(&mut self) -> Result<()> {
        self.run_indicator_analysis()?;
        self.run_business_rules_analysis()?;
        info!(
            indicators = self.indicator_outcomes.len(),
            rules = self.rules.len(),
            "attribute analysis complete"
        );
        Ok(())
    }

    /// Computes every registered indicator in registration order.
    ///
    /// Fail-fast: the first indicator error aborts the phase and leaves no
    /// partial outcome list behind.
    #[instrument(skip(self), fields(attribute = %self.attribute_name))]
    pub fn run_indicator_analysis(&mut self) -> Result<()> {
        if self.phases.indicators_run {
            return Err(AnalysisError::AlreadyRun("indicator analysis").into());
        }
        let column = self.column()?;

        let mut outcomes = Vec::with_capacity(self.indicators.len());
        for indicator in &self.indicators {
            debug!(indicator = indicator.name(), "running indicator");
            let report = indicator.analyze(&column)?;
            outcomes.push(IndicatorOutcome {
                name: indicator.name().to_string(),
                report,
            });
        }

        self.indicator_outcomes = outcomes;
        self.phases.indicators_run = true;
        Ok(())
    }

    /// Evaluates every registered rule against every distinct value.
    ///
    /// One pass builds the value histogram (nulls included); each distinct
    /// value is then visited exactly once: dropped when `dropna` is set and
    /// the value is missing, otherwise evaluated against all rules with its
    /// occurrence count accumulated into the matching partitions. Counts are
    /// sums of occurrence counts, never visit counts.
    #[instrument(skip(self), fields(attribute = %self.attribute_name))]
    pub fn run_business_rules_analysis(&mut self) -> Result<()> {
        if self.phases.rules_run {
            return Err(AnalysisError::AlreadyRun("business rules analysis").into());
        }
        let column = self.column()?;
        let histogram = column.histogram(false);

        let rule_ids: Vec<String> = self.rules.iter().map(|r| r.id().to_string()).collect();
        let mut results = RuleResults::new(&rule_ids);

        for (value, count) in histogram.iter() {
            if self.dropna && value.is_null() {
                continue;
            }

            let mut outcomes = Vec::with_capacity(self.rules.len());
            for rule in &self.rules {
                let valid = rule
                    .evaluate(value)
                    .map_err(|err| evaluation_error(rule.as_ref(), value, err))?;
                outcomes.push(RuleOutcome {
                    rule_id: rule.id().to_string(),
                    valid,
                });
            }

            results.record(&ValueEntry {
                value: value.clone(),
                outcomes,
                count: *count,
                rows: column.rows_equal(value),
            });
        }

        self.rule_results = Some(results);
        self.phases.rules_run = true;
        Ok(())
    }

    fn column(&self) -> std::result::Result<crate::source::ColumnView<'_>, SourceError> {
        self.table.column(&self.attribute_name)
    }

    /// The analyzed attribute's name.
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Whether missing values are excluded from the business-rules phase.
    pub fn dropna(&self) -> bool {
        self.dropna
    }

    /// The underlying table, for back-reference drill-down.
    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// True once both phases have run.
    pub fn is_complete(&self) -> bool {
        self.phases.indicators_run && self.phases.rules_run
    }

    /// The registered business rules, in registration order.
    pub fn business_rules(&self) -> &[Box<dyn BusinessRule>] {
        &self.rules
    }

    /// Indicator outcomes in registration order; empty until the indicator
    /// phase has run.
    pub fn indicator_outcomes(&self) -> &[IndicatorOutcome] {
        &self.indicator_outcomes
    }

    /// Business-rule results; `None` until the rules phase has run.
    pub fn rule_results(&self) -> Option<&RuleResults> {
        self.rule_results.as_ref()
    }
}

fn evaluation_error(
    rule: &dyn BusinessRule,
    value: &crate::source::CellValue,
    err: RuleError,
) -> RuleError {
    RuleError::Evaluation {
        rule: rule.id().to_string(),
        value: value.to_string(),
        message: err.to_string(),
    }
}
