//! Attribute analysis: orchestration of indicators and business rules.
//!
//! [`AttributeAnalysis`] is the aggregation core of the crate. It owns the
//! configured indicators and rules for one attribute, runs them against a
//! shared [`DataTable`](crate::source::DataTable), and exposes the combined
//! read-only results consumed by the report renderers.

mod attribute;
mod results;

pub use attribute::{AnalysisError, AttributeAnalysis, IndicatorOutcome};
pub use results::{PartitionResults, RuleBucket, RuleOutcome, RuleResults, Validity, ValueEntry};
