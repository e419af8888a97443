//! Business rules: per-value validity predicates.
//!
//! A business rule answers one question about one value (is it valid?) and
//! carries a human-readable description of what it checks. Rules are
//! registered on an [`AttributeAnalysis`](crate::analysis::AttributeAnalysis)
//! in order; the aggregator evaluates every rule against every distinct
//! value and partitions the results.
//!
//! ## Available rules
//!
//! - [`NotNullRule`]: the value must be present
//! - [`RegexPatternRule`]: the value must match a pattern; built-in
//!   parameterizations cover email addresses, phone numbers, person names,
//!   date formats and country codes
//! - [`DomainListRule`]: the value must be one of an enumerated list
//! - [`NoWhitespacePaddingRule`]: the value must carry no leading or
//!   trailing whitespace

use std::fmt::Debug;

use thiserror::Error;

use crate::source::CellValue;

mod domain_list;
mod not_null;
mod regex_pattern;
mod whitespace;

pub use domain_list::DomainListRule;
pub use not_null::NotNullRule;
pub use regex_pattern::RegexPatternRule;
pub use whitespace::NoWhitespacePaddingRule;

/// Result type for rule operations.
pub type RuleResult<T> = std::result::Result<T, RuleError>;

/// Errors that can occur while building or evaluating a business rule.
#[derive(Error, Debug)]
pub enum RuleError {
    /// The configured pattern is not a valid regular expression.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A rule predicate failed on a particular value.
    #[error("rule '{rule}' failed on value '{value}': {message}")]
    Evaluation {
        /// Identifier of the failing rule.
        rule: String,
        /// The value being evaluated.
        value: String,
        /// Failure detail.
        message: String,
    },
}

/// A per-value validity predicate with a human-readable description.
///
/// Implementations must be stateless: evaluating a value must not change the
/// outcome of any later evaluation. `evaluate` returns a `Result` so that a
/// failing predicate aborts the analysis instead of being silently counted.
pub trait BusinessRule: Debug + Send + Sync {
    /// Evaluates the rule against a single value.
    fn evaluate(&self, value: &CellValue) -> RuleResult<bool>;

    /// Stable identifier, used as the key in rule-result partitions.
    fn id(&self) -> &str;

    /// Display label.
    fn name(&self) -> &str;

    /// Human-readable description, parameterized by the rule's
    /// configuration.
    fn description(&self) -> String;
}
