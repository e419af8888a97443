//! Crate-level error type for facet-guard.

use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::config::ConfigError;
use crate::indicators::IndicatorError;
use crate::report::ReportError;
use crate::rules::RuleError;
use crate::source::SourceError;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, FacetError>;

/// Errors that can occur while profiling an attribute.
///
/// Subsystems define their own error enums; this type aggregates them at the
/// crate boundary so callers can handle everything behind a single `Result`.
#[derive(Error, Debug)]
pub enum FacetError {
    /// Invalid or unrecognized configuration, raised before any analysis runs.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data source construction or lookup failure.
    #[error("data source error: {0}")]
    Source(#[from] SourceError),

    /// An indicator computation failed.
    #[error("indicator analysis failed: {0}")]
    Indicator(#[from] IndicatorError),

    /// A business rule predicate failed to evaluate.
    #[error("business rule evaluation failed: {0}")]
    Rule(#[from] RuleError),

    /// Aggregator lifecycle or orchestration failure.
    #[error("attribute analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Report rendering failure.
    #[error("report rendering failed: {0}")]
    Report(#[from] ReportError),

    /// Arrow computation error.
    #[error("Arrow computation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// I/O error while reading input or writing reports.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error with a custom message.
    #[error("{0}")]
    Internal(String),
}

impl FacetError {
    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
