//! Prelude for commonly used types and traits in facet-guard.

pub use crate::analysis::{AttributeAnalysis, RuleResults, Validity};
pub use crate::config::AttributeAnalysisSpec;
pub use crate::error::{FacetError, Result};
pub use crate::indicators::{Indicator, IndicatorReport};
pub use crate::logging::LogConfig;
pub use crate::report::{HtmlReportFormatter, JsonReportFormatter, ReportConfig, ReportFormatter};
pub use crate::rules::BusinessRule;
pub use crate::source::{CellValue, CsvSource, DataTable};
