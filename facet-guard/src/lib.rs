//! # Facet - Attribute Profiling for Tabular Data
//!
//! Facet profiles a tabular dataset one column ("attribute") at a time. For
//! each attribute it computes descriptive indicators (null rates,
//! distinct/duplicate counts, similar-value clusters, value-pattern
//! frequencies, shortest values) and evaluates configurable business rules
//! (null, regex, domain membership, whitespace validity) against every
//! distinct value, keeping back-references to the original rows for
//! drill-down reporting.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use facet_guard::config::AttributeAnalysisSpec;
//! use facet_guard::source::DataTable;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Any Arrow record batch works; CSV loading via `CsvSource` produces the
//! // same kind of table.
//! let emails = StringArray::from(vec![Some("a@x.com"), Some("bad"), None, Some("a@x.com")]);
//! let batch = RecordBatch::try_new(
//!     Arc::new(Schema::new(vec![Field::new("email", DataType::Utf8, true)])),
//!     vec![Arc::new(emails) as ArrayRef],
//! )?;
//! let table = Arc::new(DataTable::from_record_batch(&batch)?);
//!
//! // Analyses are wired from JSON configuration.
//! let spec = AttributeAnalysisSpec::from_json(r#"{
//!     "attribute_name": "email",
//!     "dropna": false,
//!     "indicators": [
//!         {"indicator_name": "NullValuesIndicator", "indicator_config": {}}
//!     ],
//!     "business_rules": [
//!         {"business_rule_name": "NotNullRule", "business_rule_config": {}},
//!         {"business_rule_name": "EmailMatchingRule", "business_rule_config": {"dropna": false}}
//!     ]
//! }"#)?;
//!
//! let mut analysis = spec.build(table)?;
//! analysis.run()?;
//!
//! let results = analysis.rule_results().expect("analysis is complete");
//! assert_eq!(results.valid().overall().count, 2);   // "a@x.com" twice
//! assert_eq!(results.invalid().overall().count, 2); // "bad" and the null
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`classify`**: pure per-value functions (null test, character-shape
//!   pattern, similarity ratio)
//! - **`source`**: the in-memory table ([`source::DataTable`]) over Arrow,
//!   with column views and value histograms
//! - **`indicators`**: descriptive statistics per attribute
//! - **`rules`**: per-value validity predicates with descriptions
//! - **`analysis`**: the aggregator orchestrating indicators and rules into
//!   the nested valid/invalid result structure
//! - **`config`**: JSON-driven wiring of analyses
//! - **`report`**: JSON and static HTML rendering of completed analyses
//!
//! The whole pipeline is synchronous and single-threaded; analyses of
//! different attributes are independent, so callers may run one analysis per
//! worker if they need parallelism across attributes.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod rules;
pub mod source;
