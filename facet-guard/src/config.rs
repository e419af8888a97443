//! JSON-driven configuration of attribute analyses.
//!
//! Configuration maps one-to-one onto the analysis model: an
//! [`AttributeAnalysisSpec`] names the attribute and lists the indicators
//! and business rules to register, each as a tagged
//! `{*_name, *_config}` pair. The enums are exhaustive, so an unrecognized
//! name fails deserialization instead of being discovered mid-analysis.
//!
//! # Example
//!
//! ```rust
//! use facet_guard::config::AttributeAnalysisSpec;
//!
//! let spec = AttributeAnalysisSpec::from_json(r#"{
//!     "attribute_name": "email",
//!     "dropna": false,
//!     "indicators": [
//!         {"indicator_name": "NullValuesIndicator", "indicator_config": {}},
//!         {"indicator_name": "SimilarValuesIndicator", "indicator_config": {"min_ratio": 0.85}}
//!     ],
//!     "business_rules": [
//!         {"business_rule_name": "NotNullRule", "business_rule_config": {}},
//!         {"business_rule_name": "EmailMatchingRule", "business_rule_config": {"dropna": false}}
//!     ]
//! }"#).unwrap();
//! assert_eq!(spec.attribute_name, "email");
//! ```

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::analysis::{AnalysisError, AttributeAnalysis};
use crate::indicators::{
    DistinctValuesIndicator, Indicator, NullValuesIndicator, PatternFrequencyIndicator,
    ShortestValuesIndicator, SimilarValuesIndicator, ValueRangeIndicator,
};
use crate::rules::{
    BusinessRule, DomainListRule, NoWhitespacePaddingRule, NotNullRule, RegexPatternRule,
    RuleError,
};
use crate::source::DataTable;

/// Errors raised while parsing or instantiating configuration.
///
/// All of these surface before any analysis runs.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document could not be parsed (syntax error,
    /// unknown indicator/rule name, missing required field).
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// `min_ratio` outside the valid range.
    #[error("invalid min_ratio {0}; expected a value in [0, 1]")]
    InvalidMinRatio(f64),

    /// A business rule could not be constructed (e.g. invalid pattern).
    #[error("invalid business rule: {0}")]
    Rule(#[from] RuleError),

    /// The analysis itself rejected the configuration (unknown attribute,
    /// duplicate rule id).
    #[error("{0}")]
    Analysis(#[from] AnalysisError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

fn default_min_ratio() -> f64 {
    crate::indicators::DEFAULT_MIN_RATIO
}

fn default_number_of_values() -> usize {
    crate::indicators::DEFAULT_NUMBER_OF_VALUES
}

fn default_true() -> bool {
    true
}

/// Configuration of one indicator.
///
/// `indicator_config` is required; pass `{}` for indicators without
/// parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "indicator_name", content = "indicator_config")]
pub enum IndicatorSpec {
    /// Similar-value clustering with a similarity threshold.
    SimilarValuesIndicator {
        /// Minimum pairwise similarity ratio, in `[0, 1]`.
        #[serde(default = "default_min_ratio")]
        min_ratio: f64,
    },
    /// Missing-value statistics.
    NullValuesIndicator {},
    /// Distinct/unique/duplicate statistics.
    DistinctValuesIndicator {},
    /// Value histogram.
    ValueRangeIndicator {},
    /// Shape-pattern histogram.
    PatternFrequencyIndicator {},
    /// Shortest values.
    ShortestValuesIndicator {
        /// Maximum number of reported values.
        #[serde(default = "default_number_of_values")]
        number_of_values: usize,
        /// Whether to exclude missing values.
        #[serde(default = "default_true")]
        dropna: bool,
    },
}

impl IndicatorSpec {
    /// Instantiates the configured indicator.
    pub fn build(&self) -> ConfigResult<Box<dyn Indicator>> {
        match self {
            IndicatorSpec::SimilarValuesIndicator { min_ratio } => {
                if !(0.0..=1.0).contains(min_ratio) {
                    return Err(ConfigError::InvalidMinRatio(*min_ratio));
                }
                Ok(Box::new(SimilarValuesIndicator::new(*min_ratio)))
            }
            IndicatorSpec::NullValuesIndicator {} => Ok(Box::new(NullValuesIndicator::new())),
            IndicatorSpec::DistinctValuesIndicator {} => {
                Ok(Box::new(DistinctValuesIndicator::new()))
            }
            IndicatorSpec::ValueRangeIndicator {} => Ok(Box::new(ValueRangeIndicator::new())),
            IndicatorSpec::PatternFrequencyIndicator {} => {
                Ok(Box::new(PatternFrequencyIndicator::new()))
            }
            IndicatorSpec::ShortestValuesIndicator {
                number_of_values,
                dropna,
            } => Ok(Box::new(ShortestValuesIndicator::new(
                *number_of_values,
                *dropna,
            ))),
        }
    }
}

/// Configuration of one business rule.
///
/// `business_rule_config` is required; pass `{}` for rules without
/// parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "business_rule_name", content = "business_rule_config")]
pub enum BusinessRuleSpec {
    /// The value must be present.
    NotNullRule {},
    /// The value must match a caller-supplied pattern.
    RegExPatternMatchingRule {
        /// The regular expression to match.
        pattern: String,
        /// Whether a missing value is vacuously valid.
        #[serde(default)]
        dropna: bool,
    },
    /// The value must be a member of an enumerated domain.
    DomainListMatchingRule {
        /// The allowed values.
        values: Vec<String>,
        /// Whether a missing value is vacuously valid.
        #[serde(default)]
        dropna: bool,
    },
    /// The value must carry no leading or trailing whitespace.
    NoWhitespacePaddingRule {
        /// Whether a missing value is vacuously valid.
        #[serde(default)]
        dropna: bool,
    },
    /// The value must be an email address.
    EmailMatchingRule {
        /// Whether a missing value is vacuously valid.
        #[serde(default)]
        dropna: bool,
    },
    /// The value must be a phone number.
    PhoneNumberMatchingRule {
        /// Whether a missing value is vacuously valid.
        #[serde(default)]
        dropna: bool,
    },
    /// The value must be a person name.
    PersonNameMatchingRule {
        /// Whether a missing value is vacuously valid.
        #[serde(default)]
        dropna: bool,
    },
    /// The value must be a date in a supported format.
    DateFormatMatchingRule {
        /// Whether a missing value is vacuously valid.
        #[serde(default)]
        dropna: bool,
    },
    /// The value must be an ISO 3166 alpha-2 country code.
    CountryCodeMatchingRule {
        /// Whether a missing value is vacuously valid.
        #[serde(default)]
        dropna: bool,
    },
}

impl BusinessRuleSpec {
    /// Instantiates the configured rule.
    pub fn build(&self) -> ConfigResult<Box<dyn BusinessRule>> {
        match self {
            BusinessRuleSpec::NotNullRule {} => Ok(Box::new(NotNullRule::new())),
            BusinessRuleSpec::RegExPatternMatchingRule { pattern, dropna } => {
                Ok(Box::new(RegexPatternRule::new(pattern, *dropna)?))
            }
            BusinessRuleSpec::DomainListMatchingRule { values, dropna } => {
                Ok(Box::new(DomainListRule::new(values.clone(), *dropna)))
            }
            BusinessRuleSpec::NoWhitespacePaddingRule { dropna } => {
                Ok(Box::new(NoWhitespacePaddingRule::new(*dropna)))
            }
            BusinessRuleSpec::EmailMatchingRule { dropna } => {
                Ok(Box::new(RegexPatternRule::email(*dropna)))
            }
            BusinessRuleSpec::PhoneNumberMatchingRule { dropna } => {
                Ok(Box::new(RegexPatternRule::phone_number(*dropna)))
            }
            BusinessRuleSpec::PersonNameMatchingRule { dropna } => {
                Ok(Box::new(RegexPatternRule::person_name(*dropna)))
            }
            BusinessRuleSpec::DateFormatMatchingRule { dropna } => {
                Ok(Box::new(RegexPatternRule::date_format(*dropna)))
            }
            BusinessRuleSpec::CountryCodeMatchingRule { dropna } => {
                Ok(Box::new(RegexPatternRule::country_code(*dropna)))
            }
        }
    }
}

/// Configuration of one attribute analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeAnalysisSpec {
    /// The column to analyze.
    pub attribute_name: String,
    /// Whether missing values are excluded from the business-rules phase.
    pub dropna: bool,
    /// Indicators to run, in order.
    #[serde(default)]
    pub indicators: Vec<IndicatorSpec>,
    /// Business rules to evaluate, in order.
    #[serde(default)]
    pub business_rules: Vec<BusinessRuleSpec>,
}

impl AttributeAnalysisSpec {
    /// Parses a single attribute configuration from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses one or many attribute configurations from JSON: either a
    /// single object or an array of objects.
    pub fn many_from_json(json: &str) -> ConfigResult<Vec<Self>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(vec![serde_json::from_value(value)?])
        }
    }

    /// Builds a ready-to-run analysis against the given table.
    ///
    /// All configuration errors (unknown attribute, invalid thresholds or
    /// patterns, duplicate rule ids) surface here, before anything runs.
    pub fn build(&self, table: Arc<DataTable>) -> ConfigResult<AttributeAnalysis> {
        let mut analysis = AttributeAnalysis::new(&self.attribute_name, table, self.dropna)?;
        for indicator in &self.indicators {
            analysis.add_indicator(indicator.build()?);
        }
        for rule in &self.business_rules {
            analysis.add_business_rule(rule.build()?)?;
        }
        Ok(analysis)
    }
}
