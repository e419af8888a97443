//! Domain-list membership rule.

use crate::rules::{BusinessRule, RuleResult};
use crate::source::CellValue;

/// Rule that requires a value to be a member of an enumerated domain.
///
/// Membership is case-sensitive exact equality. A missing value is vacuously
/// valid when `dropna` is set and invalid otherwise.
#[derive(Debug, Clone)]
pub struct DomainListRule {
    values: Vec<String>,
    dropna: bool,
}

impl DomainListRule {
    /// Creates a rule over the given domain.
    pub fn new(values: Vec<String>, dropna: bool) -> Self {
        Self { values, dropna }
    }

    /// The enumerated domain.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether a missing value is vacuously valid.
    pub fn dropna(&self) -> bool {
        self.dropna
    }
}

impl BusinessRule for DomainListRule {
    fn evaluate(&self, value: &CellValue) -> RuleResult<bool> {
        match value.as_text() {
            None => Ok(self.dropna),
            Some(text) => Ok(self.values.iter().any(|member| member == text)),
        }
    }

    fn id(&self) -> &str {
        "DomainListMatchingRule"
    }

    fn name(&self) -> &str {
        "Domain membership"
    }

    fn description(&self) -> String {
        format!("Value must be one of: {}", self.values.join(", "))
    }
}
