//! Not-null rule.

use crate::rules::{BusinessRule, RuleResult};
use crate::source::CellValue;

/// Rule that requires a value to be present.
#[derive(Debug, Clone, Default)]
pub struct NotNullRule;

impl NotNullRule {
    /// Creates a new not-null rule.
    pub fn new() -> Self {
        Self
    }
}

impl BusinessRule for NotNullRule {
    fn evaluate(&self, value: &CellValue) -> RuleResult<bool> {
        Ok(!value.is_null())
    }

    fn id(&self) -> &str {
        "NotNullRule"
    }

    fn name(&self) -> &str {
        "Not NULL"
    }

    fn description(&self) -> String {
        "Value must be present".to_string()
    }
}
