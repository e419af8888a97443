//! Whitespace-padding rule.

use crate::rules::{BusinessRule, RuleResult};
use crate::source::CellValue;

/// Rule that rejects values with leading or trailing whitespace.
///
/// Padded values usually survive copy-paste imports and break equality
/// joins downstream. A missing value is vacuously valid when `dropna` is set
/// and invalid otherwise.
#[derive(Debug, Clone, Default)]
pub struct NoWhitespacePaddingRule {
    dropna: bool,
}

impl NoWhitespacePaddingRule {
    /// Creates a new whitespace-padding rule.
    pub fn new(dropna: bool) -> Self {
        Self { dropna }
    }

    /// Whether a missing value is vacuously valid.
    pub fn dropna(&self) -> bool {
        self.dropna
    }
}

impl BusinessRule for NoWhitespacePaddingRule {
    fn evaluate(&self, value: &CellValue) -> RuleResult<bool> {
        match value.as_text() {
            None => Ok(self.dropna),
            Some(text) => Ok(text.trim() == text),
        }
    }

    fn id(&self) -> &str {
        "NoWhitespacePaddingRule"
    }

    fn name(&self) -> &str {
        "No whitespace padding"
    }

    fn description(&self) -> String {
        "Value must not start or end with whitespace".to_string()
    }
}
