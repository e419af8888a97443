//! Regex pattern-matching rule and its built-in parameterizations.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{BusinessRule, RuleResult};
use crate::source::CellValue;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 /()-]{4,19}$").expect("valid phone pattern"));

static PERSON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}+(?:[-' ]\p{L}+)*$").expect("valid person-name pattern"));

static DATE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{4}-\d{2}-\d{2}|\d{2}\.\d{2}\.\d{4})$").expect("valid date pattern")
});

static COUNTRY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid country-code pattern"));

/// Rule that requires a value to match a regular expression.
///
/// Matching is anchored only as encoded in the pattern itself; a pattern
/// without `^`/`$` matches anywhere in the value. A missing value is
/// vacuously valid when `dropna` is set and invalid otherwise; this flag is
/// independent of the aggregator's own `dropna` setting.
///
/// The built-in constructors ([`email`](RegexPatternRule::email),
/// [`phone_number`](RegexPatternRule::phone_number), ...) are fixed-pattern
/// parameterizations of this rule with their own identifiers.
#[derive(Debug, Clone)]
pub struct RegexPatternRule {
    id: &'static str,
    name: &'static str,
    pattern: Regex,
    dropna: bool,
}

impl RegexPatternRule {
    /// Creates a rule for a caller-supplied pattern.
    ///
    /// Fails when the pattern is not a valid regular expression.
    pub fn new(pattern: &str, dropna: bool) -> RuleResult<Self> {
        Ok(Self {
            id: "RegExPatternMatchingRule",
            name: "Pattern match",
            pattern: Regex::new(pattern)?,
            dropna,
        })
    }

    /// Built-in rule for email addresses.
    pub fn email(dropna: bool) -> Self {
        Self::preset("EmailMatchingRule", "Email address", &EMAIL, dropna)
    }

    /// Built-in rule for phone numbers (optional leading `+`, digits with
    /// common separators).
    pub fn phone_number(dropna: bool) -> Self {
        Self::preset("PhoneNumberMatchingRule", "Phone number", &PHONE_NUMBER, dropna)
    }

    /// Built-in rule for person names (letters with `-`, `'` or space
    /// separators).
    pub fn person_name(dropna: bool) -> Self {
        Self::preset("PersonNameMatchingRule", "Person name", &PERSON_NAME, dropna)
    }

    /// Built-in rule for dates in `yyyy-mm-dd` or `dd.mm.yyyy` form.
    pub fn date_format(dropna: bool) -> Self {
        Self::preset("DateFormatMatchingRule", "Date format", &DATE_FORMAT, dropna)
    }

    /// Built-in rule for ISO 3166 alpha-2 country codes.
    pub fn country_code(dropna: bool) -> Self {
        Self::preset("CountryCodeMatchingRule", "Country code", &COUNTRY_CODE, dropna)
    }

    fn preset(id: &'static str, name: &'static str, pattern: &Lazy<Regex>, dropna: bool) -> Self {
        Self {
            id,
            name,
            pattern: (**pattern).clone(),
            dropna,
        }
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether a missing value is vacuously valid.
    pub fn dropna(&self) -> bool {
        self.dropna
    }
}

impl BusinessRule for RegexPatternRule {
    fn evaluate(&self, value: &CellValue) -> RuleResult<bool> {
        match value.as_text() {
            None => Ok(self.dropna),
            Some(text) => Ok(self.pattern.is_match(text)),
        }
    }

    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> String {
        format!("Value must match the pattern '{}'", self.pattern.as_str())
    }
}
