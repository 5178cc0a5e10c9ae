//! String validators

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::{ValidationError, ValidationResult, Validator};

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug regex must compile"));

/// Named shorthands accepted by [`RegexValidator::new`] as `<<name>>`.
static ALIAS_PATTERNS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("email", r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$"),
        ("url", r"^https?://[^\s/$.?#][^\s]*$"),
        ("float", r"^-?\d+(\.\d+)?$"),
        ("int", r"^-?\d+$"),
        ("digits", r"^\d+$"),
        ("alpha", r"^[A-Za-z]+$"),
        ("alphanumeric", r"^[A-Za-z0-9]+$"),
        ("slug", r"^[-a-zA-Z0-9_]+$"),
        (
            "uuid",
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        ),
        ("date", r"^\d{4}-\d{2}-\d{2}$"),
    ])
});

/// Minimum length validator.
///
/// Lengths are measured in characters, not bytes, so multibyte input is
/// counted the way a user perceives it.
pub struct MinLengthValidator {
    min: usize,
    message: Option<String>,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator with the specified minimum length.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldset_validators::MinLengthValidator;
    ///
    /// let validator = MinLengthValidator::new(5);
    /// assert!(validator.validate("hello").is_ok());
    /// assert!(validator.validate("hi").is_err());
    /// ```
    pub fn new(min: usize) -> Self {
        Self { min, message: None }
    }

    /// Sets a custom error message used verbatim on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Validates that the value is at least the minimum length.
    pub fn validate(&self, value: &str) -> ValidationResult<()> {
        let length = value.chars().count();
        if length >= self.min {
            return Ok(());
        }
        match &self.message {
            Some(message) => Err(ValidationError::Custom(message.clone())),
            None => Err(ValidationError::TooShort {
                length,
                min: self.min,
            }),
        }
    }
}

impl Validator<str> for MinLengthValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        self.validate(value)
    }
}

impl Validator<String> for MinLengthValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        self.validate(value.as_str())
    }
}

/// Maximum length validator.
pub struct MaxLengthValidator {
    max: usize,
    message: Option<String>,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator with the specified maximum length.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldset_validators::MaxLengthValidator;
    ///
    /// let validator = MaxLengthValidator::new(10);
    /// assert!(validator.validate("hello").is_ok());
    /// assert!(validator.validate("hello world!").is_err());
    /// ```
    pub fn new(max: usize) -> Self {
        Self { max, message: None }
    }

    /// Sets a custom error message used verbatim on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Validates that the value does not exceed the maximum length.
    pub fn validate(&self, value: &str) -> ValidationResult<()> {
        let length = value.chars().count();
        if length <= self.max {
            return Ok(());
        }
        match &self.message {
            Some(message) => Err(ValidationError::Custom(message.clone())),
            None => Err(ValidationError::TooLong {
                length,
                max: self.max,
            }),
        }
    }
}

impl Validator<str> for MaxLengthValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        self.validate(value)
    }
}

impl Validator<String> for MaxLengthValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        self.validate(value.as_str())
    }
}

/// Length window validator combining a minimum and a maximum.
///
/// # Examples
///
/// ```
/// use fieldset_validators::LengthValidator;
///
/// let validator = LengthValidator::new(2, 5);
/// assert!(validator.validate("abc").is_ok());
/// assert!(validator.validate("a").is_err());
/// assert!(validator.validate("abcdef").is_err());
/// ```
pub struct LengthValidator {
    min: usize,
    max: usize,
    message: Option<String>,
}

impl LengthValidator {
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max,
            message: None,
        }
    }

    /// Sets a custom error message used verbatim on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn validate(&self, value: &str) -> ValidationResult<()> {
        let length = value.chars().count();
        if length < self.min {
            return match &self.message {
                Some(message) => Err(ValidationError::Custom(message.clone())),
                None => Err(ValidationError::TooShort {
                    length,
                    min: self.min,
                }),
            };
        }
        if length > self.max {
            return match &self.message {
                Some(message) => Err(ValidationError::Custom(message.clone())),
                None => Err(ValidationError::TooLong {
                    length,
                    max: self.max,
                }),
            };
        }
        Ok(())
    }
}

impl Validator<str> for LengthValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        self.validate(value)
    }
}

impl Validator<String> for LengthValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        self.validate(value.as_str())
    }
}

/// Regex validator with named-pattern shorthands.
///
/// Pattern strings of the form `<<name>>` resolve against a built-in table
/// (`email`, `url`, `float`, `int`, `digits`, `alpha`, `alphanumeric`,
/// `slug`, `uuid`, `date`); anything else is compiled as a raw pattern.
pub struct RegexValidator {
    pattern: Regex,
    allow_empty: bool,
    message: Option<String>,
}

impl RegexValidator {
    /// Creates a new RegexValidator from a pattern or a `<<name>>` shorthand.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldset_validators::RegexValidator;
    ///
    /// let validator = RegexValidator::new("<<float>>").unwrap();
    /// assert!(validator.validate("0.01").is_ok());
    /// assert!(validator.validate("email").is_err());
    ///
    /// let validator = RegexValidator::new(r"^\d{3}-\d{4}$").unwrap();
    /// assert!(validator.validate("123-4567").is_ok());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or the shorthand is unknown.
    pub fn new(pattern: &str) -> Result<Self, ValidationError> {
        let source = match pattern
            .strip_prefix("<<")
            .and_then(|rest| rest.strip_suffix(">>"))
        {
            Some(alias) => *ALIAS_PATTERNS.get(alias).ok_or_else(|| {
                ValidationError::Custom(format!("unknown pattern alias: {}", alias))
            })?,
            None => pattern,
        };
        let pattern = Regex::new(source)
            .map_err(|e| ValidationError::Custom(format!("invalid regex pattern: {}", e)))?;
        Ok(Self {
            pattern,
            allow_empty: false,
            message: None,
        })
    }

    /// Accepts empty values without matching them against the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldset_validators::RegexValidator;
    ///
    /// let validator = RegexValidator::new("<<digits>>").unwrap().allow_empty(true);
    /// assert!(validator.validate("").is_ok());
    /// assert!(validator.validate("123").is_ok());
    /// assert!(validator.validate("abc").is_err());
    /// ```
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Sets a custom error message used verbatim on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Validates a string against the pattern.
    pub fn validate(&self, value: &str) -> ValidationResult<()> {
        if value.is_empty() {
            if self.allow_empty {
                return Ok(());
            }
            return Err(self.mismatch());
        }
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    fn mismatch(&self) -> ValidationError {
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("value must match pattern: {}", self.pattern.as_str()));
        ValidationError::PatternMismatch(message)
    }
}

impl Validator<str> for RegexValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        self.validate(value)
    }
}

impl Validator<String> for RegexValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        self.validate(value.as_str())
    }
}

/// Slug validator (letters, numbers, hyphens, and underscores).
pub struct SlugValidator {
    message: Option<String>,
}

impl SlugValidator {
    /// Creates a new SlugValidator.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldset_validators::SlugValidator;
    ///
    /// let validator = SlugValidator::new();
    /// assert!(validator.validate("my-page_2").is_ok());
    /// assert!(validator.validate("not a slug").is_err());
    /// ```
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Sets a custom error message used verbatim on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn validate(&self, value: &str) -> ValidationResult<()> {
        if SLUG_REGEX.is_match(value) {
            Ok(())
        } else {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} is not a valid slug", value));
            Err(ValidationError::PatternMismatch(message))
        }
    }
}

impl Default for SlugValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<str> for SlugValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        self.validate(value)
    }
}

impl Validator<String> for SlugValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        self.validate(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length_counts_characters() {
        let validator = MinLengthValidator::new(3);
        assert!(validator.validate("日本語").is_ok());
        assert!(validator.validate("日本").is_err());
    }

    #[test]
    fn test_min_length_error_quantities() {
        let validator = MinLengthValidator::new(5);
        match validator.validate("ab") {
            Err(ValidationError::TooShort { length, min }) => {
                assert_eq!(length, 2);
                assert_eq!(min, 5);
            }
            _ => panic!("Expected TooShort error"),
        }
    }

    #[test]
    fn test_max_length_counts_characters() {
        let validator = MaxLengthValidator::new(3);
        assert!(validator.validate("日本語").is_ok());
        assert!(validator.validate("日本語!").is_err());
    }

    #[test]
    fn test_length_validator_window() {
        let validator = LengthValidator::new(2, 4);
        assert!(validator.validate("ab").is_ok());
        assert!(validator.validate("abcd").is_ok());
        assert!(validator.validate("a").is_err());
        assert!(validator.validate("abcde").is_err());
    }

    #[test]
    fn test_length_validator_custom_message() {
        let validator = LengthValidator::new(2, 4).with_message("keep it short");
        match validator.validate("abcde") {
            Err(ValidationError::Custom(msg)) => assert_eq!(msg, "keep it short"),
            _ => panic!("Expected Custom error"),
        }
    }

    #[test]
    fn test_regex_alias_email() {
        let validator = RegexValidator::new("<<email>>").unwrap();
        assert!(validator.validate("user@example.com").is_ok());
        assert!(validator.validate("email").is_err());
    }

    #[test]
    fn test_regex_alias_float() {
        let validator = RegexValidator::new("<<float>>").unwrap();
        assert!(validator.validate("0.01").is_ok());
        assert!(validator.validate("-12.5").is_ok());
        assert!(validator.validate("42").is_ok());
        assert!(validator.validate("4.2.1").is_err());
    }

    #[test]
    fn test_regex_alias_unknown() {
        let result = RegexValidator::new("<<bogus>>");
        match result {
            Err(ValidationError::Custom(msg)) => {
                assert!(msg.contains("unknown pattern alias"));
            }
            _ => panic!("Expected Custom error for unknown alias"),
        }
    }

    #[test]
    fn test_regex_raw_pattern() {
        let validator = RegexValidator::new(r"^[a-z]+$").unwrap();
        assert!(validator.validate("abc").is_ok());
        assert!(validator.validate("ABC").is_err());
    }

    #[test]
    fn test_regex_invalid_pattern() {
        assert!(RegexValidator::new(r"[unclosed").is_err());
    }

    #[test]
    fn test_regex_empty_value() {
        let strict = RegexValidator::new("<<digits>>").unwrap();
        assert!(strict.validate("").is_err());

        let relaxed = RegexValidator::new("<<digits>>").unwrap().allow_empty(true);
        assert!(relaxed.validate("").is_ok());
    }

    #[test]
    fn test_regex_custom_message() {
        let validator = RegexValidator::new("<<digits>>")
            .unwrap()
            .with_message("digits only");
        match validator.validate("abc") {
            Err(ValidationError::PatternMismatch(msg)) => assert_eq!(msg, "digits only"),
            _ => panic!("Expected PatternMismatch error"),
        }
    }

    #[test]
    fn test_slug_validator() {
        let validator = SlugValidator::new();
        assert!(validator.validate("valid-slug_123").is_ok());
        assert!(validator.validate("UPPER-ok-too").is_ok());
        assert!(validator.validate("no spaces").is_err());
        assert!(validator.validate("").is_err());
    }

    #[test]
    fn test_uuid_and_date_aliases() {
        let uuid = RegexValidator::new("<<uuid>>").unwrap();
        assert!(uuid.validate("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(uuid.validate("not-a-uuid").is_err());

        let date = RegexValidator::new("<<date>>").unwrap();
        assert!(date.validate("2024-01-31").is_ok());
        assert!(date.validate("31/01/2024").is_err());
    }
}
