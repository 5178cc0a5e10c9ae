//! URL validator

use std::sync::LazyLock;

use regex::Regex;

use crate::{ValidationError, ValidationResult, Validator};

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9]([A-Za-z0-9.-]*[A-Za-z0-9])?(:\d+)?(/[^\s]*)?$")
        .expect("url regex must compile")
});

/// HTTP/HTTPS URL validator.
///
/// # Examples
///
/// ```
/// use fieldset_validators::UrlValidator;
///
/// let validator = UrlValidator::new();
/// assert!(validator.validate("https://example.com/path").is_ok());
/// assert!(validator.validate("example.com").is_err());
/// ```
pub struct UrlValidator {
    message: Option<String>,
}

impl UrlValidator {
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Sets a custom error message used verbatim on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn validate(&self, value: &str) -> ValidationResult<()> {
        if URL_REGEX.is_match(value) {
            Ok(())
        } else {
            match &self.message {
                Some(message) => Err(ValidationError::Custom(message.clone())),
                None => Err(ValidationError::InvalidUrl(value.to_string())),
            }
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<str> for UrlValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        self.validate(value)
    }
}

impl Validator<String> for UrlValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        self.validate(value.as_str())
    }
}
