//! Email validator

use std::sync::LazyLock;

use regex::Regex;

use crate::{ValidationError, ValidationResult, Validator};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email regex must compile")
});

/// Email address validator.
///
/// # Examples
///
/// ```
/// use fieldset_validators::EmailValidator;
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("user@example.com").is_ok());
/// assert!(validator.validate("not-an-email").is_err());
/// ```
pub struct EmailValidator {
    message: Option<String>,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Sets a custom error message used verbatim on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn validate(&self, value: &str) -> ValidationResult<()> {
        if EMAIL_REGEX.is_match(value) {
            Ok(())
        } else {
            match &self.message {
                Some(message) => Err(ValidationError::Custom(message.clone())),
                None => Err(ValidationError::InvalidEmail(value.to_string())),
            }
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<str> for EmailValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        self.validate(value)
    }
}

impl Validator<String> for EmailValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        self.validate(value.as_str())
    }
}
