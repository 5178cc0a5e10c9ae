//! Password strength validator

use crate::{ValidationError, ValidationResult, Validator};

/// Password strength validator.
///
/// Requires at least one uppercase letter, one lowercase letter and one
/// digit. Whitespace is rejected and length must fall inside the configured
/// window. A special character (anything non-alphanumeric) can additionally
/// be required.
///
/// # Examples
///
/// ```
/// use fieldset_validators::PasswordStrengthValidator;
///
/// let validator = PasswordStrengthValidator::new(8, 64, false);
/// assert!(validator.validate("Sup3rsecret").is_ok());
/// assert!(validator.validate("alllowercase1").is_err());
///
/// let strict = PasswordStrengthValidator::new(8, 64, true);
/// assert!(strict.validate("Sup3rsecret").is_err());
/// assert!(strict.validate("Sup3rsecret!").is_ok());
/// ```
pub struct PasswordStrengthValidator {
    min_length: usize,
    max_length: usize,
    require_special: bool,
}

impl PasswordStrengthValidator {
    pub fn new(min_length: usize, max_length: usize, require_special: bool) -> Self {
        Self {
            min_length,
            max_length,
            require_special,
        }
    }

    pub fn validate(&self, value: &str) -> ValidationResult<()> {
        let length = value.chars().count();
        if length < self.min_length {
            return Err(ValidationError::WeakPassword(format!(
                "password must be at least {} characters long",
                self.min_length
            )));
        }
        if length > self.max_length {
            return Err(ValidationError::WeakPassword(format!(
                "password must be at most {} characters long",
                self.max_length
            )));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::WeakPassword(
                "password must not contain whitespace".to_string(),
            ));
        }

        let mut has_upper = false;
        let mut has_lower = false;
        let mut has_digit = false;
        let mut has_special = false;
        for c in value.chars() {
            if c.is_uppercase() {
                has_upper = true;
            } else if c.is_lowercase() {
                has_lower = true;
            } else if c.is_ascii_digit() {
                has_digit = true;
            } else {
                has_special = true;
            }
        }

        if !has_upper {
            return Err(ValidationError::WeakPassword(
                "password must contain an uppercase letter".to_string(),
            ));
        }
        if !has_lower {
            return Err(ValidationError::WeakPassword(
                "password must contain a lowercase letter".to_string(),
            ));
        }
        if !has_digit {
            return Err(ValidationError::WeakPassword(
                "password must contain a digit".to_string(),
            ));
        }
        if self.require_special && !has_special {
            return Err(ValidationError::WeakPassword(
                "password must contain a special character".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PasswordStrengthValidator {
    fn default() -> Self {
        Self::new(8, 128, false)
    }
}

impl Validator<str> for PasswordStrengthValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        self.validate(value)
    }
}

impl Validator<String> for PasswordStrengthValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        self.validate(value.as_str())
    }
}
