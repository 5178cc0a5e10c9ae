//! Numeric validators

use std::fmt::Display;

use crate::{ValidationError, ValidationResult, Validator};

/// Minimum value validator.
pub struct MinValueValidator<T> {
    min: T,
    message: Option<String>,
}

impl<T> MinValueValidator<T> {
    /// Creates a new MinValueValidator with the specified minimum value.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldset_validators::{MinValueValidator, Validator};
    ///
    /// let validator = MinValueValidator::new(10);
    /// assert!(validator.validate(&10).is_ok());
    /// assert!(validator.validate(&5).is_err());
    /// ```
    pub fn new(min: T) -> Self {
        Self { min, message: None }
    }

    /// Sets a custom error message used verbatim on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: PartialOrd + Display> Validator<T> for MinValueValidator<T> {
    fn validate(&self, value: &T) -> ValidationResult<()> {
        if value >= &self.min {
            return Ok(());
        }
        match &self.message {
            Some(message) => Err(ValidationError::Custom(message.clone())),
            None => Err(ValidationError::TooSmall {
                value: value.to_string(),
                min: self.min.to_string(),
            }),
        }
    }
}

/// Maximum value validator.
pub struct MaxValueValidator<T> {
    max: T,
    message: Option<String>,
}

impl<T> MaxValueValidator<T> {
    /// Creates a new MaxValueValidator with the specified maximum value.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldset_validators::{MaxValueValidator, Validator};
    ///
    /// let validator = MaxValueValidator::new(100);
    /// assert!(validator.validate(&42).is_ok());
    /// assert!(validator.validate(&150).is_err());
    /// ```
    pub fn new(max: T) -> Self {
        Self { max, message: None }
    }

    /// Sets a custom error message used verbatim on failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: PartialOrd + Display> Validator<T> for MaxValueValidator<T> {
    fn validate(&self, value: &T) -> ValidationResult<()> {
        if value <= &self.max {
            return Ok(());
        }
        match &self.message {
            Some(message) => Err(ValidationError::Custom(message.clone())),
            None => Err(ValidationError::TooLarge {
                value: value.to_string(),
                max: self.max.to_string(),
            }),
        }
    }
}

/// Inclusive range validator.
pub struct RangeValidator<T> {
    min: T,
    max: T,
}

impl<T> RangeValidator<T> {
    /// Creates a new RangeValidator with the specified inclusive bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldset_validators::{RangeValidator, Validator};
    ///
    /// let validator = RangeValidator::new(0, 100);
    /// assert!(validator.validate(&0).is_ok());
    /// assert!(validator.validate(&100).is_ok());
    /// assert!(validator.validate(&101).is_err());
    /// ```
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd + Display> Validator<T> for RangeValidator<T> {
    fn validate(&self, value: &T) -> ValidationResult<()> {
        if value < &self.min {
            Err(ValidationError::TooSmall {
                value: value.to_string(),
                min: self.min.to_string(),
            })
        } else if value > &self.max {
            Err(ValidationError::TooLarge {
                value: value.to_string(),
                max: self.max.to_string(),
            })
        } else {
            Ok(())
        }
    }
}
