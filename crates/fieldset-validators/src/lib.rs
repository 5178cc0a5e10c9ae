//! Reusable value validators for fieldset forms
//!
//! Each validator is a small struct with a `new` constructor, optional
//! `with_message` override, and a `validate` method. Everything also
//! implements the [`Validator`] trait so validators can be boxed and run
//! uniformly by form fields, and [`FnValidator`] lifts plain closures into
//! the same shape.

pub mod email;
pub mod errors;
pub mod numeric;
pub mod password;
pub mod string;
pub mod url;

pub use email::EmailValidator;
pub use errors::{ValidationError, ValidationResult};
pub use numeric::{MaxValueValidator, MinValueValidator, RangeValidator};
pub use password::PasswordStrengthValidator;
pub use string::{
    LengthValidator, MaxLengthValidator, MinLengthValidator, RegexValidator, SlugValidator,
};
pub use url::UrlValidator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::email::*;
    pub use crate::errors::*;
    pub use crate::numeric::*;
    pub use crate::password::*;
    pub use crate::string::*;
    pub use crate::url::*;
    pub use crate::{FnValidator, Validator};
}

/// Trait for validators
pub trait Validator<T: ?Sized> {
    fn validate(&self, value: &T) -> ValidationResult<()>;
}

/// Adapter that turns a plain function or closure into a [`Validator`].
///
/// # Examples
///
/// ```
/// use fieldset_validators::{FnValidator, ValidationError, Validator};
///
/// let no_admin = FnValidator::new(|value: &str| {
///     if value.eq_ignore_ascii_case("admin") {
///         Err(ValidationError::Custom("that name is reserved".to_string()))
///     } else {
///         Ok(())
///     }
/// });
/// assert!(Validator::<str>::validate(&no_admin, "carol").is_ok());
/// assert!(Validator::<str>::validate(&no_admin, "Admin").is_err());
/// ```
pub struct FnValidator<F>(F);

impl<F> FnValidator<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T, F> Validator<T> for FnValidator<F>
where
    T: ?Sized,
    F: Fn(&T) -> ValidationResult<()>,
{
    fn validate(&self, value: &T) -> ValidationResult<()> {
        (self.0)(value)
    }
}
