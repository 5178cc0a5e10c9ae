//! Field definitions and built-in validation
//!
//! [`Field`] is the one concrete [`FormElement`] this crate ships. It covers
//! every HTML control the toolkit renders; the control kind is selected by
//! [`InputType`] rather than by a struct per control, so a form is just a
//! list of uniformly-shaped fields.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::data::{FormData, UploadedFile};
use fieldset_validators::{
	EmailValidator, RegexValidator, ValidationError, ValidationResult, Validator,
};

/// Validator trait object stored on a field.
pub type BoxedValidator = Box<dyn Validator<str> + Send + Sync>;

/// Replacement renderer stored on a field.
pub type RenderFn = Box<dyn Fn(&Field) -> String + Send + Sync>;

/// The HTML control kind a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
	Text,
	Password,
	Email,
	Number,
	Range,
	Textarea,
	Checkbox,
	Radio,
	Select,
	Hidden,
	File,
	Submit,
	Button,
	Reset,
}

impl InputType {
	/// The value of the HTML `type` attribute (and the tag name for
	/// `textarea`/`select`).
	pub fn as_str(&self) -> &'static str {
		match self {
			InputType::Text => "text",
			InputType::Password => "password",
			InputType::Email => "email",
			InputType::Number => "number",
			InputType::Range => "range",
			InputType::Textarea => "textarea",
			InputType::Checkbox => "checkbox",
			InputType::Radio => "radio",
			InputType::Select => "select",
			InputType::Hidden => "hidden",
			InputType::File => "file",
			InputType::Submit => "submit",
			InputType::Button => "button",
			InputType::Reset => "reset",
		}
	}

	/// Numeric controls validate their value as a number instead of by
	/// length.
	pub fn is_numeric(&self) -> bool {
		matches!(self, InputType::Number | InputType::Range)
	}

	/// Button-like controls render their label as the button text.
	pub fn is_button(&self) -> bool {
		matches!(self, InputType::Submit | InputType::Button | InputType::Reset)
	}
}

impl fmt::Display for InputType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Validation failure for a single field.
///
/// The `Display` text is the user-facing message; the label is baked in so
/// the message reads naturally in an error list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
	#[error("{label} is required")]
	Required { label: String },

	#[error("{label} is too long by {by} characters")]
	TooLong { label: String, by: usize },

	#[error("{label} is too short by {by} characters")]
	TooShort { label: String, by: usize },

	#[error("{label} is too large")]
	TooLarge { label: String },

	#[error("{label} is too small")]
	TooSmall { label: String },

	#[error("{label} is not a valid number")]
	NotANumber { label: String },

	#[error(transparent)]
	Validation(#[from] ValidationError),

	#[error("{0}")]
	Custom(String),
}

/// One `<option>` inside a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
	pub value: String,
	pub text: String,
	pub selected: bool,
}

impl SelectOption {
	pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			text: text.into(),
			selected: false,
		}
	}

	pub fn selected(mut self) -> Self {
		self.selected = true;
		self
	}
}

/// Object-safe field abstraction the [`Form`](crate::Form) aggregates.
///
/// [`Field`] is the provided implementation; custom implementations are
/// possible where a field needs behavior a configured [`Field`] cannot
/// express.
pub trait FormElement: Send + Sync {
	fn name(&self) -> &str;
	fn input_type(&self) -> InputType;

	/// Whether the field carries non-empty label text.
	fn has_label(&self) -> bool;
	fn render_label(&self) -> String;
	fn render(&self) -> String;

	fn value(&self) -> &FormData;
	fn set_value(&mut self, values: Vec<String>);
	fn set_file(&mut self, file: UploadedFile);
	fn options(&self) -> &[SelectOption];

	/// Runs the built-in checks and any custom validators, records the
	/// failures on the field, and returns them.
	fn validate(&mut self) -> Vec<FieldError>;
	fn errors(&self) -> &[FieldError];
	fn add_error(&mut self, error: FieldError);
	fn has_errors(&self) -> bool {
		!self.errors().is_empty()
	}

	/// Drops the bound value, file and recorded errors.
	fn clear(&mut self);

	fn set_required(&mut self, required: bool);
	fn set_disabled(&mut self, disabled: bool);
	fn set_readonly(&mut self, readonly: bool);
	fn set_hidden(&mut self, hidden: bool);
	fn set_checked(&mut self, checked: bool);

	/// Whether the field is visually hidden, by flag or by control kind.
	fn is_hidden(&self) -> bool {
		self.input_type() == InputType::Hidden
	}

	/// File inputs bind uploaded files instead of text values.
	fn is_file_input(&self) -> bool {
		self.input_type() == InputType::File
	}
}

/// A single form field.
///
/// Fields are built with the typed constructors plus chainable `with_*`
/// methods, then added to a [`Form`](crate::Form):
///
/// ```
/// use fieldset::Field;
///
/// let field = Field::text("username")
/// 	.with_placeholder("Username")
/// 	.with_max(150)
/// 	.required();
/// assert_eq!(field.name, "username");
/// assert_eq!(field.label.as_deref(), Some("Username"));
/// ```
pub struct Field {
	pub name: String,
	pub input_type: InputType,
	/// Explicit element id; the name is used when unset.
	pub id: Option<String>,
	/// Label text. `None` renders no label at all.
	pub label: Option<String>,
	pub label_class: Option<String>,
	pub help_text: Option<String>,
	pub placeholder: Option<String>,
	pub class: Option<String>,
	pub autocomplete: Option<String>,
	pub value: FormData,
	pub options: Vec<SelectOption>,
	/// For numeric controls a value bound, otherwise a character-count bound.
	pub min: Option<i64>,
	pub max: Option<i64>,
	pub required: bool,
	pub disabled: bool,
	pub readonly: bool,
	pub hidden: bool,
	pub checked: bool,
	pub multiple: bool,
	pub validators: Vec<BoxedValidator>,
	pub errors: Vec<FieldError>,
	/// Verbatim replacements for the default error texts.
	pub required_message: Option<String>,
	pub max_message: Option<String>,
	pub min_message: Option<String>,
	pub not_a_number_message: Option<String>,
	pub render_override: Option<RenderFn>,
	pub label_override: Option<RenderFn>,
}

impl Field {
	/// Creates a field of the given control kind. The label defaults to the
	/// title-cased name.
	pub fn new(name: impl Into<String>, input_type: InputType) -> Self {
		let name = name.into();
		let label = Some(title_case(&name));
		Self {
			name,
			input_type,
			id: None,
			label,
			label_class: None,
			help_text: None,
			placeholder: None,
			class: None,
			autocomplete: None,
			value: FormData::default(),
			options: Vec::new(),
			min: None,
			max: None,
			required: false,
			disabled: false,
			readonly: false,
			hidden: false,
			checked: false,
			multiple: false,
			validators: Vec::new(),
			errors: Vec::new(),
			required_message: None,
			max_message: None,
			min_message: None,
			not_a_number_message: None,
			render_override: None,
			label_override: None,
		}
	}

	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Text)
	}

	pub fn password(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Password)
	}

	/// Email field with a format validator pre-installed.
	///
	/// ```
	/// use fieldset::Field;
	///
	/// let mut field = Field::email("contact");
	/// field.value = "nope".into();
	/// assert!(!field.validate().is_empty());
	/// ```
	pub fn email(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Email).with_validator(EmailValidator::new())
	}

	pub fn number(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Number)
	}

	pub fn textarea(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Textarea)
	}

	pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
		let mut field = Self::new(name, InputType::Checkbox);
		field.checked = checked;
		field
	}

	pub fn radio(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Radio)
	}

	pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
		let mut field = Self::new(name, InputType::Select);
		field.options = options;
		field
	}

	pub fn hidden(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Hidden)
	}

	pub fn file(name: impl Into<String>) -> Self {
		Self::new(name, InputType::File)
	}

	pub fn submit(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Submit)
	}

	pub fn reset(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Reset)
	}

	pub fn button(name: impl Into<String>) -> Self {
		Self::new(name, InputType::Button)
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Removes the label entirely (used for hidden bookkeeping fields).
	pub fn without_label(mut self) -> Self {
		self.label = None;
		self
	}

	pub fn with_label_class(mut self, class: impl Into<String>) -> Self {
		self.label_class = Some(class.into());
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
		self.autocomplete = Some(autocomplete.into());
		self
	}

	pub fn with_value(mut self, value: impl Into<FormData>) -> Self {
		self.value = value.into();
		self
	}

	pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
		self.options = options;
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}

	pub fn readonly(mut self) -> Self {
		self.readonly = true;
		self
	}

	pub fn hidden_attr(mut self) -> Self {
		self.hidden = true;
		self
	}

	pub fn with_checked(mut self, checked: bool) -> Self {
		self.checked = checked;
		self
	}

	pub fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}

	/// Character-count minimum, or value minimum for numeric controls.
	pub fn with_min(mut self, min: i64) -> Self {
		self.min = Some(min);
		self
	}

	/// Character-count maximum, or value maximum for numeric controls.
	pub fn with_max(mut self, max: i64) -> Self {
		self.max = Some(max);
		self
	}

	/// Adds a custom validator, run after the built-in checks.
	///
	/// ```
	/// use fieldset::Field;
	/// use fieldset::validators::MinLengthValidator;
	///
	/// let mut field = Field::text("title").with_validator(MinLengthValidator::new(3));
	/// field.value = "ab".into();
	/// assert_eq!(field.validate().len(), 1);
	/// ```
	pub fn with_validator(mut self, validator: impl Validator<str> + Send + Sync + 'static) -> Self {
		self.validators.push(Box::new(validator));
		self
	}

	/// Adds a closure validator.
	///
	/// ```
	/// use fieldset::Field;
	/// use fieldset::ValidationError;
	///
	/// let mut field = Field::text("word").with_validator_fn(|v| {
	/// 	if v.contains(' ') {
	/// 		Err(ValidationError::Custom("one word only".to_string()))
	/// 	} else {
	/// 		Ok(())
	/// 	}
	/// });
	/// field.value = "two words".into();
	/// assert_eq!(field.validate().len(), 1);
	/// ```
	pub fn with_validator_fn<F>(self, f: F) -> Self
	where
		F: Fn(&str) -> ValidationResult<()> + Send + Sync + 'static,
	{
		self.with_validator(fieldset_validators::FnValidator::new(f))
	}

	/// Adds a regex validator from a pattern or `<<alias>>` shorthand. An
	/// invalid pattern turns into a validator that always fails with the
	/// configuration error, so the mistake surfaces on first validation.
	pub fn with_regex(self, pattern: &str) -> Self {
		match RegexValidator::new(pattern) {
			Ok(validator) => self.with_validator(validator),
			Err(error) => self.with_validator_fn(move |_| Err(error.clone())),
		}
	}

	pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
		self.required_message = Some(message.into());
		self
	}

	pub fn with_max_message(mut self, message: impl Into<String>) -> Self {
		self.max_message = Some(message.into());
		self
	}

	pub fn with_min_message(mut self, message: impl Into<String>) -> Self {
		self.min_message = Some(message.into());
		self
	}

	pub fn with_nan_message(mut self, message: impl Into<String>) -> Self {
		self.not_a_number_message = Some(message.into());
		self
	}

	/// Replaces the default markup renderer.
	pub fn with_render<F>(mut self, f: F) -> Self
	where
		F: Fn(&Field) -> String + Send + Sync + 'static,
	{
		self.render_override = Some(Box::new(f));
		self
	}

	/// Replaces the default label renderer.
	pub fn with_label_render<F>(mut self, f: F) -> Self
	where
		F: Fn(&Field) -> String + Send + Sync + 'static,
	{
		self.label_override = Some(Box::new(f));
		self
	}

	/// The id used in markup: the explicit id, or the field name.
	pub fn dom_id(&self) -> &str {
		self.id.as_deref().unwrap_or(&self.name)
	}

	/// Text used in error messages and button bodies: the label when set,
	/// otherwise the title-cased name.
	pub fn label_text(&self) -> String {
		match &self.label {
			Some(label) if !label.is_empty() => label.clone(),
			_ => title_case(&self.name),
		}
	}

	/// Runs required/bounds/parse checks and then the custom validators.
	/// Failures are recorded on the field and also returned.
	pub fn validate(&mut self) -> Vec<FieldError> {
		let label = self.label_text();
		let mut errors = Vec::new();

		if self.required && self.value.is_empty() {
			errors.push(match &self.required_message {
				Some(message) => FieldError::Custom(message.clone()),
				None => FieldError::Required { label: label.clone() },
			});
		}

		if !self.value.is_empty() {
			if self.input_type.is_numeric() {
				self.check_numeric(&label, &mut errors);
			} else if self.input_type != InputType::File {
				self.check_length(&label, &mut errors);
			}

			// Custom validators see the bound text (the filename for file
			// inputs); empty fields are governed by `required` alone.
			for validator in &self.validators {
				if let Err(error) = validator.validate(self.value.as_str()) {
					errors.push(FieldError::Validation(error));
				}
			}
		}

		self.errors = errors.clone();
		errors
	}

	fn check_numeric(&self, label: &str, errors: &mut Vec<FieldError>) {
		let parsed = self.value.as_str().trim().parse::<f64>();
		let number = match parsed {
			Ok(n) if n.is_finite() => n,
			_ => {
				errors.push(match &self.not_a_number_message {
					Some(message) => FieldError::Custom(message.clone()),
					None => FieldError::NotANumber {
						label: label.to_string(),
					},
				});
				return;
			}
		};
		if let Some(max) = self.max {
			if number > max as f64 {
				errors.push(match &self.max_message {
					Some(message) => FieldError::Custom(message.clone()),
					None => FieldError::TooLarge {
						label: label.to_string(),
					},
				});
			}
		}
		if let Some(min) = self.min {
			if number < min as f64 {
				errors.push(match &self.min_message {
					Some(message) => FieldError::Custom(message.clone()),
					None => FieldError::TooSmall {
						label: label.to_string(),
					},
				});
			}
		}
	}

	fn check_length(&self, label: &str, errors: &mut Vec<FieldError>) {
		// Character count, not byte length.
		let length = self.value.as_str().chars().count() as i64;
		if let Some(max) = self.max {
			if length > max {
				errors.push(match &self.max_message {
					Some(message) => FieldError::Custom(message.clone()),
					None => FieldError::TooLong {
						label: label.to_string(),
						by: (length - max) as usize,
					},
				});
			}
		}
		if let Some(min) = self.min {
			if length < min {
				errors.push(match &self.min_message {
					Some(message) => FieldError::Custom(message.clone()),
					None => FieldError::TooShort {
						label: label.to_string(),
						by: (min - length) as usize,
					},
				});
			}
		}
	}
}

impl FormElement for Field {
	fn name(&self) -> &str {
		&self.name
	}

	fn input_type(&self) -> InputType {
		self.input_type
	}

	fn has_label(&self) -> bool {
		self.label.as_deref().is_some_and(|label| !label.is_empty())
	}

	fn render_label(&self) -> String {
		Field::render_label(self)
	}

	fn render(&self) -> String {
		Field::render(self)
	}

	fn value(&self) -> &FormData {
		&self.value
	}

	fn set_value(&mut self, values: Vec<String>) {
		self.value.set_values(values);
	}

	fn set_file(&mut self, file: UploadedFile) {
		self.value.set_file(file);
	}

	fn options(&self) -> &[SelectOption] {
		&self.options
	}

	fn validate(&mut self) -> Vec<FieldError> {
		Field::validate(self)
	}

	fn errors(&self) -> &[FieldError] {
		&self.errors
	}

	fn add_error(&mut self, error: FieldError) {
		self.errors.push(error);
	}

	fn clear(&mut self) {
		self.value.clear();
		self.errors.clear();
	}

	fn set_required(&mut self, required: bool) {
		self.required = required;
	}

	fn set_disabled(&mut self, disabled: bool) {
		self.disabled = disabled;
	}

	fn set_readonly(&mut self, readonly: bool) {
		self.readonly = readonly;
	}

	fn set_hidden(&mut self, hidden: bool) {
		self.hidden = hidden;
	}

	fn set_checked(&mut self, checked: bool) {
		self.checked = checked;
	}

	fn is_hidden(&self) -> bool {
		self.hidden || self.input_type == InputType::Hidden
	}
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("input_type", &self.input_type)
			.field("label", &self.label)
			.field("value", &self.value)
			.field("required", &self.required)
			.field("min", &self.min)
			.field("max", &self.max)
			.field("validators", &self.validators.len())
			.field("errors", &self.errors)
			.finish_non_exhaustive()
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

/// Title-cases a field name for use as a default label: underscores become
/// spaces and each word is capitalized.
pub(crate) fn title_case(name: &str) -> String {
	name.split(['_', ' '])
		.filter(|word| !word.is_empty())
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}
