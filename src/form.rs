//! Form aggregation, binding and validation
//!
//! A [`Form`] owns an ordered list of [`FormElement`]s. It binds request
//! data onto them and validates the result, with optional hooks around
//! validation. Rendering emits the whole set as HTML.

use std::fmt;
use std::ops::Index;

use thiserror::Error;

use crate::data::FormData;
use crate::field::{Field, FieldError, FormElement};
use crate::request::FormRequest;

pub type FormResult<T> = Result<T, FormError>;

/// Hook invoked around validation.
pub type FormHook = Box<dyn FnMut(&mut Form) -> FormResult<()> + Send + Sync>;

/// Key used for form-level errors that are not tied to a single field.
pub const ALL_FIELDS_KEY: &str = "_all";

/// A validation error recorded on a form, tagged with the field it belongs
/// to ([`ALL_FIELDS_KEY`] for form-level errors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct FormError {
	pub field: String,
	pub error: FieldError,
}

impl FormError {
	pub fn new(field: impl Into<String>, error: FieldError) -> Self {
		Self {
			field: field.into(),
			error,
		}
	}

	/// A form-level error that is not tied to a single field.
	pub fn form(message: impl Into<String>) -> Self {
		Self {
			field: ALL_FIELDS_KEY.to_string(),
			error: FieldError::Custom(message.into()),
		}
	}
}

/// An ordered collection of fields with binding, validation and rendering.
///
/// ```
/// use fieldset::{Field, Form, FormRequest};
///
/// let mut form = Form::new()
/// 	.with_field(Field::text("name").required())
/// 	.with_field(Field::email("email"));
///
/// let request = FormRequest::post("name=Ada&email=ada%40example.com")?;
/// assert!(form.fill(&request));
/// assert_eq!(form.get("name").map(|v| v.as_str()), Some("Ada"));
/// # Ok::<(), fieldset::BindError>(())
/// ```
#[derive(Default)]
pub struct Form {
	fields: Vec<Box<dyn FormElement>>,
	errors: Vec<FormError>,
	before_valid: Option<FormHook>,
	after_valid: Option<FormHook>,
}

impl Form {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a form from anything deriving or implementing
	/// [`FormFields`], one field per struct field.
	pub fn from_model<M: FormFields>(model: &M) -> Self {
		let mut form = Self::new();
		for field in model.form_fields() {
			form.add_field(field);
		}
		form
	}

	pub fn add_field(&mut self, field: impl FormElement + 'static) {
		self.fields.push(Box::new(field));
	}

	pub fn add_boxed_field(&mut self, field: Box<dyn FormElement>) {
		self.fields.push(field);
	}

	/// Chainable [`add_field`](Self::add_field).
	pub fn with_field(mut self, field: impl FormElement + 'static) -> Self {
		self.add_field(field);
		self
	}

	/// Appends a hidden `csrf_token` field carrying the caller-supplied
	/// token. Token generation and verification stay with the caller.
	pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
		self.add_field(
			Field::hidden("csrf_token")
				.without_label()
				.with_value(token.into()),
		);
		self
	}

	/// The bound value of the `csrf_token` field, if the form carries one.
	pub fn csrf_token(&self) -> Option<&str> {
		self.get("csrf_token").map(FormData::as_str)
	}

	pub fn fields(&self) -> &[Box<dyn FormElement>] {
		&self.fields
	}

	/// Looks a field up by case-insensitive name.
	pub fn field(&self, name: &str) -> Option<&dyn FormElement> {
		self.fields
			.iter()
			.find(|field| field.name().eq_ignore_ascii_case(name))
			.map(Box::as_ref)
	}

	pub fn field_mut(&mut self, name: &str) -> Option<&mut (dyn FormElement + 'static)> {
		self.fields
			.iter_mut()
			.find(|field| field.name().eq_ignore_ascii_case(name))
			.map(Box::as_mut)
	}

	/// The bound data of the named field.
	pub fn get(&self, name: &str) -> Option<&FormData> {
		self.field(name).map(FormElement::value)
	}

	/// Removes the named fields, matching names case-insensitively.
	pub fn without(&mut self, names: &[&str]) {
		self.fields.retain(|field| {
			!names
				.iter()
				.any(|name| field.name().eq_ignore_ascii_case(name))
		});
	}

	/// Disables the named fields, or every field when `names` is empty.
	pub fn set_disabled(&mut self, names: &[&str]) {
		for field in &mut self.fields {
			if names.is_empty()
				|| names
					.iter()
					.any(|name| field.name().eq_ignore_ascii_case(name))
			{
				field.set_disabled(true);
			}
		}
	}

	/// Hook run before field validation; an error aborts validation.
	pub fn set_before_valid<F>(&mut self, hook: F)
	where
		F: FnMut(&mut Form) -> FormResult<()> + Send + Sync + 'static,
	{
		self.before_valid = Some(Box::new(hook));
	}

	/// Hook run after field validation, only when everything validated.
	pub fn set_after_valid<F>(&mut self, hook: F)
	where
		F: FnMut(&mut Form) -> FormResult<()> + Send + Sync + 'static,
	{
		self.after_valid = Some(Box::new(hook));
	}

	/// Binds request data onto the fields and validates.
	///
	/// GET, HEAD and DELETE requests bind from the query string; everything
	/// else binds from the body. File inputs take the first uploaded file
	/// submitted under their name. Fields absent from the request keep
	/// their current value.
	pub fn fill(&mut self, request: &FormRequest) -> bool {
		tracing::debug!(method = %request.method(), fields = self.fields.len(), "filling form");
		let source = request.bind_source();
		for field in &mut self.fields {
			if field.is_file_input() {
				if let Some(file) = request.file(field.name()) {
					field.set_file(file.clone());
				}
			} else if let Some(values) = source.get(field.name()) {
				field.set_value(values.clone());
			}
		}
		self.validate()
	}

	/// Validates the currently bound data: the before hook, then every
	/// field, then the after hook when nothing failed. All field errors are
	/// collected, not just the first.
	pub fn validate(&mut self) -> bool {
		self.errors.clear();

		if let Some(mut hook) = self.before_valid.take() {
			let outcome = hook(self);
			self.before_valid = Some(hook);
			if let Err(error) = outcome {
				tracing::debug!(%error, "form rejected before field validation");
				self.errors.push(error);
				return false;
			}
		}

		for field in &mut self.fields {
			let name = field.name().to_string();
			for error in field.validate() {
				self.errors.push(FormError::new(name.clone(), error));
			}
		}

		if self.errors.is_empty() {
			if let Some(mut hook) = self.after_valid.take() {
				let outcome = hook(self);
				self.after_valid = Some(hook);
				if let Err(error) = outcome {
					self.errors.push(error);
				}
			}
		}

		tracing::debug!(errors = self.errors.len(), "validated form");
		self.errors.is_empty()
	}

	/// Whether the last validation pass recorded no errors.
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}

	/// Recorded errors, in field order.
	pub fn errors(&self) -> &[FormError] {
		&self.errors
	}

	/// Errors recorded for one field, by case-insensitive name.
	pub fn field_errors(&self, name: &str) -> Vec<&FormError> {
		self.errors
			.iter()
			.filter(|error| error.field.eq_ignore_ascii_case(name))
			.collect()
	}

	/// Records a custom error against a field (or [`ALL_FIELDS_KEY`]).
	pub fn add_error(&mut self, field: impl Into<String>, error: FieldError) {
		self.errors.push(FormError::new(field, error));
	}

	/// Drops all bound values, files and errors.
	pub fn clear(&mut self) {
		for field in &mut self.fields {
			field.clear();
		}
		self.errors.clear();
	}

	/// Renders every field, labels included, separated by newlines.
	pub fn render(&self) -> String {
		let mut parts = Vec::new();
		for field in &self.fields {
			if takes_label(field.as_ref()) {
				parts.push(field.render_label());
			}
			parts.push(field.render());
		}
		parts.join("\n")
	}

	/// Renders every field with labels and controls wrapped in `<p>`
	/// elements. Hidden fields render bare, without label or wrapper.
	pub fn render_as_p(&self) -> String {
		let mut parts = Vec::new();
		for field in &self.fields {
			if takes_label(field.as_ref()) {
				parts.push(format!("<p>{}</p>", field.render_label()));
			}
			if field.is_hidden() {
				parts.push(field.render());
			} else {
				parts.push(format!("<p>{}</p>", field.render()));
			}
		}
		parts.join("\n")
	}
}

/// Hidden fields and buttons never take a visible label; buttons carry
/// their label as the button text.
fn takes_label(field: &dyn FormElement) -> bool {
	field.has_label() && !field.is_hidden() && !field.input_type().is_button()
}

impl Index<&str> for Form {
	type Output = Box<dyn FormElement>;

	fn index(&self, name: &str) -> &Self::Output {
		self.fields
			.iter()
			.find(|field| field.name().eq_ignore_ascii_case(name))
			.unwrap_or_else(|| panic!("no field named '{name}' in form"))
	}
}

impl fmt::Debug for Form {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Form")
			.field(
				"fields",
				&self.fields.iter().map(|field| field.name()).collect::<Vec<_>>(),
			)
			.field("errors", &self.errors)
			.finish_non_exhaustive()
	}
}

impl fmt::Display for Form {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

/// A model that can describe itself as form fields, usually through
/// `#[derive(FormFields)]`.
pub trait FormFields {
	/// Fields generated from the model, in declaration order, carrying the
	/// model's current values.
	fn form_fields(&self) -> Vec<Field>;
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicBool, Ordering};

	use http::Method;
	use rstest::rstest;

	use super::*;
	use crate::data::UploadedFile;

	fn signup_form() -> Form {
		Form::new()
			.with_field(Field::text("name").required().with_max(10))
			.with_field(Field::email("email").required())
	}

	#[rstest]
	fn test_fill_from_query_binds_and_validates() {
		// Arrange
		let mut form = signup_form();
		let request = FormRequest::get("name=Ada&email=ada%40example.com").unwrap();

		// Act
		let valid = form.fill(&request);

		// Assert
		assert!(valid);
		assert_eq!(form.get("name").map(FormData::as_str), Some("Ada"));
		assert_eq!(form.get("email").map(FormData::as_str), Some("ada@example.com"));
	}

	#[rstest]
	fn test_fill_post_ignores_query_parameters() {
		// Arrange
		let mut form = Form::new().with_field(Field::text("name"));
		let request = FormRequest::post("")
			.unwrap()
			.with_query_param("name", "from-query");

		// Act
		form.fill(&request);

		// Assert
		assert_eq!(form.get("name").map(FormData::as_str), Some(""));
	}

	#[rstest]
	fn test_fill_collects_all_errors() {
		// Arrange
		let mut form = signup_form();
		let request = FormRequest::post("name=far-too-long-name&email=not-an-email").unwrap();

		// Act
		let valid = form.fill(&request);

		// Assert
		assert!(!valid);
		assert_eq!(form.errors().len(), 2);
		assert_eq!(
			form.errors()[0].to_string(),
			"Name is too long by 7 characters"
		);
		assert_eq!(form.field_errors("email").len(), 1);
	}

	#[rstest]
	fn test_fill_binds_first_file() {
		// Arrange
		let mut form = Form::new().with_field(Field::file("upload"));
		let request = FormRequest::new(Method::POST)
			.with_file("upload", UploadedFile::new("first.txt", &b"1"[..]))
			.with_file("upload", UploadedFile::new("second.txt", &b"2"[..]));

		// Act
		form.fill(&request);

		// Assert
		let bound = form.get("upload").and_then(FormData::file);
		assert_eq!(bound.map(|file| file.filename.as_str()), Some("first.txt"));
	}

	#[rstest]
	fn test_fill_leaves_absent_fields_untouched() {
		let mut form = Form::new().with_field(Field::text("name").with_value("initial"));
		let request = FormRequest::post("other=x").unwrap();
		form.fill(&request);
		assert_eq!(form.get("name").map(FormData::as_str), Some("initial"));
	}

	#[rstest]
	fn test_before_hook_error_aborts_validation() {
		// Arrange
		let mut form = signup_form();
		form.set_before_valid(|form| {
			form.without(&["email"]);
			Err(FormError::form("submissions are closed"))
		});

		// Act
		let valid = form.validate();

		// Assert
		assert!(!valid);
		assert_eq!(form.errors().len(), 1);
		assert_eq!(form.errors()[0].field, ALL_FIELDS_KEY);
		assert_eq!(form.errors()[0].to_string(), "submissions are closed");
	}

	#[rstest]
	fn test_after_hook_runs_only_when_valid() {
		// Arrange
		let ran = Arc::new(AtomicBool::new(false));
		let observed = ran.clone();
		let mut form = Form::new().with_field(Field::text("name").required());
		form.set_after_valid(move |_| {
			observed.store(true, Ordering::SeqCst);
			Ok(())
		});

		// Act: invalid first, then valid.
		form.validate();
		assert!(!ran.load(Ordering::SeqCst));

		if let Some(field) = form.field_mut("name") {
			field.set_value(vec!["Ada".to_string()]);
		}
		form.validate();

		// Assert
		assert!(ran.load(Ordering::SeqCst));
	}

	#[rstest]
	fn test_after_hook_error_marks_form_invalid() {
		let mut form = Form::new().with_field(Field::text("name").with_value("Ada"));
		form.set_after_valid(|_| Err(FormError::form("name already taken")));
		assert!(!form.validate());
		assert_eq!(form.errors()[0].to_string(), "name already taken");
	}

	#[rstest]
	fn test_add_error_marks_form_invalid() {
		let mut form = Form::new().with_field(Field::text("name"));
		form.add_error("name", FieldError::Custom("taken".to_string()));
		assert!(!form.is_valid());
	}

	#[rstest]
	fn test_without_removes_fields_case_insensitively() {
		let mut form = signup_form();
		form.without(&["EMAIL"]);
		assert_eq!(form.fields().len(), 1);
		assert!(form.field("email").is_none());
	}

	#[rstest]
	fn test_set_disabled_with_empty_list_disables_all() {
		let mut form = signup_form();
		form.set_disabled(&[]);
		assert!(form.render().matches(" disabled").count() >= 2);
	}

	#[rstest]
	fn test_set_disabled_named_field_only() {
		let mut form = signup_form();
		form.set_disabled(&["name"]);
		assert!(form["name"].render().contains(" disabled"));
		assert!(!form["email"].render().contains(" disabled"));
	}

	#[rstest]
	fn test_csrf_token_renders_hidden_without_label() {
		let form = Form::new().with_csrf_token("tok123");
		assert_eq!(form.csrf_token(), Some("tok123"));
		assert_eq!(
			form.render(),
			"<input type=\"hidden\" id=\"csrf_token\" name=\"csrf_token\" value=\"tok123\">"
		);
	}

	#[rstest]
	fn test_render_interleaves_labels_and_fields() {
		let form = Form::new().with_field(Field::text("name").required());
		assert_eq!(
			form.render(),
			"<label for=\"name\">Name *</label>\n<input type=\"text\" id=\"name\" name=\"name\" required>"
		);
	}

	#[rstest]
	fn test_render_as_p_wraps_visible_fields_only() {
		let form = Form::new()
			.with_field(Field::text("name"))
			.with_csrf_token("tok");
		assert_eq!(
			form.render_as_p(),
			"<p><label for=\"name\">Name</label></p>\n\
			 <p><input type=\"text\" id=\"name\" name=\"name\"></p>\n\
			 <input type=\"hidden\" id=\"csrf_token\" name=\"csrf_token\" value=\"tok\">"
		);
	}

	#[rstest]
	fn test_buttons_render_without_separate_label() {
		let form = Form::new().with_field(Field::submit("save"));
		assert_eq!(
			form.render(),
			"<button type=\"submit\" id=\"save\" name=\"save\">Save</button>"
		);
	}

	#[rstest]
	fn test_index_looks_up_case_insensitively() {
		let form = signup_form();
		assert_eq!(form["NAME"].name(), "name");
	}

	#[rstest]
	#[should_panic(expected = "no field named 'missing' in form")]
	fn test_index_panics_on_unknown_field() {
		let form = signup_form();
		let _ = &form["missing"];
	}

	#[rstest]
	fn test_clear_resets_values_and_errors() {
		let mut form = signup_form();
		let request = FormRequest::post("name=far-too-long-name").unwrap();
		form.fill(&request);
		assert!(!form.is_valid());

		form.clear();
		assert!(form.is_valid());
		assert_eq!(form.get("name").map(FormData::as_str), Some(""));
	}

	#[rstest]
	fn test_from_model_uses_form_fields_order() {
		struct Login {
			username: String,
			password: String,
		}

		impl FormFields for Login {
			fn form_fields(&self) -> Vec<Field> {
				vec![
					Field::text("username").with_value(self.username.clone()),
					Field::password("password").with_value(self.password.clone()),
				]
			}
		}

		let model = Login {
			username: "ada".to_string(),
			password: String::new(),
		};
		let form = Form::from_model(&model);
		assert_eq!(form.fields().len(), 2);
		assert_eq!(form.fields()[0].name(), "username");
		assert_eq!(form.get("username").map(FormData::as_str), Some("ada"));
	}
}
