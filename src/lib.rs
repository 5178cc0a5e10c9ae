//! # fieldset
//!
//! A server-side HTML form toolkit: declare fields, render them as HTML,
//! bind request data onto them (query strings, urlencoded bodies, multipart
//! uploads), validate, and scan the bound values back into typed Rust
//! variables.
//!
//! The crate is transport-neutral. It never reads sockets or parses HTTP;
//! callers hand it a [`FormRequest`] built from whatever server stack they
//! use, and get validated, typed data back.
//!
//! ## Quick start
//!
//! ```
//! use fieldset::{Field, Form, FormRequest};
//!
//! let mut form = Form::new()
//! 	.with_field(Field::text("name").required().with_max(150))
//! 	.with_field(Field::email("email"))
//! 	.with_field(Field::checkbox("subscribe", false));
//!
//! let request = FormRequest::post("name=Ada&email=ada%40example.com&subscribe=on")?;
//! assert!(form.fill(&request));
//!
//! let name: String = form.scan("name")?;
//! let subscribe: bool = form.scan("subscribe")?;
//! assert_eq!(name, "Ada");
//! assert!(subscribe);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Deriving forms from structs
//!
//! With `#[derive(FormFields)]`, a plain struct describes a whole form; the
//! control kinds follow the Rust types through [`FieldValue`]:
//!
//! ```
//! use fieldset::{Form, FormFields};
//!
//! #[derive(FormFields)]
//! struct Signup {
//! 	#[form(placeholder = "Jane Doe", required, max = 150)]
//! 	name: String,
//! 	#[form(min = 13)]
//! 	age: u8,
//! 	subscribed: bool,
//! }
//!
//! let form = Form::from_model(&Signup {
//! 	name: "Ada".to_string(),
//! 	age: 36,
//! 	subscribed: true,
//! });
//! assert_eq!(form.fields().len(), 3);
//! ```

pub mod data;
pub mod escape;
pub mod field;
pub mod form;
pub mod request;
pub mod scan;
pub mod value;

mod render;

pub use crate::data::{FormData, UploadedFile};
pub use crate::field::{
	BoxedValidator, Field, FieldError, FormElement, InputType, SelectOption,
};
pub use crate::form::{ALL_FIELDS_KEY, Form, FormError, FormFields, FormHook, FormResult};
pub use crate::request::{BindError, DEFAULT_MAX_BODY_BYTES, FormRequest};
pub use crate::scan::{FromFormValue, ScanError, ScanTuple, parse_bool};
pub use crate::value::FieldValue;

/// Derive macro generating a [`FormFields`] implementation.
pub use fieldset_macros::FormFields;

/// The validator toolkit, re-exported for direct use.
pub use fieldset_validators as validators;

pub use fieldset_validators::{ValidationError, ValidationResult, Validator};

/// HTTP method type used to route binding between query and body.
pub use http::Method;

/// Convenient single-line import for the common types.
pub mod prelude {
	pub use crate::{
		Field, FieldValue, Form, FormElement, FormFields, FormRequest, FromFormValue, InputType,
		Method, SelectOption,
	};
	pub use fieldset_validators::Validator;
}
