//! # fieldset macros
//!
//! Procedural macros for the `fieldset` form toolkit. The one export is
//! `#[derive(FormFields)]`, which turns a plain struct into a form
//! description.
//!
//! ```rust,ignore
//! use fieldset::{Form, FormFields};
//!
//! #[derive(FormFields)]
//! struct Signup {
//!     #[form(placeholder = "Jane Doe", required, max = 150)]
//!     name: String,
//!     #[form(min = 13)]
//!     age: u8,
//!     #[form(kind = "textarea")]
//!     bio: String,
//!     subscribed: bool,
//! }
//!
//! let form = Form::from_model(&Signup {
//!     name: String::new(),
//!     age: 0,
//!     bio: String::new(),
//!     subscribed: true,
//! });
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod expand;

/// Derives the `FormFields` trait for a struct with named fields.
///
/// One form field is generated per struct field, in declaration order. The
/// control kind follows the field's Rust type through the `FieldValue`
/// trait; the current value of each field is bound onto the form.
///
/// ## Field Attributes
///
/// Fields can be annotated with `#[form(...)]`:
/// - `label` - Label text (defaults to the title-cased field name)
/// - `placeholder` - Placeholder text
/// - `class` - CSS class
/// - `id` - Element id (defaults to the field name)
/// - `kind` - Input kind override, e.g. `"textarea"` or `"password"`
/// - `required` - Mark the field as required
/// - `min` / `max` - Numeric bounds, or character-count bounds for text
/// - `regex` - Validation pattern or `<<alias>>` shorthand
/// - `skip` - Exclude the field from the form
#[proc_macro_derive(FormFields, attributes(form))]
pub fn derive_form_fields(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand::derive_form_fields(&input)
		.unwrap_or_else(|error| error.to_compile_error())
		.into()
}
