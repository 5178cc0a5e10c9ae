//! Mapping from Rust types to form fields
//!
//! [`FieldValue`] is what the [`FormFields`](crate::FormFields) derive leans
//! on: it decides the control kind a struct field generates and how the
//! current value is written onto it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::data::FormData;
use crate::field::{Field, InputType, SelectOption};

/// A Rust value that knows how to appear in a form.
pub trait FieldValue {
	/// The string bound onto the generated field.
	fn to_value(&self) -> String;

	/// The control kind a field generated for this type defaults to.
	fn input_type() -> InputType
	where
		Self: Sized,
	{
		InputType::Text
	}

	/// Writes this value onto a generated field. The default binds
	/// [`to_value`](Self::to_value) as the field value; collection and
	/// boolean types override it.
	fn populate(&self, field: &mut Field) {
		field.value = FormData::new(self.to_value());
	}
}

macro_rules! impl_text_field_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl FieldValue for $ty {
				fn to_value(&self) -> String {
					self.to_string()
				}
			}
		)*
	};
}

macro_rules! impl_numeric_field_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl FieldValue for $ty {
				fn to_value(&self) -> String {
					self.to_string()
				}

				fn input_type() -> InputType {
					InputType::Number
				}
			}
		)*
	};
}

impl_text_field_value!(String, &str, char);

impl_numeric_field_value!(
	i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl FieldValue for bool {
	fn to_value(&self) -> String {
		self.to_string()
	}

	fn input_type() -> InputType {
		InputType::Checkbox
	}

	fn populate(&self, field: &mut Field) {
		field.checked = *self;
		field.value = FormData::new(self.to_value());
	}
}

impl FieldValue for NaiveDate {
	fn to_value(&self) -> String {
		self.format("%Y-%m-%d").to_string()
	}
}

impl FieldValue for NaiveDateTime {
	fn to_value(&self) -> String {
		self.format("%Y-%m-%dT%H:%M:%S").to_string()
	}
}

impl FieldValue for DateTime<Utc> {
	fn to_value(&self) -> String {
		self.to_rfc3339()
	}
}

/// A `Vec` renders as a select control with one option per element.
impl<T: FieldValue> FieldValue for Vec<T> {
	fn to_value(&self) -> String {
		self.first().map(FieldValue::to_value).unwrap_or_default()
	}

	fn input_type() -> InputType {
		InputType::Select
	}

	fn populate(&self, field: &mut Field) {
		field.options = self
			.iter()
			.map(|item| {
				let value = item.to_value();
				SelectOption::new(value.clone(), value)
			})
			.collect();
	}
}

/// `None` leaves the generated field untouched.
impl<T: FieldValue> FieldValue for Option<T> {
	fn to_value(&self) -> String {
		self.as_ref().map(FieldValue::to_value).unwrap_or_default()
	}

	fn input_type() -> InputType {
		T::input_type()
	}

	fn populate(&self, field: &mut Field) {
		if let Some(value) = self {
			value.populate(field);
		}
	}
}
