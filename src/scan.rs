//! Typed scan-back of bound form data
//!
//! After a form is filled, [`Form::scan`] and [`Form::scan_fields`] convert
//! the bound strings into caller-provided Rust types through
//! [`FromFormValue`]. Scalars fail on missing values; `Option` and `Vec`
//! absorb absence, which is what unchecked checkboxes and empty multi-selects
//! submit.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::data::FormData;
use crate::form::Form;

/// Failure to convert bound form data into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
	#[error("no field named '{0}'")]
	UnknownField(String),

	#[error("no value bound for '{0}'")]
	MissingValue(String),

	#[error("cannot scan '{value}' into {field}: {message}")]
	Parse {
		field: String,
		value: String,
		message: String,
	},

	#[error("cannot scan {fields} fields into {targets} targets")]
	ArityMismatch { fields: usize, targets: usize },
}

impl ScanError {
	// Conversions run without knowing the field; the form fills it in.
	fn with_field(self, name: &str) -> Self {
		match self {
			ScanError::MissingValue(_) => ScanError::MissingValue(name.to_string()),
			ScanError::Parse { value, message, .. } => ScanError::Parse {
				field: name.to_string(),
				value,
				message,
			},
			other => other,
		}
	}
}

fn parse_error(raw: &str, error: &dyn fmt::Display) -> ScanError {
	ScanError::Parse {
		field: String::new(),
		value: raw.to_string(),
		message: error.to_string(),
	}
}

/// Interprets the boolean spellings HTML forms produce.
///
/// `true`, `yes`, `1`, `on`, `checked` and `selected` read as true;
/// `false`, `no`, `0` and `off` read as false. Matching is case-insensitive
/// and ignores surrounding whitespace. Anything else is `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "yes" | "1" | "on" | "checked" | "selected" => Some(true),
		"false" | "no" | "0" | "off" => Some(false),
		_ => None,
	}
}

/// A type that can be read back out of bound form data.
pub trait FromFormValue: Sized {
	/// Parses one raw string value.
	fn from_raw(raw: &str) -> Result<Self, ScanError>;

	/// Parses from the full bound data. The default takes the first value
	/// and fails when nothing non-empty is bound.
	fn from_form_value(data: &FormData) -> Result<Self, ScanError> {
		if data.is_empty() {
			return Err(ScanError::MissingValue(String::new()));
		}
		Self::from_raw(data.as_str())
	}
}

macro_rules! impl_from_form_value_parse {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromFormValue for $ty {
				fn from_raw(raw: &str) -> Result<Self, ScanError> {
					raw.trim()
						.parse::<$ty>()
						.map_err(|error| parse_error(raw, &error))
				}
			}
		)*
	};
}

impl_from_form_value_parse!(
	i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl FromFormValue for String {
	fn from_raw(raw: &str) -> Result<Self, ScanError> {
		Ok(raw.to_string())
	}

	// An empty submission is a legitimate string.
	fn from_form_value(data: &FormData) -> Result<Self, ScanError> {
		Ok(data.as_str().to_string())
	}
}

impl FromFormValue for char {
	fn from_raw(raw: &str) -> Result<Self, ScanError> {
		let mut chars = raw.chars();
		match (chars.next(), chars.next()) {
			(Some(c), None) => Ok(c),
			_ => Err(parse_error(raw, &"expected a single character")),
		}
	}
}

impl FromFormValue for bool {
	fn from_raw(raw: &str) -> Result<Self, ScanError> {
		parse_bool(raw).ok_or_else(|| parse_error(raw, &"not a recognized boolean"))
	}
}

impl FromFormValue for NaiveDate {
	fn from_raw(raw: &str) -> Result<Self, ScanError> {
		NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|error| parse_error(raw, &error))
	}
}

impl FromFormValue for NaiveDateTime {
	fn from_raw(raw: &str) -> Result<Self, ScanError> {
		NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S")
			.map_err(|error| parse_error(raw, &error))
	}
}

impl FromFormValue for DateTime<Utc> {
	fn from_raw(raw: &str) -> Result<Self, ScanError> {
		DateTime::parse_from_rfc3339(raw.trim())
			.map(|datetime| datetime.with_timezone(&Utc))
			.map_err(|error| parse_error(raw, &error))
	}
}

/// Absent or empty data scans to `None`.
impl<T: FromFormValue> FromFormValue for Option<T> {
	fn from_raw(raw: &str) -> Result<Self, ScanError> {
		if raw.is_empty() {
			Ok(None)
		} else {
			T::from_raw(raw).map(Some)
		}
	}

	fn from_form_value(data: &FormData) -> Result<Self, ScanError> {
		if data.is_empty() {
			Ok(None)
		} else {
			T::from_raw(data.as_str()).map(Some)
		}
	}
}

/// Collects every bound value; absence scans to an empty vector.
impl<T: FromFormValue> FromFormValue for Vec<T> {
	fn from_raw(raw: &str) -> Result<Self, ScanError> {
		if raw.is_empty() {
			Ok(Vec::new())
		} else {
			T::from_raw(raw).map(|value| vec![value])
		}
	}

	fn from_form_value(data: &FormData) -> Result<Self, ScanError> {
		data.values()
			.iter()
			.filter(|value| !value.is_empty())
			.map(|value| T::from_raw(value))
			.collect()
	}
}

/// A tuple of scan targets, one per field name.
pub trait ScanTuple: Sized {
	const ARITY: usize;

	fn scan_from(form: &Form, names: &[&str]) -> Result<Self, ScanError>;
}

macro_rules! impl_scan_tuple {
	($count:expr => $($ty:ident : $index:tt),+) => {
		impl<$($ty: FromFormValue),+> ScanTuple for ($($ty,)+) {
			const ARITY: usize = $count;

			fn scan_from(form: &Form, names: &[&str]) -> Result<Self, ScanError> {
				Ok(($(form.scan::<$ty>(names[$index])?,)+))
			}
		}
	};
}

impl_scan_tuple!(1 => A:0);
impl_scan_tuple!(2 => A:0, B:1);
impl_scan_tuple!(3 => A:0, B:1, C:2);
impl_scan_tuple!(4 => A:0, B:1, C:2, D:3);
impl_scan_tuple!(5 => A:0, B:1, C:2, D:3, E:4);
impl_scan_tuple!(6 => A:0, B:1, C:2, D:3, E:4, F:5);
impl_scan_tuple!(7 => A:0, B:1, C:2, D:3, E:4, F:5, G:6);
impl_scan_tuple!(8 => A:0, B:1, C:2, D:3, E:4, F:5, G:6, H:7);

impl Form {
	/// Scans one field, looked up by case-insensitive name, into a typed
	/// value.
	///
	/// ```
	/// use fieldset::{Field, Form, FormRequest};
	///
	/// let mut form = Form::new().with_field(Field::number("age"));
	/// form.fill(&FormRequest::post("age=36")?);
	///
	/// let age: u32 = form.scan("age")?;
	/// assert_eq!(age, 36);
	/// # Ok::<(), anyhow::Error>(())
	/// ```
	pub fn scan<T: FromFormValue>(&self, name: &str) -> Result<T, ScanError> {
		let field = self
			.field(name)
			.ok_or_else(|| ScanError::UnknownField(name.to_string()))?;
		T::from_form_value(field.value()).map_err(|error| error.with_field(field.name()))
	}

	/// Scans several fields at once into a tuple. Passing `["*"]` or an
	/// empty slice scans every field in declaration order; the tuple arity
	/// must match the number of fields scanned.
	pub fn scan_fields<T: ScanTuple>(&self, names: &[&str]) -> Result<T, ScanError> {
		let all: Vec<&str>;
		let names = if names.is_empty() || names == ["*"] {
			all = self.fields().iter().map(|field| field.name()).collect();
			&all[..]
		} else {
			names
		};
		if names.len() != T::ARITY {
			return Err(ScanError::ArityMismatch {
				fields: names.len(),
				targets: T::ARITY,
			});
		}
		T::scan_from(self, names)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::field::{Field, FormElement};

	fn form_with(name: &str, values: &[&str]) -> Form {
		let mut form = Form::new().with_field(Field::text(name));
		if let Some(field) = form.field_mut(name) {
			field.set_value(values.iter().map(|v| v.to_string()).collect());
		}
		form
	}

	#[rstest]
	#[case("true", Some(true))]
	#[case("YES", Some(true))]
	#[case("1", Some(true))]
	#[case("on", Some(true))]
	#[case("checked", Some(true))]
	#[case("selected", Some(true))]
	#[case(" True ", Some(true))]
	#[case("false", Some(false))]
	#[case("no", Some(false))]
	#[case("0", Some(false))]
	#[case("off", Some(false))]
	#[case("", None)]
	#[case("maybe", None)]
	fn test_parse_bool(#[case] input: &str, #[case] expected: Option<bool>) {
		assert_eq!(parse_bool(input), expected);
	}

	#[rstest]
	fn test_scan_typed_scalars() {
		assert_eq!(form_with("age", &["36"]).scan::<u32>("age").unwrap(), 36);
		assert_eq!(
			form_with("rate", &["2.5"]).scan::<f64>("rate").unwrap(),
			2.5
		);
		assert!(form_with("flag", &["yes"]).scan::<bool>("flag").unwrap());
		assert_eq!(
			form_with("name", &["Ada"]).scan::<String>("name").unwrap(),
			"Ada"
		);
	}

	#[rstest]
	fn test_scan_numeric_trims_whitespace() {
		assert_eq!(form_with("age", &[" 42 "]).scan::<i32>("age").unwrap(), 42);
	}

	#[rstest]
	fn test_scan_date() {
		let date: NaiveDate = form_with("born", &["1815-12-10"]).scan("born").unwrap();
		assert_eq!(date, NaiveDate::from_ymd_opt(1815, 12, 10).unwrap());
	}

	#[rstest]
	fn test_scan_field_name_is_case_insensitive() {
		let form = form_with("Email", &["a@b.example"]);
		assert_eq!(form.scan::<String>("email").unwrap(), "a@b.example");
	}

	#[rstest]
	fn test_scan_unknown_field() {
		let form = form_with("name", &["x"]);
		assert_eq!(
			form.scan::<String>("missing").unwrap_err(),
			ScanError::UnknownField("missing".to_string())
		);
	}

	#[rstest]
	fn test_scan_missing_scalar_value() {
		let form = Form::new().with_field(Field::number("age"));
		assert_eq!(
			form.scan::<i32>("age").unwrap_err(),
			ScanError::MissingValue("age".to_string())
		);
	}

	#[rstest]
	fn test_scan_empty_string_is_a_value() {
		let form = Form::new().with_field(Field::text("note"));
		assert_eq!(form.scan::<String>("note").unwrap(), "");
	}

	#[rstest]
	fn test_scan_option_absorbs_absence() {
		let form = Form::new().with_field(Field::number("age"));
		assert_eq!(form.scan::<Option<i32>>("age").unwrap(), None);

		let form = form_with("age", &["7"]);
		assert_eq!(form.scan::<Option<i32>>("age").unwrap(), Some(7));
	}

	#[rstest]
	fn test_scan_vec_collects_all_values() {
		let form = form_with("ids", &["1", "2", "3"]);
		assert_eq!(form.scan::<Vec<i32>>("ids").unwrap(), vec![1, 2, 3]);
	}

	#[rstest]
	fn test_scan_vec_absorbs_absence_and_blanks() {
		let form = Form::new().with_field(Field::select("tags", Vec::new()));
		assert_eq!(form.scan::<Vec<String>>("tags").unwrap(), Vec::<String>::new());

		let form = form_with("tags", &["a", "", "b"]);
		assert_eq!(form.scan::<Vec<String>>("tags").unwrap(), vec!["a", "b"]);
	}

	#[rstest]
	fn test_scan_parse_error_names_the_field() {
		let error = form_with("age", &["abc"]).scan::<i32>("age").unwrap_err();
		match error {
			ScanError::Parse { field, value, .. } => {
				assert_eq!(field, "age");
				assert_eq!(value, "abc");
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	fn test_scan_fields_into_tuple() {
		let mut form = Form::new()
			.with_field(Field::text("name"))
			.with_field(Field::number("age"));
		if let Some(field) = form.field_mut("name") {
			field.set_value(vec!["Ada".to_string()]);
		}
		if let Some(field) = form.field_mut("age") {
			field.set_value(vec!["36".to_string()]);
		}

		let (name, age): (String, u8) = form.scan_fields(&["name", "age"]).unwrap();
		assert_eq!(name, "Ada");
		assert_eq!(age, 36);
	}

	#[rstest]
	#[case(&["*"])]
	#[case(&[])]
	fn test_scan_fields_wildcard_scans_all(#[case] names: &[&str]) {
		let mut form = Form::new()
			.with_field(Field::text("a"))
			.with_field(Field::text("b"));
		if let Some(field) = form.field_mut("a") {
			field.set_value(vec!["1".to_string()]);
		}
		if let Some(field) = form.field_mut("b") {
			field.set_value(vec!["2".to_string()]);
		}

		let (a, b): (i32, i32) = form.scan_fields(names).unwrap();
		assert_eq!((a, b), (1, 2));
	}

	#[rstest]
	fn test_scan_fields_arity_mismatch() {
		let form = Form::new()
			.with_field(Field::text("a"))
			.with_field(Field::text("b"));
		let error = form.scan_fields::<(String,)>(&[]).unwrap_err();
		assert_eq!(
			error,
			ScanError::ArityMismatch {
				fields: 2,
				targets: 1
			}
		);
	}

	#[rstest]
	fn test_scan_char() {
		assert_eq!(form_with("grade", &["A"]).scan::<char>("grade").unwrap(), 'A');
		assert!(form_with("grade", &["AB"]).scan::<char>("grade").is_err());
	}
}
