//! Field value containers
//!
//! [`FormData`] is what a field holds after binding: zero or more submitted
//! strings, and for file inputs the uploaded payload. It is deliberately
//! dumb; interpretation (validation, typed extraction) happens elsewhere.

use std::fmt;

use bytes::Bytes;
use serde::Serialize;

/// A single uploaded file bound to a form field.
///
/// The payload is kept in memory as [`Bytes`], so cloning is cheap and the
/// same upload can be inspected by hooks and validators without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
	pub filename: String,
	pub content_type: Option<String>,
	pub content: Bytes,
}

impl UploadedFile {
	pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
		Self {
			filename: filename.into(),
			content_type: None,
			content: content.into(),
		}
	}

	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	/// Payload size in bytes.
	pub fn size(&self) -> usize {
		self.content.len()
	}
}

/// The submitted data held by one form field.
///
/// # Examples
///
/// ```
/// use fieldset::FormData;
///
/// let data = FormData::from_values(vec!["a".to_string(), "b".to_string()]);
/// assert_eq!(data.as_str(), "a");
/// assert_eq!(data.values().len(), 2);
/// assert!(!data.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormData {
	values: Vec<String>,
	#[serde(skip)]
	file: Option<UploadedFile>,
}

impl FormData {
	/// Creates a container holding a single value.
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			values: vec![value.into()],
			file: None,
		}
	}

	/// Creates a container holding the given values in order.
	pub fn from_values(values: Vec<String>) -> Self {
		Self { values, file: None }
	}

	/// The first value, or `""` when nothing was submitted.
	pub fn as_str(&self) -> &str {
		self.values.first().map(String::as_str).unwrap_or("")
	}

	/// All submitted values in arrival order.
	pub fn values(&self) -> &[String] {
		&self.values
	}

	pub fn set_values(&mut self, values: Vec<String>) {
		self.values = values;
	}

	/// Attaches an uploaded file. The filename becomes the display value.
	pub fn set_file(&mut self, file: UploadedFile) {
		self.values = vec![file.filename.clone()];
		self.file = Some(file);
	}

	pub fn is_file(&self) -> bool {
		self.file.is_some()
	}

	pub fn file(&self) -> Option<&UploadedFile> {
		self.file.as_ref()
	}

	/// True when nothing usable was submitted: no file, and every value is
	/// the empty string. A browser submits `name=` for a blank input, so a
	/// lone `""` still counts as empty.
	pub fn is_empty(&self) -> bool {
		self.file.is_none() && self.values.iter().all(String::is_empty)
	}

	/// Drops all values and any file payload.
	pub fn clear(&mut self) {
		self.values.clear();
		self.file = None;
	}
}

impl fmt::Display for FormData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for FormData {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for FormData {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<Vec<String>> for FormData {
	fn from(values: Vec<String>) -> Self {
		Self::from_values(values)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	fn test_as_str_returns_first_value() {
		let data = FormData::from_values(vec!["one".to_string(), "two".to_string()]);
		assert_eq!(data.as_str(), "one");
	}

	#[rstest]
	fn test_as_str_never_panics_when_empty() {
		let data = FormData::default();
		assert_eq!(data.as_str(), "");
	}

	#[rstest]
	#[case(vec![], true)]
	#[case(vec!["".to_string()], true)]
	#[case(vec!["".to_string(), "".to_string()], true)]
	#[case(vec!["x".to_string()], false)]
	#[case(vec!["".to_string(), "x".to_string()], false)]
	fn test_is_empty(#[case] values: Vec<String>, #[case] expected: bool) {
		let data = FormData::from_values(values);
		assert_eq!(data.is_empty(), expected);
	}

	#[rstest]
	fn test_file_attachment() {
		let mut data = FormData::default();
		assert!(!data.is_file());

		data.set_file(UploadedFile::new("report.pdf", &b"%PDF-1.4"[..]));
		assert!(data.is_file());
		assert!(!data.is_empty());
		assert_eq!(data.as_str(), "report.pdf");
		assert_eq!(data.file().map(|f| f.size()), Some(8));
	}

	#[rstest]
	fn test_clear_drops_everything() {
		let mut data = FormData::new("value");
		data.set_file(UploadedFile::new("a.txt", &b"abc"[..]));
		data.clear();
		assert!(data.is_empty());
		assert!(!data.is_file());
	}

	#[rstest]
	fn test_display_matches_first_value() {
		let data = FormData::new("shown");
		assert_eq!(data.to_string(), "shown");
	}

	#[rstest]
	fn test_serializes_values_but_not_files() {
		let mut data = FormData::from_values(vec!["a".to_string(), "b".to_string()]);
		data.set_file(UploadedFile::new("secret.bin", &b"\x00\x01"[..]));

		let json = serde_json::to_value(&data).unwrap();
		assert_eq!(json, serde_json::json!({ "values": ["secret.bin"] }));
	}
}
