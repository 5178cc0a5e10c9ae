//! Request data extraction
//!
//! [`FormRequest`] is the transport-neutral container a [`Form`](crate::Form)
//! binds from. Callers build one from whatever HTTP stack they use: the query
//! string, an `application/x-www-form-urlencoded` body, or a
//! `multipart/form-data` body. Parsing happens here so the form layer only
//! ever sees decoded names, values and uploaded files.

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;
use thiserror::Error;

use crate::data::UploadedFile;

/// Default cap on accepted body size, 10 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Failure to turn raw request data into form parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
	#[error("invalid form body: {0}")]
	InvalidBody(String),

	#[error("invalid multipart body: {0}")]
	InvalidMultipart(String),

	#[error("multipart content type without a boundary")]
	MissingBoundary,

	#[error("unsupported content type: {0}")]
	UnsupportedContentType(String),

	#[error("request body exceeds the limit of {limit} bytes")]
	BodyTooLarge { limit: usize },

	#[error("unsafe upload filename: {0}")]
	UnsafeFilename(String),
}

/// Decoded request data ready to bind onto a form.
///
/// ```
/// use fieldset::FormRequest;
///
/// let request = FormRequest::post("name=Ada&age=36")?;
/// assert_eq!(request.param("name"), Some("Ada"));
/// # Ok::<(), fieldset::BindError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FormRequest {
	method: Method,
	query: HashMap<String, Vec<String>>,
	form: HashMap<String, Vec<String>>,
	files: HashMap<String, Vec<UploadedFile>>,
	max_body_bytes: usize,
}

impl FormRequest {
	pub fn new(method: Method) -> Self {
		Self {
			method,
			query: HashMap::new(),
			form: HashMap::new(),
			files: HashMap::new(),
			max_body_bytes: DEFAULT_MAX_BODY_BYTES,
		}
	}

	/// A GET request carrying the given query string.
	pub fn get(query: &str) -> Result<Self, BindError> {
		Self::new(Method::GET).with_query(query)
	}

	/// A POST request carrying the given urlencoded body.
	pub fn post(body: &str) -> Result<Self, BindError> {
		Self::new(Method::POST).with_urlencoded_body(body)
	}

	/// Caps the accepted body size for the `with_*_body` calls that follow.
	pub fn max_body_bytes(mut self, limit: usize) -> Self {
		self.max_body_bytes = limit;
		self
	}

	/// Parses a query string (an optional leading `?` is ignored) and merges
	/// the pairs into the query parameters.
	pub fn with_query(mut self, query: &str) -> Result<Self, BindError> {
		for (name, value) in parse_pairs(query.trim_start_matches('?'))? {
			self.query.entry(name).or_default().push(value);
		}
		Ok(self)
	}

	/// Parses an `application/x-www-form-urlencoded` body and merges the
	/// pairs into the form parameters.
	pub fn with_urlencoded_body(mut self, body: &str) -> Result<Self, BindError> {
		if body.len() > self.max_body_bytes {
			return Err(BindError::BodyTooLarge {
				limit: self.max_body_bytes,
			});
		}
		for (name, value) in parse_pairs(body)? {
			self.form.entry(name).or_default().push(value);
		}
		Ok(self)
	}

	/// Parses a `multipart/form-data` body. The boundary is taken from the
	/// content type; text parts land in the form parameters and file parts
	/// in the file map.
	pub fn with_multipart_body(
		mut self,
		content_type: &str,
		body: impl Into<Bytes>,
	) -> Result<Self, BindError> {
		let body = body.into();
		if body.len() > self.max_body_bytes {
			return Err(BindError::BodyTooLarge {
				limit: self.max_body_bytes,
			});
		}
		let boundary = boundary_from(content_type)?;
		self.parse_multipart(boundary.as_bytes(), &body)?;
		tracing::debug!(
			fields = self.form.len(),
			files = self.files.len(),
			"parsed multipart body"
		);
		Ok(self)
	}

	/// Parses a body according to its content type.
	pub fn with_body(self, content_type: &str, body: impl Into<Bytes>) -> Result<Self, BindError> {
		let body = body.into();
		let media_type = content_type
			.split(';')
			.next()
			.unwrap_or(content_type)
			.trim()
			.to_ascii_lowercase();
		match media_type.as_str() {
			"application/x-www-form-urlencoded" => {
				let text = String::from_utf8_lossy(&body).into_owned();
				self.with_urlencoded_body(&text)
			}
			"multipart/form-data" => self.with_multipart_body(content_type, body),
			other => Err(BindError::UnsupportedContentType(other.to_string())),
		}
	}

	/// Adds a form parameter without parsing.
	pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.form.entry(name.into()).or_default().push(value.into());
		self
	}

	/// Adds a query parameter without parsing.
	pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.entry(name.into()).or_default().push(value.into());
		self
	}

	/// Attaches an uploaded file without parsing.
	pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
		self.files.entry(name.into()).or_default().push(file);
		self
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn query(&self) -> &HashMap<String, Vec<String>> {
		&self.query
	}

	pub fn form(&self) -> &HashMap<String, Vec<String>> {
		&self.form
	}

	pub fn files(&self) -> &HashMap<String, Vec<UploadedFile>> {
		&self.files
	}

	/// First value for a parameter, form parameters taking precedence over
	/// query parameters.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.form
			.get(name)
			.or_else(|| self.query.get(name))
			.and_then(|values| values.first())
			.map(String::as_str)
	}

	/// First uploaded file bound under the given name.
	pub fn file(&self, name: &str) -> Option<&UploadedFile> {
		self.files.get(name).and_then(|files| files.first())
	}

	/// The parameter map a form binds from: the query for GET, HEAD and
	/// DELETE requests, the body for everything else.
	pub fn bind_source(&self) -> &HashMap<String, Vec<String>> {
		if self.method == Method::GET || self.method == Method::HEAD || self.method == Method::DELETE
		{
			&self.query
		} else {
			&self.form
		}
	}

	fn parse_multipart(&mut self, boundary: &[u8], body: &Bytes) -> Result<(), BindError> {
		let delimiter = [&b"--"[..], boundary].concat();
		let mut cursor = find_subslice(body, &delimiter, 0)
			.ok_or_else(|| BindError::InvalidMultipart("boundary not found in body".to_string()))?;
		loop {
			cursor += delimiter.len();
			if body[cursor..].starts_with(b"--") {
				break;
			}
			if body[cursor..].starts_with(b"\r\n") {
				cursor += 2;
			}
			let end = find_subslice(body, &delimiter, cursor)
				.ok_or_else(|| BindError::InvalidMultipart("unterminated part".to_string()))?;
			self.parse_part(body.slice(cursor..end))?;
			cursor = end;
		}
		Ok(())
	}

	fn parse_part(&mut self, part: Bytes) -> Result<(), BindError> {
		let header_end = find_subslice(&part, b"\r\n\r\n", 0).ok_or_else(|| {
			BindError::InvalidMultipart("part without a header block".to_string())
		})?;
		let content_start = header_end + 4;
		let mut content_end = part.len();
		if content_end >= content_start + 2 && part.ends_with(b"\r\n") {
			content_end -= 2;
		}
		let content = part.slice(content_start..content_end);

		let headers = String::from_utf8_lossy(&part[..header_end]).into_owned();
		let mut name = None;
		let mut filename = None;
		let mut content_type = None;
		for line in headers.lines() {
			let Some((header, rest)) = line.split_once(':') else {
				continue;
			};
			if header.eq_ignore_ascii_case("content-disposition") {
				for param in rest.split(';') {
					if let Some((key, value)) = param.trim().split_once('=') {
						let value = value.trim().trim_matches('"').to_string();
						match key.trim() {
							"name" => name = Some(value),
							"filename" => filename = Some(value),
							_ => {}
						}
					}
				}
			} else if header.eq_ignore_ascii_case("content-type") {
				content_type = Some(rest.trim().to_string());
			}
		}

		let Some(name) = name else {
			return Err(BindError::InvalidMultipart(
				"part without a field name".to_string(),
			));
		};
		match filename {
			// A file input submitted with no file chosen sends an empty
			// filename; that part binds nothing.
			Some(filename) if filename.is_empty() => {}
			Some(filename) => {
				validate_safe_filename(&filename)?;
				let mut file = UploadedFile::new(filename, content);
				if let Some(content_type) = content_type {
					file = file.with_content_type(content_type);
				}
				self.files.entry(name).or_default().push(file);
			}
			None => {
				let value = String::from_utf8_lossy(&content).into_owned();
				self.form.entry(name).or_default().push(value);
			}
		}
		Ok(())
	}
}

impl Default for FormRequest {
	fn default() -> Self {
		Self::new(Method::GET)
	}
}

fn parse_pairs(input: &str) -> Result<Vec<(String, String)>, BindError> {
	if input.is_empty() {
		return Ok(Vec::new());
	}
	serde_urlencoded::from_str(input).map_err(|error| BindError::InvalidBody(error.to_string()))
}

fn boundary_from(content_type: &str) -> Result<String, BindError> {
	for param in content_type.split(';').skip(1) {
		if let Some((key, value)) = param.trim().split_once('=') {
			if key.trim().eq_ignore_ascii_case("boundary") {
				let boundary = value.trim().trim_matches('"');
				if !boundary.is_empty() {
					return Ok(boundary.to_string());
				}
			}
		}
	}
	Err(BindError::MissingBoundary)
}

fn find_subslice(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
	if needle.is_empty() || haystack.len() < from + needle.len() {
		return None;
	}
	haystack[from..]
		.windows(needle.len())
		.position(|window| window == needle)
		.map(|position| position + from)
}

/// Rejects filenames that could escape an upload directory, including
/// percent-encoded traversal sequences.
fn validate_safe_filename(filename: &str) -> Result<(), BindError> {
	let lowered = filename.to_ascii_lowercase();
	let unsafe_name = filename.contains("..")
		|| filename.contains('/')
		|| filename.contains('\\')
		|| filename.contains('\0')
		|| lowered.contains("%2e%2e")
		|| lowered.contains("%2f")
		|| lowered.contains("%5c");
	if unsafe_name {
		return Err(BindError::UnsafeFilename(filename.to_string()));
	}
	Ok(())
}
