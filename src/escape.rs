//! HTML escaping for rendered markup
//!
//! Every piece of user-supplied text that ends up in rendered field markup
//! goes through one of these functions. Attribute values additionally escape
//! newlines so a value cannot break out of its quoted attribute.

/// Escape HTML special characters in element text.
///
/// # Examples
///
/// ```
/// use fieldset::escape::escape_html;
///
/// let input = "<script>alert('pwned')</script>";
/// assert_eq!(
///     escape_html(input),
///     "&lt;script&gt;alert(&#x27;pwned&#x27;)&lt;/script&gt;"
/// );
/// ```
pub fn escape_html(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Escape HTML special characters in attribute values.
///
/// # Examples
///
/// ```
/// use fieldset::escape::escape_html_attr;
///
/// let value = "\" onfocus=\"alert(1)";
/// let escaped = escape_html_attr(value);
/// assert!(!escaped.contains('"'));
/// assert!(escaped.contains("&quot;"));
/// ```
pub fn escape_html_attr(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
		.replace('\n', "&#10;")
		.replace('\r', "&#13;")
}
