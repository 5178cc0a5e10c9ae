//! Form property-based tests
//!
//! Property-based tests for HTML escaping, value binding and scan-back.

use fieldset::escape::{escape_html, escape_html_attr};
use fieldset::{parse_bool, Field, Form, FormData, FormRequest};
use proptest::prelude::*;
use rstest::*;

// ============================================================================
// Property-Based Tests: Escaping
// ============================================================================

proptest! {
	/// Test: escaped text is inert
	///
	/// Category: Property
	/// Verifies that escaped output carries no markup metacharacters.
	#[rstest]
	fn prop_escaped_html_is_inert(input in ".*") {
		let escaped = escape_html(&input);

		prop_assert!(!escaped.contains('<'));
		prop_assert!(!escaped.contains('>'));
		prop_assert!(!escaped.contains('"'));
		prop_assert!(!escaped.contains('\''));
	}

	/// Test: escaped attributes stay on one line
	///
	/// Category: Property
	/// Verifies that attribute escaping also strips quote and newline
	/// characters that would break out of an attribute value.
	#[rstest]
	fn prop_escaped_attr_never_breaks_out(input in ".*") {
		let escaped = escape_html_attr(&input);

		prop_assert!(!escaped.contains('"'));
		prop_assert!(!escaped.contains('\n'));
		prop_assert!(!escaped.contains('\r'));
	}

	/// Test: bound values render escaped but intact
	///
	/// Category: Property
	/// Verifies that whatever value is bound to a text field shows up in
	/// the rendered markup in escaped form.
	#[rstest]
	fn prop_bound_value_renders_escaped(value in "[ -~]{1,40}") {
		let field = Field::text("f").with_value(value.clone());
		let html = field.render();

		let attr = format!(" value=\"{}\"", escape_html_attr(&value));
		prop_assert!(html.contains(&attr));
	}
}

// ============================================================================
// Property-Based Tests: Binding and Scanning
// ============================================================================

proptest! {
	/// Test: parse_bool is total
	///
	/// Category: Property
	/// Verifies that arbitrary input never panics and only the known
	/// tokens produce a value.
	#[rstest]
	fn prop_parse_bool_is_total(input in ".*") {
		let _ = parse_bool(&input);
	}

	/// Test: truthy tokens are case-insensitive
	///
	/// Category: Property
	/// Verifies every casing of a truthy token parses to true.
	#[rstest]
	fn prop_parse_bool_truthy_any_case(
		token in prop::sample::select(vec!["true", "yes", "1", "on", "checked", "selected"]),
		upper in any::<bool>(),
	) {
		let spelled = if upper { token.to_uppercase() } else { token.to_string() };

		prop_assert_eq!(parse_bool(&spelled), Some(true));
	}

	/// Test: first bound value wins
	///
	/// Category: Property
	/// Verifies that FormData::as_str always returns the first value.
	#[rstest]
	fn prop_first_value_wins(values in prop::collection::vec(".*", 1..5)) {
		let data = FormData::from_values(values.clone());

		prop_assert_eq!(data.as_str(), values[0].as_str());
	}

	/// Test: integers round-trip through a request
	///
	/// Category: Property
	/// Verifies that any i64 sent as a form parameter binds, validates
	/// and scans back to the original value.
	#[rstest]
	fn prop_integers_roundtrip(value in any::<i64>()) {
		let mut form = Form::new().with_field(Field::number("n"));

		let request = FormRequest::post(&format!("n={value}")).unwrap();
		prop_assert!(form.fill(&request));
		prop_assert_eq!(form.scan::<i64>("n").unwrap(), value);
	}

	/// Test: finite floats round-trip through a request
	///
	/// Category: Property
	/// Verifies that a finite f64 survives display, binding and scan-back.
	#[rstest]
	fn prop_floats_roundtrip(value in -1.0e9f64..1.0e9f64) {
		let mut form = Form::new().with_field(Field::number("n"));

		let request = FormRequest::post(&format!("n={value}")).unwrap();
		prop_assert!(form.fill(&request));
		prop_assert_eq!(form.scan::<f64>("n").unwrap(), value);
	}
}
