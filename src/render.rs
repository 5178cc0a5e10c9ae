//! HTML generation for fields
//!
//! Keeps the markup rules in one place: attribute order and the per-control
//! tag shapes. Everything user-controlled goes through the escaping helpers
//! in [`crate::escape`].

use crate::escape::{escape_html, escape_html_attr};
use crate::field::{Field, InputType};

impl Field {
	/// Renders the field as HTML, honoring a render override when set.
	pub fn render(&self) -> String {
		if let Some(render) = &self.render_override {
			return render(self);
		}
		self.render_default()
	}

	/// Renders the field label, honoring a label override when set. Fields
	/// without label text render an empty string.
	pub fn render_label(&self) -> String {
		if let Some(render) = &self.label_override {
			return render(self);
		}
		let Some(label) = self.label.as_deref().filter(|label| !label.is_empty()) else {
			return String::new();
		};
		let mut attrs = format!(" for=\"{}\"", escape_html_attr(self.dom_id()));
		if let Some(class) = &self.label_class {
			attrs.push_str(&format!(" class=\"{}\"", escape_html_attr(class)));
		}
		let marker = if self.required { " *" } else { "" };
		format!("<label{attrs}>{}{marker}</label>", escape_html(label))
	}

	fn render_default(&self) -> String {
		match self.input_type {
			InputType::Textarea => self.render_textarea(),
			InputType::Select => self.render_select(),
			InputType::Submit | InputType::Button | InputType::Reset => self.render_button(),
			InputType::File => self.render_file(),
			_ => self.render_input(),
		}
	}

	fn render_input(&self) -> String {
		let mut html = format!("<input{}>", self.attributes());
		self.append_help_text(&mut html);
		html
	}

	fn render_textarea(&self) -> String {
		let mut attrs = String::new();
		self.identity_attrs(&mut attrs);
		if let Some(max) = self.max {
			attrs.push_str(&format!(" maxlength=\"{max}\""));
		}
		if let Some(min) = self.min {
			attrs.push_str(&format!(" minlength=\"{min}\""));
		}
		self.flag_attrs(&mut attrs);
		let mut html = format!(
			"<textarea{attrs}>{}</textarea>",
			escape_html(self.value.as_str())
		);
		self.append_help_text(&mut html);
		html
	}

	fn render_select(&self) -> String {
		let mut attrs = String::new();
		self.identity_attrs(&mut attrs);
		self.flag_attrs(&mut attrs);
		let mut html = format!("<select{attrs}>");
		for option in &self.options {
			let selected =
				option.selected || self.value.values().iter().any(|value| value == &option.value);
			html.push_str(&format!(
				"<option value=\"{}\"{}>{}</option>",
				escape_html_attr(&option.value),
				if selected { " selected" } else { "" },
				escape_html(&option.text)
			));
		}
		html.push_str("</select>");
		self.append_help_text(&mut html);
		html
	}

	fn render_button(&self) -> String {
		let mut attrs = format!(" type=\"{}\"", self.input_type.as_str());
		self.identity_attrs(&mut attrs);
		self.flag_attrs(&mut attrs);
		format!("<button{attrs}>{}</button>", escape_html(&self.label_text()))
	}

	fn render_file(&self) -> String {
		let mut html = String::new();
		if let Some(file) = self.value.file() {
			match &self.class {
				Some(class) => html.push_str(&format!(
					"<p class=\"{}\">{}</p>",
					escape_html_attr(class),
					escape_html(&file.filename)
				)),
				None => html.push_str(&format!("<p>{}</p>", escape_html(&file.filename))),
			}
		}
		html.push_str(&format!("<input{}>", self.attributes()));
		self.append_help_text(&mut html);
		html
	}

	// Attribute order is fixed: type, id, name, placeholder, class, value,
	// max, min, then the flags, then autocomplete.
	fn attributes(&self) -> String {
		let mut attrs = format!(" type=\"{}\"", self.input_type.as_str());
		self.identity_attrs(&mut attrs);
		if self.input_type != InputType::File && !self.value.as_str().is_empty() {
			attrs.push_str(&format!(
				" value=\"{}\"",
				escape_html_attr(self.value.as_str())
			));
		}
		if let Some(max) = self.max {
			attrs.push_str(&format!(" max=\"{max}\""));
		}
		if let Some(min) = self.min {
			attrs.push_str(&format!(" min=\"{min}\""));
		}
		self.flag_attrs(&mut attrs);
		attrs
	}

	fn identity_attrs(&self, attrs: &mut String) {
		attrs.push_str(&format!(" id=\"{}\"", escape_html_attr(self.dom_id())));
		attrs.push_str(&format!(" name=\"{}\"", escape_html_attr(&self.name)));
		if let Some(placeholder) = &self.placeholder {
			attrs.push_str(&format!(
				" placeholder=\"{}\"",
				escape_html_attr(placeholder)
			));
		}
		if let Some(class) = &self.class {
			attrs.push_str(&format!(" class=\"{}\"", escape_html_attr(class)));
		}
	}

	fn flag_attrs(&self, attrs: &mut String) {
		if self.required {
			attrs.push_str(" required");
		}
		if self.disabled {
			attrs.push_str(" disabled");
		}
		if self.readonly {
			attrs.push_str(" readonly");
		}
		if self.is_checked() {
			attrs.push_str(" checked");
		}
		if self.hidden {
			attrs.push_str(" hidden");
		}
		if self.multiple {
			attrs.push_str(" multiple");
		}
		if let Some(autocomplete) = &self.autocomplete {
			attrs.push_str(&format!(
				" autocomplete=\"{}\"",
				escape_html_attr(autocomplete)
			));
		}
	}

	/// Checkboxes are checked when flagged or when the bound value says so.
	fn is_checked(&self) -> bool {
		match self.input_type {
			InputType::Checkbox => {
				let value = self.value.as_str();
				self.checked
					|| value.eq_ignore_ascii_case("on")
					|| value.eq_ignore_ascii_case("true")
			}
			InputType::Radio => self.checked,
			_ => false,
		}
	}

	fn append_help_text(&self, html: &mut String) {
		if let Some(help_text) = &self.help_text {
			html.push_str(&format!(
				"<small class=\"help-text\">{}</small>",
				escape_html(help_text)
			));
		}
	}
}
