//! Parsing for the `#[form(...)]` field attribute.

use syn::{
	Error, Ident, Lit, LitInt, LitStr, Result, Token,
	parse::{Parse, ParseStream},
	punctuated::Punctuated,
};

/// Parsed attributes from `#[form(...)]`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FormAttrs {
	/// Label text override
	pub(crate) label: Option<LitStr>,
	/// Placeholder text
	pub(crate) placeholder: Option<LitStr>,
	/// CSS class
	pub(crate) class: Option<LitStr>,
	/// Element id override
	pub(crate) id: Option<LitStr>,
	/// Input kind override (e.g. `"textarea"`)
	pub(crate) kind: Option<LitStr>,
	/// Whether the field is required
	pub(crate) required: bool,
	/// Lower bound (value for numeric kinds, character count otherwise)
	pub(crate) min: Option<LitInt>,
	/// Upper bound (value for numeric kinds, character count otherwise)
	pub(crate) max: Option<LitInt>,
	/// Validation pattern or `<<alias>>` shorthand
	pub(crate) regex: Option<LitStr>,
	/// Whether to exclude the field from the form
	pub(crate) skip: bool,
}

impl Parse for FormAttrs {
	fn parse(input: ParseStream) -> Result<Self> {
		let attrs = Punctuated::<FormAttr, Token![,]>::parse_terminated(input)?;

		let mut result = Self::default();

		for attr in attrs {
			match attr {
				FormAttr::Flag(name) => match name.to_string().as_str() {
					"required" => {
						if result.required {
							return Err(Error::new(
								name.span(),
								"duplicate `required` attribute",
							));
						}
						result.required = true;
					}
					"skip" => {
						if result.skip {
							return Err(Error::new(name.span(), "duplicate `skip` attribute"));
						}
						result.skip = true;
					}
					_ => {
						return Err(Error::new(
							name.span(),
							format!("unknown flag attribute `{}`", name),
						));
					}
				},
				FormAttr::NameValue { name, value } => match name.to_string().as_str() {
					"label" => set_str(&mut result.label, &name, value)?,
					"placeholder" => set_str(&mut result.placeholder, &name, value)?,
					"class" => set_str(&mut result.class, &name, value)?,
					"id" => set_str(&mut result.id, &name, value)?,
					"kind" => set_str(&mut result.kind, &name, value)?,
					"regex" => set_str(&mut result.regex, &name, value)?,
					"min" => set_int(&mut result.min, &name, value)?,
					"max" => set_int(&mut result.max, &name, value)?,
					_ => {
						return Err(Error::new(
							name.span(),
							format!("unknown attribute `{}`", name),
						));
					}
				},
			}
		}

		Ok(result)
	}
}

/// Single attribute: either a flag or a name-value pair.
enum FormAttr {
	/// Flag attribute (e.g. `required`, `skip`)
	Flag(Ident),
	/// Name-value attribute (e.g. `label = "Name"`)
	NameValue { name: Ident, value: Lit },
}

impl Parse for FormAttr {
	fn parse(input: ParseStream) -> Result<Self> {
		let name: Ident = input.parse()?;

		if input.peek(Token![=]) {
			let _eq: Token![=] = input.parse()?;
			let value: Lit = input.parse()?;
			Ok(FormAttr::NameValue { name, value })
		} else {
			Ok(FormAttr::Flag(name))
		}
	}
}

fn set_str(slot: &mut Option<LitStr>, name: &Ident, value: Lit) -> Result<()> {
	if slot.is_some() {
		return Err(Error::new(
			name.span(),
			format!("duplicate `{}` attribute", name),
		));
	}
	match value {
		Lit::Str(lit) => {
			*slot = Some(lit);
			Ok(())
		}
		other => Err(Error::new(
			other.span(),
			format!("`{}` expects a string literal", name),
		)),
	}
}

fn set_int(slot: &mut Option<LitInt>, name: &Ident, value: Lit) -> Result<()> {
	if slot.is_some() {
		return Err(Error::new(
			name.span(),
			format!("duplicate `{}` attribute", name),
		));
	}
	match value {
		Lit::Int(lit) => {
			*slot = Some(lit);
			Ok(())
		}
		other => Err(Error::new(
			other.span(),
			format!("`{}` expects an integer literal", name),
		)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use syn::parse_quote;

	#[test]
	fn test_parse_flags() {
		let attrs: FormAttrs = parse_quote! { required, skip };

		assert!(attrs.required);
		assert!(attrs.skip);
		assert!(attrs.label.is_none());
	}

	#[test]
	fn test_parse_name_values() {
		let attrs: FormAttrs = parse_quote! {
			label = "Full name",
			placeholder = "Jane Doe",
			kind = "textarea",
			min = 2,
			max = 150
		};

		assert_eq!(attrs.label.unwrap().value(), "Full name");
		assert_eq!(attrs.placeholder.unwrap().value(), "Jane Doe");
		assert_eq!(attrs.kind.unwrap().value(), "textarea");
		assert_eq!(attrs.min.unwrap().base10_parse::<i64>().unwrap(), 2);
		assert_eq!(attrs.max.unwrap().base10_parse::<i64>().unwrap(), 150);
		assert!(!attrs.required);
	}

	#[test]
	fn test_duplicate_attribute_rejected() {
		let result: Result<FormAttrs> = syn::parse_str("label = \"a\", label = \"b\"");
		let error = result.unwrap_err();
		assert!(error.to_string().contains("duplicate `label`"));
	}

	#[test]
	fn test_unknown_attribute_rejected() {
		let result: Result<FormAttrs> = syn::parse_str("colour = \"red\"");
		assert!(result.unwrap_err().to_string().contains("unknown attribute"));
	}

	#[test]
	fn test_wrong_literal_type_rejected() {
		let result: Result<FormAttrs> = syn::parse_str("min = \"two\"");
		let error = result.unwrap_err();
		assert!(error.to_string().contains("expects an integer literal"));
	}
}
