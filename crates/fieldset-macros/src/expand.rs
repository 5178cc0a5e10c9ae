//! Code generation for `#[derive(FormFields)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, LitStr, Result};

use crate::attrs::FormAttrs;

pub(crate) fn derive_form_fields(input: &DeriveInput) -> Result<TokenStream> {
	if !input.generics.params.is_empty() {
		return Err(Error::new_spanned(
			&input.generics,
			"#[derive(FormFields)] does not support generic structs",
		));
	}

	let fields = match &input.data {
		Data::Struct(data) => match &data.fields {
			Fields::Named(fields) => &fields.named,
			_ => {
				return Err(Error::new_spanned(
					input,
					"#[derive(FormFields)] only supports structs with named fields",
				));
			}
		},
		_ => {
			return Err(Error::new_spanned(
				input,
				"#[derive(FormFields)] only supports structs",
			));
		}
	};

	let mut builders = Vec::new();
	for field in fields {
		let attrs = parse_form_attrs(field)?;
		if attrs.skip {
			continue;
		}

		let ident = field.ident.as_ref().unwrap();
		let name = ident.to_string();
		let ty = &field.ty;

		let input_type = match &attrs.kind {
			Some(kind) => input_type_tokens(kind)?,
			None => quote! { <#ty as ::fieldset::FieldValue>::input_type() },
		};

		let mut setup = Vec::new();
		if let Some(label) = &attrs.label {
			setup.push(quote! { field = field.with_label(#label); });
		}
		if let Some(placeholder) = &attrs.placeholder {
			setup.push(quote! { field = field.with_placeholder(#placeholder); });
		}
		if let Some(class) = &attrs.class {
			setup.push(quote! { field = field.with_class(#class); });
		}
		if let Some(id) = &attrs.id {
			setup.push(quote! { field = field.with_id(#id); });
		}
		if attrs.required {
			setup.push(quote! { field = field.required(); });
		}
		if let Some(min) = &attrs.min {
			setup.push(quote! { field = field.with_min(#min); });
		}
		if let Some(max) = &attrs.max {
			setup.push(quote! { field = field.with_max(#max); });
		}
		if let Some(regex) = &attrs.regex {
			setup.push(quote! { field = field.with_regex(#regex); });
		}

		builders.push(quote! {
			{
				let mut field = ::fieldset::Field::new(#name, #input_type);
				::fieldset::FieldValue::populate(&self.#ident, &mut field);
				#(#setup)*
				fields.push(field);
			}
		});
	}

	let struct_name = &input.ident;
	Ok(quote! {
		#[automatically_derived]
		impl ::fieldset::FormFields for #struct_name {
			fn form_fields(&self) -> ::std::vec::Vec<::fieldset::Field> {
				let mut fields = ::std::vec::Vec::new();
				#(#builders)*
				fields
			}
		}
	})
}

fn parse_form_attrs(field: &syn::Field) -> Result<FormAttrs> {
	let mut parsed = None;
	for attr in &field.attrs {
		if attr.path().is_ident("form") {
			if parsed.is_some() {
				return Err(Error::new_spanned(attr, "duplicate #[form(...)] attribute"));
			}
			parsed = Some(attr.parse_args::<FormAttrs>()?);
		}
	}
	Ok(parsed.unwrap_or_default())
}

/// Maps a `kind = "..."` override to an `InputType` variant, rejecting
/// unknown names at expansion time.
fn input_type_tokens(kind: &LitStr) -> Result<TokenStream> {
	let variant = match kind.value().as_str() {
		"text" => quote! { Text },
		"password" => quote! { Password },
		"email" => quote! { Email },
		"number" => quote! { Number },
		"range" => quote! { Range },
		"textarea" => quote! { Textarea },
		"checkbox" => quote! { Checkbox },
		"radio" => quote! { Radio },
		"select" => quote! { Select },
		"hidden" => quote! { Hidden },
		"file" => quote! { File },
		"submit" => quote! { Submit },
		"button" => quote! { Button },
		"reset" => quote! { Reset },
		other => {
			return Err(Error::new(
				kind.span(),
				format!("unknown input kind `{other}`"),
			));
		}
	};
	Ok(quote! { ::fieldset::InputType::#variant })
}
