//! `#[derive(Delegate)]` implementation.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::{Data, DeriveInput, Fields, Index, Path, Token, WhereClause, parse_quote};

use crate::template_name;

pub fn expand(input: TokenStream) -> syn::Result<TokenStream> {
	let input: DeriveInput = syn::parse2(input)?;
	let name = &input.ident;

	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(&input, "Delegate can only be derived for structs"));
	};

	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

	let mut seen: Vec<String> = Vec::new();
	let mut out = TokenStream::new();
	for (index, field) in data.fields.iter().enumerate() {
		let member = match &field.ident {
			Some(ident) => ident.to_token_stream(),
			None => Index::from(index).to_token_stream(),
		};
		let field_ty = &field.ty;

		for attr in field.attrs.iter().filter(|a| a.path().is_ident("delegate_to")) {
			let traits = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
			if traits.is_empty() {
				return Err(syn::Error::new_spanned(attr, "#[delegate_to(...)] needs at least one trait"));
			}
			for trait_path in traits {
				let key = trait_path.to_token_stream().to_string();
				if seen.contains(&key) {
					return Err(syn::Error::new_spanned(
						&trait_path,
						"trait is already delegated to another field",
					));
				}
				let Some(last) = trait_path.segments.last() else {
					return Err(syn::Error::new_spanned(&trait_path, "expected a trait path"));
				};
				if !last.arguments.is_none() {
					return Err(syn::Error::new_spanned(&trait_path, "generic traits cannot be delegated"));
				}
				let template = template_name(&last.ident);

				let mut bounded: WhereClause = where_clause.cloned().unwrap_or_else(|| parse_quote!(where));
				bounded.predicates.push(parse_quote!(#field_ty: #trait_path));

				out.extend(quote! {
					#template! { [#impl_generics] [#name #ty_generics] [#bounded] [#trait_path] #member : #field_ty }
				});
				seen.push(key);
			}
		}
	}

	if seen.is_empty() {
		let span_source: &dyn ToTokens = match &data.fields {
			Fields::Unit => &input.ident,
			fields => fields,
		};
		return Err(syn::Error::new_spanned(
			span_source,
			"mark a field with #[delegate_to(Trait, ...)] to delegate to it",
		));
	}
	Ok(out)
}
