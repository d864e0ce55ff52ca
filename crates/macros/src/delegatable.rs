//! `#[delegatable]` trait templates.
//!
//! The generated template is invoked by `#[derive(Delegate)]` as
//!
//! ```text
//! __delegato_impl_Trait! { [impl generics] [Self type] [where clause] [trait path] field : FieldType }
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, ItemTrait, TraitItem, TraitItemFn, parse_quote};

use crate::template_name;

pub fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
	if !attr.is_empty() {
		return Err(syn::Error::new_spanned(attr, "#[delegatable] takes no arguments"));
	}
	let input: ItemTrait = syn::parse2(item)?;

	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"generic traits cannot be made delegatable",
		));
	}

	let forwards = input.items.iter().map(forward_item).collect::<syn::Result<Vec<_>>>()?;
	let macro_name = template_name(&input.ident);

	Ok(quote! {
		#input

		#[doc(hidden)]
		#[allow(unused_macros)]
		macro_rules! #macro_name {
			([$($impl_generics:tt)*] [$self_ty:ty] [$($where_clause:tt)*] [$trait_path:path] $field:tt : $field_ty:ty) => {
				impl $($impl_generics)* $trait_path for $self_ty $($where_clause)* {
					#(#forwards)*
				}
			};
		}
	})
}

fn forward_item(item: &TraitItem) -> syn::Result<TokenStream> {
	match item {
		TraitItem::Fn(method) => forward_fn(method),
		TraitItem::Type(ty) => {
			if !ty.generics.params.is_empty() {
				return Err(syn::Error::new_spanned(
					&ty.generics,
					"generic associated types cannot be delegated",
				));
			}
			let ident = &ty.ident;
			Ok(quote! {
				type #ident = <$field_ty as $trait_path>::#ident;
			})
		}
		TraitItem::Const(constant) => {
			let ident = &constant.ident;
			let ty = &constant.ty;
			Ok(quote! {
				const #ident: #ty = <$field_ty as $trait_path>::#ident;
			})
		}
		other => Err(syn::Error::new_spanned(other, "unsupported item in a delegatable trait")),
	}
}

fn forward_fn(method: &TraitItemFn) -> syn::Result<TokenStream> {
	let mut sig = method.sig.clone();
	let name = &method.sig.ident;

	let Some(FnArg::Receiver(receiver)) = sig.inputs.first() else {
		return Err(syn::Error::new_spanned(
			&method.sig,
			"only methods with a `self` receiver can be delegated",
		));
	};
	if receiver.colon_token.is_some() {
		return Err(syn::Error::new_spanned(
			receiver,
			"typed receivers (`self: Type`) cannot be delegated",
		));
	}
	// Rebuild the receiver so it shares hygiene with the forwarding body.
	// `mut self` only matters to the trait's own default body and is dropped.
	let (receiver_arg, receiver_expr) = match (&receiver.reference, &receiver.mutability) {
		(Some((_, lifetime)), Some(_)) => (quote! { &#lifetime mut self }, quote! { &mut self.$field }),
		(Some((_, lifetime)), None) => (quote! { &#lifetime self }, quote! { &self.$field }),
		(None, _) => (quote! { self }, quote! { self.$field }),
	};
	sig.inputs[0] = parse_quote!(#receiver_arg);

	let mut args = Vec::new();
	for (index, arg) in sig.inputs.iter_mut().skip(1).enumerate() {
		let FnArg::Typed(typed) = arg else {
			return Err(syn::Error::new_spanned(arg, "unexpected second receiver"));
		};
		let ident = format_ident!("__delegato_arg{}", index);
		*typed.pat = parse_quote!(#ident);
		args.push(ident);
	}

	let await_token = sig.asyncness.map(|_| quote! { .await });
	Ok(quote! {
		#[inline]
		#sig {
			<$field_ty as $trait_path>::#name(#receiver_expr #(, #args)*) #await_token
		}
	})
}
