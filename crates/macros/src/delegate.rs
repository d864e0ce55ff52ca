//! `delegate!` implementation.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Expr, FnArg, ForeignItemFn, Ident, Pat, ReturnType, Type, braced, parse_quote};

syn::custom_keyword!(to);

/// `to <target> { <signatures> }`, repeated.
struct DelegateInput {
	groups: Vec<TargetGroup>,
}

struct TargetGroup {
	target: Expr,
	items: Vec<ForeignItemFn>,
}

impl Parse for DelegateInput {
	fn parse(input: ParseStream) -> syn::Result<Self> {
		let mut groups = Vec::new();
		while !input.is_empty() {
			input.parse::<to>()?;
			let target = Expr::parse_without_eager_brace(input)?;
			let content;
			braced!(content in input);
			let mut items = Vec::new();
			while !content.is_empty() {
				items.push(content.parse()?);
			}
			groups.push(TargetGroup { target, items });
		}
		Ok(DelegateInput { groups })
	}
}

#[derive(Default)]
struct ItemOptions {
	call: Option<Ident>,
	field: bool,
	property: bool,
}

impl ItemOptions {
	/// Splits delegation attributes from the ones passed through.
	fn extract(attrs: &[Attribute]) -> syn::Result<(Self, Vec<&Attribute>)> {
		let mut options = Self::default();
		let mut passthrough = Vec::new();
		for attr in attrs {
			if attr.path().is_ident("call") {
				if options.call.is_some() {
					return Err(syn::Error::new_spanned(attr, "duplicate #[call(...)]"));
				}
				options.call = Some(attr.parse_args()?);
			} else if attr.path().is_ident("field") {
				attr.meta.require_path_only()?;
				options.field = true;
			} else if attr.path().is_ident("property") {
				attr.meta.require_path_only()?;
				options.property = true;
			} else {
				passthrough.push(attr);
			}
		}
		if options.field && options.property {
			return Err(syn::Error::new_spanned(
				attrs.first(),
				"#[field] and #[property] cannot be combined",
			));
		}
		Ok((options, passthrough))
	}
}

pub fn expand(input: TokenStream) -> syn::Result<TokenStream> {
	let DelegateInput { groups } = syn::parse2(input)?;

	let mut out = TokenStream::new();
	for group in &groups {
		let target = receiver_expr(&group.target);
		let is_self = is_self_target(&target);
		for item in &group.items {
			out.extend(expand_item(&target, is_self, item)?);
		}
	}
	Ok(out)
}

/// Strips redundant parentheses and wraps anything that is not a path or a
/// field chain, so `.member` binds to the whole target.
fn receiver_expr(target: &Expr) -> Expr {
	match target {
		Expr::Paren(p) => receiver_expr(&p.expr),
		Expr::Group(g) => receiver_expr(&g.expr),
		Expr::Path(_) | Expr::Field(_) => target.clone(),
		other => parse_quote!((#other)),
	}
}

fn is_self_target(target: &Expr) -> bool {
	matches!(target, Expr::Path(p) if p.qself.is_none() && p.path.is_ident("self"))
}

fn expand_item(target: &Expr, is_self: bool, item: &ForeignItemFn) -> syn::Result<TokenStream> {
	let (options, attrs) = ItemOptions::extract(&item.attrs)?;
	let vis = &item.vis;
	let sig = &item.sig;

	if !matches!(sig.inputs.first(), Some(FnArg::Receiver(_))) {
		return Err(syn::Error::new_spanned(sig, "delegated methods need a `self` receiver"));
	}
	if is_self && options.call.is_none() {
		return Err(syn::Error::new_spanned(
			sig,
			"delegating to `self` requires #[call(...)] naming the member to forward to",
		));
	}
	let args = argument_names(sig)?;
	let member = options.call.clone().unwrap_or_else(|| sig.ident.clone());

	let body = if options.field {
		field_body(target, sig, &options, &args)?
	} else {
		let await_token = sig.asyncness.map(|_| quote! { .await });
		quote! { #target.#member(#(#args),*) #await_token }
	};

	let setter = if options.property {
		let ReturnType::Type(_, ty) = &sig.output else {
			return Err(syn::Error::new_spanned(sig, "#[property] getters must return a value"));
		};
		if !args.is_empty() {
			return Err(syn::Error::new_spanned(&sig.inputs, "#[property] getters take no arguments"));
		}
		let set_name = format_ident!("set_{}", sig.ident);
		let set_member = format_ident!("set_{}", member);
		quote! {
			#[inline]
			#vis fn #set_name(&mut self, value: #ty) {
				#target.#set_member(value)
			}
		}
	} else {
		TokenStream::new()
	};

	Ok(quote! {
		#(#attrs)*
		#[inline]
		#vis #sig {
			#body
		}

		#setter
	})
}

fn field_body(target: &Expr, sig: &syn::Signature, options: &ItemOptions, args: &[Ident]) -> syn::Result<TokenStream> {
	if sig.asyncness.is_some() {
		return Err(syn::Error::new_spanned(sig, "#[field] accessors cannot be async"));
	}
	match args {
		[] => {
			let member = options.call.clone().unwrap_or_else(|| sig.ident.clone());
			match &sig.output {
				ReturnType::Default => Err(syn::Error::new_spanned(sig, "#[field] getters must return a value")),
				ReturnType::Type(_, ty) => Ok(match &**ty {
					Type::Reference(r) if r.mutability.is_some() => quote! { &mut #target.#member },
					Type::Reference(_) => quote! { &#target.#member },
					_ => quote! { #target.#member },
				}),
			}
		}
		[value] => {
			let member = match &options.call {
				Some(member) => member.clone(),
				None => {
					let name = sig.ident.to_string();
					let Some(stripped) = name.strip_prefix("set_").filter(|s| !s.is_empty()) else {
						return Err(syn::Error::new_spanned(
							&sig.ident,
							"#[field] setters must be named `set_<field>` or use #[call(field)]",
						));
					};
					Ident::new(stripped, sig.ident.span())
				}
			};
			if !matches!(sig.output, ReturnType::Default) {
				return Err(syn::Error::new_spanned(&sig.output, "#[field] setters return nothing"));
			}
			Ok(quote! { #target.#member = #value; })
		}
		_ => Err(syn::Error::new_spanned(
			&sig.inputs,
			"#[field] accessors take no arguments (getter) or one (setter)",
		)),
	}
}

fn argument_names(sig: &syn::Signature) -> syn::Result<Vec<Ident>> {
	sig.inputs
		.iter()
		.filter_map(|arg| match arg {
			FnArg::Receiver(_) => None,
			FnArg::Typed(typed) => Some(match &*typed.pat {
				Pat::Ident(pat) if pat.subpat.is_none() => Ok(pat.ident.clone()),
				other => Err(syn::Error::new_spanned(other, "delegated arguments must be plain identifiers")),
			}),
		})
		.collect()
}
