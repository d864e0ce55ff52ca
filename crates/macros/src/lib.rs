//! Procedural macros for delegato.
//!
//! Generates forwarding boilerplate at compile time:
//! * `delegate!` - forwarding methods inside an `impl` block
//! * `#[delegatable]` - records a trait's surface as a forwarding template
//! * `#[derive(Delegate)]` - implements delegatable traits through a field

use proc_macro::TokenStream;

mod delegatable;
/// `delegate!` parsing and expansion.
mod delegate;
mod derive;

/// Generates methods that forward to a member of a target.
///
/// ```ignore
/// impl Wrapper {
///     delegate! {
///         to self.inner {
///             /// Forwards to `self.inner.upper()`.
///             pub fn upper(&self) -> String;
///             #[call(to_lowercase)]
///             pub fn lower(&self) -> String;
///             #[field]
///             pub fn len(&self) -> usize;
///             #[property]
///             pub fn param(&self) -> i32;
///         }
///         to self {
///             #[call(upper)]
///             pub fn shout(&self) -> String;
///         }
///     }
/// }
/// ```
///
/// # Item attributes
///
/// * `#[call(name)]` - forward to `name` instead of the method's own name
/// * `#[field]` - read (no arguments) or assign (one argument) a field
/// * `#[property]` - also emit `set_<name>` forwarding to `set_<member>`
///
/// Delegating to `self` needs `#[call(...)]` on every item.
#[proc_macro]
pub fn delegate(input: TokenStream) -> TokenStream {
	delegate::expand(input.into()).unwrap_or_else(syn::Error::into_compile_error).into()
}

/// Makes a trait delegatable with `#[derive(Delegate)]`.
///
/// Emits the trait unchanged plus a hidden `macro_rules!` forwarding template.
/// The template follows textual macro scoping, so derive sites must come after
/// the trait (or the trait's module must be `#[macro_use]`).
///
/// ```ignore
/// #[delegatable]
/// pub trait Shape {
///     type Unit;
///     const SIDES: u32;
///     fn area(&self) -> f64;
///     fn scale(&mut self, by: f64);
/// }
/// ```
///
/// Generic traits and associated functions without a `self` receiver are
/// rejected.
#[proc_macro_attribute]
pub fn delegatable(attr: TokenStream, item: TokenStream) -> TokenStream {
	delegatable::expand(attr.into(), item.into())
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}

/// Implements delegatable traits by forwarding to a field.
///
/// ```ignore
/// #[derive(Delegate)]
/// struct Tile {
///     #[delegate_to(Shape, Named)]
///     square: Square,
///     id: u32,
/// }
/// ```
///
/// Works for named and tuple fields and generic structs; the field type gains
/// a `FieldType: Trait` bound in the generated `where` clause.
#[proc_macro_derive(Delegate, attributes(delegate_to))]
pub fn derive_delegate(input: TokenStream) -> TokenStream {
	derive::expand(input.into()).unwrap_or_else(syn::Error::into_compile_error).into()
}

/// Name of the forwarding template generated for `trait_ident`.
fn template_name(trait_ident: &syn::Ident) -> syn::Ident {
	quote::format_ident!("__delegato_impl_{}", trait_ident)
}
